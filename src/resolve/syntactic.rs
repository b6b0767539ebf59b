//! Best-effort syntactic symbol resolution.
//!
//! Resolves usage sites using only what a single file's syntax provides:
//! its package declaration, import table, and the declared types of local
//! variables, parameters, and fields. No classpath is consulted, so calls
//! resolve against the receiver's *declared* type and anything opaque
//! (chained calls, unknown identifiers, wildcard-import ambiguity) comes
//! back as [`Unresolved`].

use std::collections::HashMap;

use tree_sitter::{Node, Tree};

use super::{ResolveResult, ResolvedCall, ResolvedConstructor, ResolvedType, Resolver, Unresolved};
use crate::parser::node_text;

/// Primitive type names; members of these types are never reference-typed.
const PRIMITIVES: &[&str] = &[
    "int", "long", "short", "byte", "char", "float", "double", "boolean", "void",
];

/// `java.lang` types that are importable without an import statement.
const JAVA_LANG: &[&str] = &[
    "Object",
    "String",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Character",
    "Float",
    "Double",
    "Boolean",
    "Number",
    "Math",
    "System",
    "Thread",
    "Runnable",
    "Class",
    "Void",
    "Enum",
    "Iterable",
    "Comparable",
    "CharSequence",
    "StringBuilder",
    "StringBuffer",
    "Throwable",
    "Error",
    "Exception",
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "NullPointerException",
    "UnsupportedOperationException",
];

/// A type inferred for an expression or declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InferredType {
    Reference(String),
    Primitive(String),
}

impl InferredType {
    fn render(&self) -> &str {
        match self {
            InferredType::Reference(name) | InferredType::Primitive(name) => name,
        }
    }

    fn reference(self) -> ResolveResult<String> {
        match self {
            InferredType::Reference(name) => Ok(name),
            InferredType::Primitive(_) => Err(Unresolved::UnknownReceiver),
        }
    }
}

/// A name's declared type, or the marker that the file declares it with
/// more than one type. The scope tables are file-global rather than
/// per-method, so a conflict means the name cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    Typed(String),
    Conflicting,
}

/// Record a declaration, demoting the name to [`Binding::Conflicting`]
/// when it was already bound to a different type text.
fn bind(map: &mut HashMap<String, Binding>, name: &str, type_text: &str) {
    let conflict = matches!(
        map.get(name),
        Some(Binding::Typed(existing)) if existing != type_text
    );

    if conflict {
        map.insert(name.to_string(), Binding::Conflicting);
    } else if !map.contains_key(name) {
        map.insert(name.to_string(), Binding::Typed(type_text.to_string()));
    }
}

/// Per-file name scope: everything resolution can see.
#[derive(Debug, Default)]
struct FileScope {
    /// Declared package of the file, if any.
    package: Option<String>,
    /// Explicit imports: simple name -> fully-qualified name.
    imports: HashMap<String, String>,
    /// Packages pulled in by on-demand (`.*`) imports.
    wildcard_imports: Vec<String>,
    /// Declared types of locals, parameters, and fields, by name.
    variables: HashMap<String, Binding>,
    /// Declared types of this file's fields, by field name.
    fields: HashMap<String, Binding>,
}

/// [`Resolver`] implementation backed by a single file's syntax.
pub struct SyntacticResolver {
    scope: FileScope,
}

impl SyntacticResolver {
    /// Build a resolver for one parsed file by collecting its scope.
    pub fn new(tree: &Tree, source: &str) -> Self {
        let mut scope = FileScope::default();
        collect_scope(tree.root_node(), source, &mut scope);
        Self { scope }
    }

    /// Resolve a simple (undotted) type name to a fully-qualified one.
    fn resolve_simple_name(&self, name: &str) -> ResolveResult<String> {
        if let Some(fqn) = self.scope.imports.get(name) {
            return Ok(fqn.clone());
        }
        if JAVA_LANG.contains(&name) {
            return Ok(format!("java.lang.{name}"));
        }
        // An on-demand import makes an unknown simple name ambiguous.
        if !self.scope.wildcard_imports.is_empty() {
            return Err(Unresolved::UnknownType);
        }
        // Same-package assumption; such names classify internal downstream.
        match &self.scope.package {
            Some(pkg) => Ok(format!("{pkg}.{name}")),
            None => Err(Unresolved::UnknownType),
        }
    }

    /// Resolve a dotted name from a type or receiver position.
    ///
    /// `java.util.Arrays` passes through; `Map.Entry` resolves its head
    /// segment through the import table first.
    fn resolve_dotted_name(&self, text: &str) -> ResolveResult<String> {
        if !is_name_like(text) || !text.contains('.') {
            return Err(Unresolved::UnknownType);
        }

        let (head, rest) = text.split_once('.').ok_or(Unresolved::UnknownType)?;
        if starts_uppercase(head) {
            let base = self.resolve_simple_name(head)?;
            Ok(format!("{base}.{rest}"))
        } else {
            // Package-qualified already.
            Ok(text.to_string())
        }
    }

    /// Resolve a declared type's source text (e.g. `List<String>`).
    fn resolve_type_text(&self, raw: &str) -> ResolveResult<InferredType> {
        let mut text = raw.trim();
        if let Some(idx) = text.find('<') {
            text = text[..idx].trim_end();
        }
        if text.ends_with("[]") || text.ends_with("...") {
            return Err(Unresolved::OpaqueExpression);
        }
        if PRIMITIVES.contains(&text) {
            return Ok(InferredType::Primitive(text.to_string()));
        }
        if text.contains('.') {
            return self.resolve_dotted_name(text).map(InferredType::Reference);
        }
        self.resolve_simple_name(text).map(InferredType::Reference)
    }

    /// Resolve a node in type position (constructor types, casts).
    fn resolve_type_node(&self, node: Node<'_>, source: &str) -> ResolveResult<String> {
        match node.kind() {
            "generic_type" => {
                let base = node.named_child(0).ok_or(Unresolved::MissingNode)?;
                self.resolve_type_node(base, source)
            }
            "type_identifier" => {
                let text = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                self.resolve_simple_name(text)
            }
            "scoped_type_identifier" => {
                let text = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                self.resolve_dotted_name(text)
            }
            _ => Err(Unresolved::UnknownType),
        }
    }

    /// Infer the type of a value expression from its shape.
    fn infer_expr(&self, node: Node<'_>, source: &str) -> ResolveResult<InferredType> {
        match node.kind() {
            "string_literal" => Ok(InferredType::Reference("java.lang.String".to_string())),
            "character_literal" => Ok(InferredType::Primitive("char".to_string())),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => {
                let text = node_text(&node, source).unwrap_or_default();
                if text.ends_with('l') || text.ends_with('L') {
                    Ok(InferredType::Primitive("long".to_string()))
                } else {
                    Ok(InferredType::Primitive("int".to_string()))
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                let text = node_text(&node, source).unwrap_or_default();
                if text.ends_with('f') || text.ends_with('F') {
                    Ok(InferredType::Primitive("float".to_string()))
                } else {
                    Ok(InferredType::Primitive("double".to_string()))
                }
            }
            "true" | "false" => Ok(InferredType::Primitive("boolean".to_string())),
            "null_literal" => Ok(InferredType::Reference("java.lang.Object".to_string())),
            "identifier" => {
                let name = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                match self.scope.variables.get(name) {
                    Some(Binding::Typed(declared)) => self.resolve_type_text(declared),
                    Some(Binding::Conflicting) => Err(Unresolved::ConflictingName),
                    None => Err(Unresolved::OpaqueExpression),
                }
            }
            "object_creation_expression" => {
                let ty = node
                    .child_by_field_name("type")
                    .ok_or(Unresolved::MissingNode)?;
                self.resolve_type_node(ty, source).map(InferredType::Reference)
            }
            "cast_expression" => {
                let ty = node
                    .child_by_field_name("type")
                    .ok_or(Unresolved::MissingNode)?;
                let text = node_text(&ty, source).ok_or(Unresolved::MissingNode)?;
                self.resolve_type_text(text)
            }
            "parenthesized_expression" => {
                let inner = node.named_child(0).ok_or(Unresolved::MissingNode)?;
                self.infer_expr(inner, source)
            }
            _ => Err(Unresolved::OpaqueExpression),
        }
    }

    /// Resolve the static type of a receiver expression or qualifier.
    fn resolve_receiver(&self, node: Node<'_>, source: &str) -> ResolveResult<String> {
        match node.kind() {
            "identifier" => {
                let name = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                match self.scope.variables.get(name) {
                    Some(Binding::Typed(declared)) => {
                        return self.resolve_type_text(declared)?.reference();
                    }
                    Some(Binding::Conflicting) => return Err(Unresolved::ConflictingName),
                    None => {}
                }
                if starts_uppercase(name) {
                    // Static member access on a simple type name.
                    return self.resolve_simple_name(name);
                }
                Err(Unresolved::UnknownReceiver)
            }
            "type_identifier" => {
                let name = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                self.resolve_simple_name(name)
            }
            "field_access" | "scoped_identifier" | "scoped_type_identifier" => {
                let text = node_text(&node, source).ok_or(Unresolved::MissingNode)?;
                let last = text.rsplit('.').next().unwrap_or(text);
                if is_name_like(text) && starts_uppercase(last) {
                    self.resolve_dotted_name(text)
                } else {
                    // A value-yielding access like `System.out`; its type is
                    // not recoverable from syntax alone.
                    Err(Unresolved::UnknownReceiver)
                }
            }
            "this" | "super" => Err(Unresolved::UnknownReceiver),
            _ => self.infer_expr(node, source)?.reference(),
        }
    }

    /// Render a parenthesized parameter signature from an argument list.
    fn parameter_signature(&self, args: Node<'_>, source: &str) -> ResolveResult<String> {
        let mut rendered = Vec::new();
        let mut cursor = args.walk();

        for arg in args.named_children(&mut cursor) {
            if matches!(arg.kind(), "line_comment" | "block_comment") {
                continue;
            }
            let inferred = self.infer_expr(arg, source)?;
            rendered.push(inferred.render().to_string());
        }

        Ok(format!("({})", rendered.join(",")))
    }
}

impl Resolver for SyntacticResolver {
    fn resolve_call(&self, node: Node<'_>, source: &str) -> ResolveResult<ResolvedCall> {
        let name_node = node
            .child_by_field_name("name")
            .ok_or(Unresolved::MissingNode)?;
        let name = node_text(&name_node, source).ok_or(Unresolved::MissingNode)?;

        // Bare calls target the enclosing class; always internal, never
        // reported, so resolving them is not worth the machinery.
        let receiver = node
            .child_by_field_name("object")
            .ok_or(Unresolved::UnknownReceiver)?;
        let owner = self.resolve_receiver(receiver, source)?;

        let args = node
            .child_by_field_name("arguments")
            .ok_or(Unresolved::MissingNode)?;
        let params = self.parameter_signature(args, source)?;

        let signature = format!("{owner}.{name}{params}");
        Ok(ResolvedCall { owner, signature })
    }

    fn resolve_constructor(
        &self,
        node: Node<'_>,
        source: &str,
    ) -> ResolveResult<ResolvedConstructor> {
        let ty = node
            .child_by_field_name("type")
            .ok_or(Unresolved::MissingNode)?;
        let owner = self.resolve_type_node(ty, source)?;

        let simple_name = owner
            .rsplit('.')
            .next()
            .unwrap_or(owner.as_str())
            .to_string();

        let args = node
            .child_by_field_name("arguments")
            .ok_or(Unresolved::MissingNode)?;
        let parameter_signature = self.parameter_signature(args, source)?;

        Ok(ResolvedConstructor {
            owner,
            simple_name,
            parameter_signature,
        })
    }

    fn resolve_method_reference(
        &self,
        node: Node<'_>,
        source: &str,
    ) -> ResolveResult<ResolvedCall> {
        let qualifier = node.child(0).ok_or(Unresolved::MissingNode)?;

        let last = node
            .child(node.child_count().saturating_sub(1))
            .ok_or(Unresolved::MissingNode)?;
        // Constructor references (`Type::new`) need a classpath to resolve.
        if last.kind() != "identifier" {
            return Err(Unresolved::OpaqueExpression);
        }
        let name = node_text(&last, source).ok_or(Unresolved::MissingNode)?;

        let owner = self.resolve_receiver(qualifier, source)?;

        // Arity is not syntactically recoverable for a method reference, so
        // the signature carries no parameter list.
        let signature = format!("{owner}.{name}");
        Ok(ResolvedCall { owner, signature })
    }

    fn resolve_member_type(&self, node: Node<'_>, source: &str) -> ResolveResult<ResolvedType> {
        // The field table only describes this file's own fields, so it is
        // only consulted for accesses through `this`. A foreign receiver
        // can carry a same-named field of a different type; guessing from
        // the name alone would invent a usage.
        let receiver = node
            .child_by_field_name("object")
            .ok_or(Unresolved::MissingNode)?;
        if receiver.kind() != "this" {
            return Err(Unresolved::UnknownReceiver);
        }

        let field = node
            .child_by_field_name("field")
            .ok_or(Unresolved::MissingNode)?;
        let name = node_text(&field, source).ok_or(Unresolved::MissingNode)?;

        let declared = match self.scope.fields.get(name) {
            Some(Binding::Typed(declared)) => declared,
            Some(Binding::Conflicting) => return Err(Unresolved::ConflictingName),
            None => return Err(Unresolved::UnknownType),
        };

        match self.resolve_type_text(declared)? {
            InferredType::Reference(fqn) => Ok(ResolvedType::Reference(fqn)),
            InferredType::Primitive(_) => Ok(ResolvedType::Primitive),
        }
    }
}

/// Recursively collect declarations into the file scope.
fn collect_scope(node: Node<'_>, source: &str, scope: &mut FileScope) {
    match node.kind() {
        "package_declaration" => {
            let mut cursor = node.walk();
            for part in node.named_children(&mut cursor) {
                if matches!(part.kind(), "identifier" | "scoped_identifier") {
                    scope.package = node_text(&part, source).map(|s| s.to_string());
                }
            }
        }
        "import_declaration" => collect_import(node, source, scope),
        "local_variable_declaration" | "field_declaration" => {
            collect_declarators(node, source, scope, node.kind() == "field_declaration");
        }
        "formal_parameter" => {
            if let (Some(ty), Some(name)) = (
                node.child_by_field_name("type"),
                node.child_by_field_name("name"),
            ) {
                insert_variable(scope, &name, &ty, source);
            }
        }
        "enhanced_for_statement" => {
            if let (Some(ty), Some(name)) = (
                node.child_by_field_name("type"),
                node.child_by_field_name("name"),
            ) {
                insert_variable(scope, &name, &ty, source);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_scope(child, source, scope);
    }
}

/// Record an import declaration into the scope.
fn collect_import(node: Node<'_>, source: &str, scope: &mut FileScope) {
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();

    // Static imports bring in members, not types.
    if children.iter().any(|c| c.kind() == "static") {
        return;
    }

    let is_wildcard = children.iter().any(|c| c.kind() == "asterisk");
    let name = children
        .iter()
        .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
        .and_then(|c| node_text(c, source));

    let Some(name) = name else { return };

    if is_wildcard {
        scope.wildcard_imports.push(name.to_string());
    } else if let Some(simple) = name.rsplit('.').next() {
        scope.imports.insert(simple.to_string(), name.to_string());
    }
}

/// Record every declarator of a variable or field declaration.
fn collect_declarators(node: Node<'_>, source: &str, scope: &mut FileScope, is_field: bool) {
    let Some(ty) = node.child_by_field_name("type") else {
        return;
    };
    let Some(type_text) = node_text(&ty, source) else {
        return;
    };

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let Some(name_node) = child.child_by_field_name("name") else {
            continue;
        };
        let Some(name) = node_text(&name_node, source) else {
            continue;
        };

        bind(&mut scope.variables, name, type_text);
        if is_field {
            bind(&mut scope.fields, name, type_text);
        }
    }
}

fn insert_variable(scope: &mut FileScope, name: &Node<'_>, ty: &Node<'_>, source: &str) {
    if let (Some(name), Some(ty)) = (node_text(name, source), node_text(ty, source)) {
        bind(&mut scope.variables, name, ty);
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map(|c| c.is_ascii_uppercase()).unwrap_or(false)
}

/// True if the text looks like a dotted Java name (no calls, no indexing).
fn is_name_like(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}
