//! Usage extraction traversal.
//!
//! Walks a parsed file's syntax tree once, routing the four usage shapes —
//! method call, object construction, method reference, field access — to
//! their handlers. Every resolved occurrence passes through the external
//! classification gate exactly once; occurrences the resolver cannot handle
//! are dropped without a trace.

use tree_sitter::{Node, Tree, TreeCursor};

use crate::catalogue::UsageCatalogue;
use crate::classify::{is_external, PackagePrefixes};
use crate::parser::node_text;
use crate::resolve::{ResolvedType, Resolver};

/// The syntactic shapes a usage can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UsageShape {
    Call,
    Construction,
    MethodReference,
    FieldAccess,
}

impl UsageShape {
    /// Map a syntax-node kind to a usage shape, if it is one.
    fn of(kind: &str) -> Option<Self> {
        match kind {
            "method_invocation" => Some(UsageShape::Call),
            "object_creation_expression" => Some(UsageShape::Construction),
            "method_reference" => Some(UsageShape::MethodReference),
            "field_access" => Some(UsageShape::FieldAccess),
            _ => None,
        }
    }
}

/// Traverses one file and records external usages into a catalogue.
pub struct UsageVisitor<'a> {
    resolver: &'a dyn Resolver,
    prefixes: &'a PackagePrefixes,
}

impl<'a> UsageVisitor<'a> {
    pub fn new(resolver: &'a dyn Resolver, prefixes: &'a PackagePrefixes) -> Self {
        Self { resolver, prefixes }
    }

    /// Visit every node of the tree, recording resolved external usages.
    pub fn visit(&self, tree: &Tree, source: &str, catalogue: &mut UsageCatalogue) {
        let mut cursor = tree.root_node().walk();
        self.visit_node(&mut cursor, source, catalogue);
    }

    fn visit_node(&self, cursor: &mut TreeCursor, source: &str, catalogue: &mut UsageCatalogue) {
        let node = cursor.node();

        if let Some(shape) = UsageShape::of(node.kind()) {
            self.handle(shape, node, source, catalogue);
        }

        // Children are visited unconditionally: arguments and receivers can
        // contain further usages of their own.
        if cursor.goto_first_child() {
            loop {
                self.visit_node(cursor, source, catalogue);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn handle(
        &self,
        shape: UsageShape,
        node: Node<'_>,
        source: &str,
        catalogue: &mut UsageCatalogue,
    ) {
        match shape {
            UsageShape::Call => self.on_call(node, source, catalogue),
            UsageShape::Construction => self.on_construction(node, source, catalogue),
            UsageShape::MethodReference => self.on_method_reference(node, source, catalogue),
            UsageShape::FieldAccess => self.on_field_access(node, source, catalogue),
        }
    }

    fn on_call(&self, node: Node<'_>, source: &str, catalogue: &mut UsageCatalogue) {
        let Ok(call) = self.resolver.resolve_call(node, source) else {
            return;
        };
        self.record_external(&call.owner, &call.signature, catalogue);
    }

    fn on_construction(&self, node: Node<'_>, source: &str, catalogue: &mut UsageCatalogue) {
        let Ok(ctor) = self.resolver.resolve_constructor(node, source) else {
            return;
        };
        let signature = format!(
            "{}.{}{}",
            ctor.owner, ctor.simple_name, ctor.parameter_signature
        );
        self.record_external(&ctor.owner, &signature, catalogue);
    }

    fn on_method_reference(&self, node: Node<'_>, source: &str, catalogue: &mut UsageCatalogue) {
        let Ok(call) = self.resolver.resolve_method_reference(node, source) else {
            return;
        };
        self.record_external(&call.owner, &call.signature, catalogue);
    }

    fn on_field_access(&self, node: Node<'_>, source: &str, catalogue: &mut UsageCatalogue) {
        let Ok(resolved) = self.resolver.resolve_member_type(node, source) else {
            return;
        };
        let ResolvedType::Reference(owner) = resolved else {
            return;
        };
        let Some(field) = node
            .child_by_field_name("field")
            .and_then(|f| node_text(&f, source))
        else {
            return;
        };

        let signature = format!("{owner}.{field}");
        self.record_external(&owner, &signature, catalogue);
    }

    /// The single gate: only external owners reach the catalogue.
    fn record_external(&self, owner: &str, signature: &str, catalogue: &mut UsageCatalogue) {
        if is_external(owner, self.prefixes) {
            catalogue.record(owner, signature);
        }
    }
}
