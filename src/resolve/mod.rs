//! Symbol resolution interfaces.
//!
//! The usage visitor never inspects declarations itself; it asks a
//! [`Resolver`] to turn a syntax node into an owning type and signature.
//! "Could not resolve" is a normal, typed outcome here — most Java
//! expressions are unresolvable without a full classpath, and per-node
//! failures are expected to be frequent and silently skipped.

pub mod syntactic;

pub use syntactic::SyntacticResolver;

use thiserror::Error;
use tree_sitter::Node;

/// Why a single occurrence could not be resolved.
///
/// Never fatal and never logged; the occurrence is simply not recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    #[error("type name could not be resolved")]
    UnknownType,

    #[error("receiver type could not be determined")]
    UnknownReceiver,

    #[error("expression type is not recoverable from syntax")]
    OpaqueExpression,

    #[error("name is declared with conflicting types in this file")]
    ConflictingName,

    #[error("syntax node is missing an expected child")]
    MissingNode,
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, Unresolved>;

/// A method call or method reference resolved to its declaring type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    /// Fully-qualified name of the declaring type.
    pub owner: String,
    /// Canonical declaring-type-qualified signature.
    pub signature: String,
}

/// A constructor invocation resolved to the constructed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConstructor {
    /// Fully-qualified name of the constructed type.
    pub owner: String,
    /// Simple name of the constructed type.
    pub simple_name: String,
    /// Parenthesized parameter list, e.g. `()` or `(java.lang.String)`.
    pub parameter_signature: String,
}

/// The declared type of an accessed member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// A reference type with its fully-qualified name.
    Reference(String),
    /// A primitive; member accesses of primitive type are never reported.
    Primitive,
}

impl ResolvedType {
    pub fn is_reference(&self) -> bool {
        matches!(self, ResolvedType::Reference(_))
    }

    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            ResolvedType::Reference(name) => Some(name),
            ResolvedType::Primitive => None,
        }
    }
}

/// Resolution capability consumed by the usage visitor.
///
/// Implementations receive the syntax node for one occurrence plus the file
/// source. The shipped implementation is [`SyntacticResolver`]; a
/// classpath-backed solver could be dropped in without touching traversal.
pub trait Resolver {
    /// Resolve a `method_invocation` node to its declaring type and
    /// qualified signature.
    fn resolve_call(&self, node: Node<'_>, source: &str) -> ResolveResult<ResolvedCall>;

    /// Resolve an `object_creation_expression` node to the constructed type.
    fn resolve_constructor(
        &self,
        node: Node<'_>,
        source: &str,
    ) -> ResolveResult<ResolvedConstructor>;

    /// Resolve a `method_reference` node to its declaring type and signature.
    ///
    /// Implementations without classpath access cannot recover a method
    /// reference's arity, so the returned signature may carry no parameter
    /// list. Such a signature is shape-identical to a member-access
    /// signature (`owner.name`); consumers that need to tell the two apart
    /// should key off the presence of parentheses.
    fn resolve_method_reference(&self, node: Node<'_>, source: &str)
        -> ResolveResult<ResolvedCall>;

    /// Resolve a `field_access` node to the accessed member's declared type.
    fn resolve_member_type(&self, node: Node<'_>, source: &str) -> ResolveResult<ResolvedType>;
}
