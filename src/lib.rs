//! javascope - external library usage analyzer for Java projects
//!
//! This crate statically analyzes a Java project and catalogues, per
//! external type, every distinct call, construction, method reference, and
//! field access made against it. The result is a deterministic, sorted
//! JSON report suitable for dependency auditing and migration planning.

pub mod analyzer;
pub mod catalogue;
pub mod classify;
pub mod parser;
pub mod project;
pub mod report;
pub mod resolve;
pub mod visitor;
