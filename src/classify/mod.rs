//! Internal/external type classification.
//!
//! A project's own code is identified by the first one and two segments of
//! each declared package, collected in a dedicated pass before any usage is
//! classified. The short-prefix match is deliberately coarse: it tolerates
//! internal sub-packages without build metadata, at the cost of occasionally
//! absorbing an external library that shares a top-level segment.

use std::collections::BTreeSet;

use crate::parser::{declared_package, JavaParser};
use crate::project::SourceFile;

/// Namespace families that belong to the Java platform, never reported.
const PLATFORM_PREFIXES: &[&str] = &["java.", "javax.", "jakarta.", "sun.", "com.sun."];

/// The set of package prefixes owned by the analyzed project.
///
/// Built once per run, read-only during traversal.
#[derive(Debug, Clone, Default)]
pub struct PackagePrefixes {
    prefixes: BTreeSet<String>,
}

impl PackagePrefixes {
    /// Create an empty prefix set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared package: records its first segment, and the
    /// first two segments joined, when present.
    pub fn insert_package(&mut self, package: &str) {
        let mut segments = package.split('.');

        if let Some(first) = segments.next().filter(|s| !s.is_empty()) {
            self.prefixes.insert(first.to_string());

            if let Some(second) = segments.next().filter(|s| !s.is_empty()) {
                self.prefixes.insert(format!("{first}.{second}"));
            }
        }
    }

    /// True if a qualified name falls under any recorded prefix.
    pub fn covers(&self, qualified_name: &str) -> bool {
        self.prefixes
            .iter()
            .any(|p| qualified_name.starts_with(&format!("{p}.")))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }
}

/// Collect internal package prefixes from every discovered source file.
///
/// Files that fail to parse contribute nothing and are skipped silently;
/// this pass needs declarations only, not resolvable symbols.
pub fn collect_internal_prefixes(files: &[SourceFile]) -> PackagePrefixes {
    let mut prefixes = PackagePrefixes::new();

    let mut parser = match JavaParser::new() {
        Ok(p) => p,
        Err(_) => return prefixes,
    };

    for file in files {
        let tree = match parser.parse(&file.content) {
            Ok(t) => t,
            Err(_) => continue,
        };

        if let Some(package) = declared_package(&tree, &file.content) {
            prefixes.insert_package(&package);
        }
    }

    prefixes
}

/// Classify a fully-qualified type name as external to the project.
///
/// The single gate controlling what appears in the report: empty names,
/// platform types, and anything under an internal prefix are excluded.
pub fn is_external(qualified_name: &str, prefixes: &PackagePrefixes) -> bool {
    if qualified_name.trim().is_empty() {
        return false;
    }

    if PLATFORM_PREFIXES.iter().any(|p| qualified_name.starts_with(p)) {
        return false;
    }

    !prefixes.covers(qualified_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn prefixes_of(packages: &[&str]) -> PackagePrefixes {
        let mut p = PackagePrefixes::new();
        for pkg in packages {
            p.insert_package(pkg);
        }
        p
    }

    // ===== Prefix Collection Tests =====

    #[test]
    fn test_insert_package_records_one_and_two_segments() {
        let p = prefixes_of(&["com.example.app.service"]);

        assert_eq!(p.len(), 2);
        assert!(p.covers("com.anything"));
        assert!(p.covers("com.example.deep.Thing"));
    }

    #[test]
    fn test_insert_single_segment_package() {
        let p = prefixes_of(&["app"]);

        assert_eq!(p.len(), 1);
        assert!(p.covers("app.Main"));
        assert!(!p.covers("application.Main"));
    }

    #[test]
    fn test_collect_internal_prefixes_from_sources() {
        let files = vec![
            SourceFile {
                path: PathBuf::from("A.java"),
                content: "package com.example.app;\nclass A {}\n".to_string(),
            },
            SourceFile {
                path: PathBuf::from("B.java"),
                content: "package org.acme;\nclass B {}\n".to_string(),
            },
            SourceFile {
                path: PathBuf::from("Broken.java"),
                content: "package ???;\n".to_string(),
            },
        ];

        let p = collect_internal_prefixes(&files);

        // com + com.example + org + org.acme; the broken file is skipped.
        assert_eq!(p.len(), 4);
        assert!(p.covers("com.example.app.Thing"));
        assert!(p.covers("org.acme.util.Thing"));
    }

    // ===== Classification Tests =====

    #[test]
    fn test_empty_name_is_not_external() {
        let p = prefixes_of(&["com.example"]);
        assert!(!is_external("", &p));
        assert!(!is_external("   ", &p));
    }

    #[test]
    fn test_platform_types_are_not_external() {
        let p = PackagePrefixes::new();
        assert!(!is_external("java.util.ArrayList", &p));
        assert!(!is_external("javax.swing.JFrame", &p));
        assert!(!is_external("jakarta.servlet.Servlet", &p));
        assert!(!is_external("sun.misc.Unsafe", &p));
        assert!(!is_external("com.sun.net.httpserver.HttpServer", &p));
    }

    #[test]
    fn test_internal_prefix_is_not_external() {
        let p = prefixes_of(&["com.example.app"]);
        assert!(!is_external("com.example.other.Thing", &p));
        assert!(!is_external("com.whatever.Thing", &p));
    }

    #[test]
    fn test_prefix_match_requires_separator() {
        let p = prefixes_of(&["app"]);
        // "application" shares characters but not a segment boundary.
        assert!(is_external("application.lib.Thing", &p));
    }

    #[test]
    fn test_library_type_is_external() {
        let p = prefixes_of(&["com.example.app"]);
        assert!(is_external("org.slf4j.Logger", &p));
        assert!(is_external("io.vavr.collection.List", &p));
    }
}
