//! Analysis orchestration.
//!
//! Runs the full pipeline for one project: validate the root, locate
//! sources, collect internal package prefixes (a complete pass of its own,
//! before any classification), then traverse files in parallel and merge
//! the per-worker catalogues. Only a bad project root is fatal; everything
//! else degrades to warnings or silently skipped nodes.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::catalogue::UsageCatalogue;
use crate::classify::{collect_internal_prefixes, PackagePrefixes};
use crate::parser::JavaParser;
use crate::project::{self, ProjectError, SourceFile};
use crate::report;
use crate::resolve::SyntacticResolver;
use crate::visitor::UsageVisitor;

/// Errors that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Result type for analysis runs.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// A non-fatal, per-file problem encountered during the run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Warning {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// The outcome of one analysis run.
#[derive(Debug, Default)]
pub struct Analysis {
    /// External usages, aggregated and sorted.
    pub catalogue: UsageCatalogue,
    /// Per-file problems; the run completed despite them.
    pub warnings: Vec<Warning>,
    /// Number of source files discovered (including ones that later
    /// failed to read or parse).
    pub files_scanned: usize,
}

impl Analysis {
    /// Render the final report text.
    pub fn to_report(&self) -> String {
        report::format(&self.catalogue)
    }
}

/// Analyze the project rooted at `project_root`.
///
/// Never fails for "no files" or "no usages" — both produce an empty
/// report. The only fatal condition is a missing or unreadable root.
pub fn analyze(project_root: &Path) -> AnalyzeResult<Analysis> {
    let root = project::canonical_root(project_root)?;
    let source_root = project::find_source_root(&root);
    let paths = project::collect_java_files(&source_root);

    let mut warnings = Vec::new();
    let mut files = Vec::with_capacity(paths.len());
    let files_scanned = paths.len();

    for path in paths {
        match fs::read_to_string(&path) {
            Ok(content) => files.push(SourceFile { path, content }),
            Err(e) => warnings.push(Warning {
                path,
                message: format!("could not read file: {e}"),
            }),
        }
    }

    // Phase barrier: the prefix set must be complete before any usage is
    // classified, so this pass runs to the end first.
    let prefixes = collect_internal_prefixes(&files);

    let (catalogue, parse_warnings) = files
        .par_iter()
        .fold(
            || (UsageCatalogue::new(), Vec::new()),
            |(mut local, mut warns), file| {
                if let Err(w) = visit_file(file, &prefixes, &mut local) {
                    warns.push(w);
                }
                (local, warns)
            },
        )
        .reduce(
            || (UsageCatalogue::new(), Vec::new()),
            |(mut catalogue, mut warns), (other, other_warns)| {
                catalogue.merge(other);
                warns.extend(other_warns);
                (catalogue, warns)
            },
        );

    warnings.extend(parse_warnings);
    // Worker scheduling must not leak into the output.
    warnings.sort();

    Ok(Analysis {
        catalogue,
        warnings,
        files_scanned,
    })
}

/// Parse and traverse one file into a local catalogue.
fn visit_file(
    file: &SourceFile,
    prefixes: &PackagePrefixes,
    catalogue: &mut UsageCatalogue,
) -> Result<(), Warning> {
    let mut parser = JavaParser::new().map_err(|e| Warning {
        path: file.path.clone(),
        message: e.to_string(),
    })?;

    let tree = parser.parse(&file.content).map_err(|e| Warning {
        path: file.path.clone(),
        message: e.to_string(),
    })?;

    let resolver = SyntacticResolver::new(&tree, &file.content);
    UsageVisitor::new(&resolver, prefixes).visit(&tree, &file.content, catalogue);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const LIST_SCENARIO: &str = r#"
package app;

import com.extlib.util.ArrayList;
import com.extlib.util.List;

class Main {
    void run() {
        List list = new ArrayList();
        list.add("x");
    }
}
"#;

    // ===== Scenario Tests =====

    #[test]
    fn test_external_construction_and_call() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "src/main/java/app/Main.java", LIST_SCENARIO);

        let analysis = analyze(dir.path()).unwrap();

        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.files_scanned, 1);

        let ctor_sigs = analysis
            .catalogue
            .signatures("com.extlib.util.ArrayList")
            .unwrap();
        assert!(ctor_sigs.contains("com.extlib.util.ArrayList.ArrayList()"));

        let call_sigs = analysis.catalogue.signatures("com.extlib.util.List").unwrap();
        assert!(call_sigs.contains("com.extlib.util.List.add(java.lang.String)"));
    }

    #[test]
    fn test_purely_internal_project_yields_empty_report() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "src/main/java/app/Helper.java",
            "package app;\npublic class Helper { public static void init() {} }\n",
        );
        write_file(
            dir.path(),
            "src/main/java/app/Main.java",
            "package app;\nclass Main { void run() { Helper.init(); new Helper(); } }\n",
        );

        let analysis = analyze(dir.path()).unwrap();

        assert!(analysis.catalogue.is_empty());
        assert_eq!(analysis.to_report(), "{}\n");
    }

    #[test]
    fn test_platform_usage_is_excluded() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "src/Main.java",
            r#"
package app;
import java.util.ArrayList;
class Main { void run() { new ArrayList<>(); } }
"#,
        );

        let analysis = analyze(dir.path()).unwrap();
        assert!(analysis.catalogue.is_empty());
    }

    #[test]
    fn test_field_access_on_external_type() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "src/Main.java",
            r#"
package app;
import org.lib.Settings;
class Main {
    Settings settings;
    void run() { Object s = this.settings; }
}
"#,
        );

        let analysis = analyze(dir.path()).unwrap();

        let sigs = analysis.catalogue.signatures("org.lib.Settings").unwrap();
        assert!(sigs.contains("org.lib.Settings.settings"));
        // No parameter list on a member access.
        assert!(sigs.iter().all(|s| !s.contains('(')));
    }

    // ===== Containment Tests =====

    #[test]
    fn test_partial_failure_containment() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "src/Broken.java", "class Broken { void m( }");
        for i in 0..9 {
            write_file(
                dir.path(),
                &format!("src/Ok{i}.java"),
                &format!(
                    "package app;\nclass Ok{i} {{ void run() {{ org.lib.Util.step{i}(); }} }}\n"
                ),
            );
        }

        let analysis = analyze(dir.path()).unwrap();

        assert_eq!(analysis.files_scanned, 10);
        assert_eq!(analysis.warnings.len(), 1);
        assert!(analysis.warnings[0].path.ends_with("Broken.java"));
        assert_eq!(analysis.catalogue.signatures("org.lib.Util").unwrap().len(), 9);
    }

    #[test]
    fn test_empty_project_is_not_an_error() {
        let dir = TempDir::new().unwrap();

        let analysis = analyze(dir.path()).unwrap();

        assert_eq!(analysis.files_scanned, 0);
        assert_eq!(analysis.to_report(), "{}\n");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");

        assert!(analyze(&missing).is_err());
    }

    // ===== Determinism Tests =====

    #[test]
    fn test_analyze_twice_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "src/main/java/app/Main.java", LIST_SCENARIO);
        for i in 0..6 {
            write_file(
                dir.path(),
                &format!("src/main/java/app/F{i}.java"),
                &format!(
                    "package app;\nclass F{i} {{ void run() {{ org.lib.Util.step{i}(); new org.lib.Widget({i}); }} }}\n"
                ),
            );
        }

        let first = analyze(dir.path()).unwrap().to_report();
        let second = analyze(dir.path()).unwrap().to_report();

        assert_eq!(first, second);
    }
}
