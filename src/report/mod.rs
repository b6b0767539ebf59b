//! Report rendering.
//!
//! Turns a finished catalogue into the tool's only output artifact: a
//! pretty-printed JSON object whose keys (owning types) and value arrays
//! (signatures) are lexicographically sorted. A pure function of the
//! catalogue's final state; rendering the same catalogue twice is
//! byte-identical.

use crate::catalogue::UsageCatalogue;

/// Render the catalogue as sorted, pretty-printed JSON.
///
/// Ends with exactly one trailing newline; an empty catalogue renders as
/// `{}`. String escaping is delegated to the JSON serializer.
pub fn format(catalogue: &UsageCatalogue) -> String {
    // The catalogue serializes as an ordered map of ordered sets, so key
    // and array order fall out of the container types.
    let mut text = serde_json::to_string_pretty(catalogue)
        .unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Formatting Tests =====

    #[test]
    fn test_empty_catalogue_renders_empty_object() {
        let catalogue = UsageCatalogue::new();
        assert_eq!(format(&catalogue), "{}\n");
    }

    #[test]
    fn test_keys_and_signatures_sorted() {
        let mut catalogue = UsageCatalogue::new();
        catalogue.record("org.zeta.Z", "org.zeta.Z.b()");
        catalogue.record("org.alpha.A", "org.alpha.A.x()");
        catalogue.record("org.zeta.Z", "org.zeta.Z.a()");

        let text = format(&catalogue);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        let keys: Vec<_> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["org.alpha.A", "org.zeta.Z"]);

        let sigs: Vec<_> = parsed["org.zeta.Z"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(sigs, vec!["org.zeta.Z.a()", "org.zeta.Z.b()"]);
    }

    #[test]
    fn test_strings_are_escaped() {
        let mut catalogue = UsageCatalogue::new();
        catalogue.record("org.lib.T", r#"org.lib.T.parse("quoted\path")"#);

        let text = format(&catalogue);

        // Must survive a JSON round-trip intact.
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed["org.lib.T"][0].as_str().unwrap(),
            r#"org.lib.T.parse("quoted\path")"#
        );
    }

    #[test]
    fn test_single_trailing_newline() {
        let mut catalogue = UsageCatalogue::new();
        catalogue.record("org.lib.T", "org.lib.T.a()");

        let text = format(&catalogue);
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_format_is_deterministic() {
        let mut a = UsageCatalogue::new();
        a.record("org.lib.B", "org.lib.B.two()");
        a.record("org.lib.A", "org.lib.A.one()");

        let mut b = UsageCatalogue::new();
        b.record("org.lib.A", "org.lib.A.one()");
        b.record("org.lib.B", "org.lib.B.two()");

        assert_eq!(format(&a), format(&b));
    }
}
