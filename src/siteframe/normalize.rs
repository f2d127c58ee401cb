//! Payload normalization.
//!
//! Website records sometimes hold the payload in its JSON-escaped form
//! (`\"`, `\n` as literal two-character sequences). Such payloads are
//! detected by marker sequences and unescaped before parsing; everything
//! else passes through untouched.

/// Lowercased sequences that only appear in an escaped payload.
const ESCAPE_MARKERS: &[&str] = &[r#"\"siteframe"#, r"\n<!--siteframe", r"\/siteframe"];

/// Escape sequences and their replacements, applied in this order.
///
/// `\r\n` must run before its single-character parts, and `\\` last so it
/// cannot produce a backslash that a later rule would consume.
const UNESCAPES: &[(&str, &str)] = &[
    (r"\r\n", "\n"),
    (r"\n", "\n"),
    (r"\r", "\r"),
    (r"\t", "\t"),
    (r#"\""#, "\""),
    (r"\\", "\\"),
];

/// Whether the payload looks like an escaped encoding.
pub fn is_escaped(payload: &str) -> bool {
    if !payload.contains('\\') {
        return false;
    }
    let lowered = payload.to_lowercase();
    ESCAPE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Unescape an escaped payload, or return it unchanged.
pub fn normalize(payload: &str) -> String {
    if !is_escaped(payload) {
        return payload.to_owned();
    }
    UNESCAPES
        .iter()
        .fold(payload.to_owned(), |acc, (from, to)| acc.replace(from, to))
}

/// [`normalize`] for a nullable field; `None` is the empty payload.
pub fn normalize_opt(payload: Option<&str>) -> String {
    payload.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_payload_unchanged() {
        let input = "<!--siteframe:part type=\"header\"-->\nHELLO\n<!--siteframe:/part-->";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_no_backslash_never_escaped() {
        let input = "\"siteframe and n<!--siteframe with /siteframe";
        assert!(!is_escaped(input));
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_backslash_without_marker_unchanged() {
        let input = r"<div>C:\path\to\file</div>";
        assert!(!is_escaped(input));
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_escaped_json_fragment() {
        let input = r#"{"payload":"<!--siteframe:part type=\"header\"-->\nHi\n<!--siteframe:/part-->"}"#;
        assert!(is_escaped(input));
        assert_eq!(
            normalize(input),
            "{\"payload\":\"<!--siteframe:part type=\"header\"-->\nHi\n<!--siteframe:/part-->\"}"
        );
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert!(is_escaped(r#"x=\"SiteFrame:part"#));
        assert!(!is_escaped(r#"<!--SiteFrame:part type=\"X\"-->"#));
        assert!(is_escaped(r"a\n<!--SITEFRAME:page-->"));
        assert!(is_escaped(r"<!--\/SiteFrame:part-->"));
    }

    #[test]
    fn test_unescape_order() {
        let input = r#"\"siteframe\r\nA\rB\tC\\D"#;
        assert_eq!(normalize(input), "\"siteframe\nA\rB\tC\\D");
    }

    #[test]
    fn test_crlf_becomes_single_newline() {
        let input = r"x\r\n<!--siteframe:part-->";
        assert_eq!(normalize(input), "x\n<!--siteframe:part-->");
    }

    #[test]
    fn test_normalize_is_idempotent_on_payloads() {
        let samples = [
            "",
            "plain text",
            r"windows\path",
            r#"<!--siteframe:page title=\"Home\"-->\n    <!--siteframe:block type=\"html\"-->\n<p>x</p>\n    <!--siteframe:/block-->\n<!--siteframe:/page-->"#,
            r#"{"payload":"<!--siteframe:part type=\"header\"-->\nHi\n<!--siteframe:/part-->"}"#,
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample: {sample}");
        }
    }

    #[test]
    fn test_normalize_opt_none_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("abc")), "abc");
    }
}
