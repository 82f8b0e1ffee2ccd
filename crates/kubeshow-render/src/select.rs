//! Resolve user selectors against rendered document paths

use glob::{MatchOptions, Pattern};

use crate::error::{RenderError, Result};
use crate::order::OrderedDocumentSet;
use crate::source::to_canonical;
use crate::split::SplitDocument;

/// `*` and `?` never match `/`, mirroring shell globbing on paths
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A path or glob over normalized document paths
#[derive(Debug, Clone)]
pub struct Selector {
    raw: String,
    pattern: Pattern,
}

impl Selector {
    /// Compile a user-supplied selector
    ///
    /// Platform separators are converted to `/`, runs of `*` collapse to
    /// a single `*` (so `**` is not recursive), `[^...]` negates a class and
    /// `\` escapes the next character.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |message: &str| RenderError::InvalidSelector {
            pattern: raw.to_string(),
            message: message.to_string(),
        };

        let translated = to_glob_syntax(&to_canonical(raw)).map_err(invalid)?;
        let pattern = Pattern::new(&translated).map_err(|e| invalid(e.msg))?;

        Ok(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    /// The selector as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches_with(path, MATCH_OPTIONS)
    }

    /// Documents this selector matches, in set order
    pub fn matching<'a>(&self, docs: &'a OrderedDocumentSet) -> Vec<&'a SplitDocument> {
        docs.iter()
            .filter(|doc| match doc.path() {
                Some(path) => self.matches(path),
                None => {
                    tracing::debug!(key = %doc.key(), "document without source path skipped");
                    false
                }
            })
            .collect()
    }
}

/// Select documents for each pattern, in pattern order
///
/// Fails on the first pattern that matches nothing; later patterns are not
/// evaluated. A document matched by several patterns appears once per
/// pattern.
pub fn select<'a, S: AsRef<str>>(
    docs: &'a OrderedDocumentSet,
    patterns: &[S],
) -> Result<Vec<&'a SplitDocument>> {
    let mut selected = Vec::new();

    for raw in patterns {
        let selector = Selector::parse(raw.as_ref())?;
        let matched = selector.matching(docs);
        if matched.is_empty() {
            return Err(RenderError::SelectorNotFound {
                pattern: selector.as_str().to_string(),
            });
        }
        tracing::debug!(pattern = selector.as_str(), count = matched.len(), "selector matched");
        selected.extend(matched);
    }

    Ok(selected)
}

/// Rewrite a shell-style selector into `glob` pattern syntax
///
/// Runs of `*` collapse to one, a class opened with `[^` becomes `[!`, and a
/// backslash escape of a metacharacter outside a class becomes a
/// one-character class (`\*` -> `[*]`).
fn to_glob_syntax(pattern: &str) -> std::result::Result<String, &'static str> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    let mut class_start = false;
    let mut class_len = 0;
    let mut prev_star = false;

    while let Some(c) = chars.next() {
        if in_class {
            match c {
                '^' | '!' if class_start => out.push('!'),
                // `]` right after `[` or `[^` is a literal member
                ']' if class_len > 0 => {
                    in_class = false;
                    out.push(']');
                }
                '\\' => {
                    out.push(chars.next().ok_or("trailing backslash")?);
                    class_len += 1;
                }
                _ => {
                    out.push(c);
                    class_len += 1;
                }
            }
            class_start = false;
            continue;
        }

        match c {
            '*' if prev_star => continue,
            '\\' => match chars.next().ok_or("trailing backslash")? {
                escaped @ ('*' | '?' | '[' | ']') => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                escaped => out.push(escaped),
            },
            '[' => {
                in_class = true;
                class_start = true;
                class_len = 0;
                out.push(c);
            }
            _ => out.push(c),
        }
        prev_star = c == '*';
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::ManifestBlob;
    use crate::split::split_manifests;

    fn set(paths: &[&str]) -> OrderedDocumentSet {
        let text: String = paths
            .iter()
            .map(|p| format!("---\n# Source: mychart/{p}\nkind: ConfigMap\n"))
            .collect();
        OrderedDocumentSet::from_manifests(split_manifests(&ManifestBlob::from_text(text)))
    }

    fn selected_paths(docs: &[&SplitDocument]) -> Vec<String> {
        docs.iter().map(|d| d.path().unwrap_or("").to_string()).collect()
    }

    #[test]
    fn test_exact_path() {
        let docs = set(&["templates/deployment.yaml", "templates/deployment.yaml.bak", "templates/svc.yaml"]);
        let sel = select(&docs, &["templates/deployment.yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/deployment.yaml"]);
    }

    #[test]
    fn test_glob_single_segment() {
        let docs = set(&[
            "templates/a.yaml",
            "templates/b.yaml",
            "templates/sub/c.yaml",
            "templates/notes.txt",
        ]);
        let sel = select(&docs, &["templates/*.yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/a.yaml", "templates/b.yaml"]);
    }

    #[test]
    fn test_double_star_is_not_recursive() {
        let docs = set(&["templates/a.yaml", "templates/sub/c.yaml"]);
        let sel = select(&docs, &["templates/**.yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/a.yaml"]);
    }

    #[test]
    fn test_question_mark_and_class() {
        let docs = set(&["templates/a1.yaml", "templates/a2.yaml", "templates/b1.yaml"]);
        let sel = select(&docs, &["templates/a?.yaml"]).unwrap();
        assert_eq!(sel.len(), 2);
        let sel = select(&docs, &["templates/[ab]1.yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/a1.yaml", "templates/b1.yaml"]);
    }

    #[test]
    fn test_missing_selector_fails() {
        let docs = set(&["templates/a.yaml"]);
        let err = select(&docs, &["templates/missing.yaml"]).unwrap_err();
        match err {
            RenderError::SelectorNotFound { pattern } => {
                assert_eq!(pattern, "templates/missing.yaml")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fail_fast_reports_first_missing_pattern() {
        let docs = set(&["templates/a.yaml"]);
        let err = select(&docs, &["templates/a.yaml", "templates/x.yaml", "templates/y.yaml"])
            .unwrap_err();
        assert!(err.to_string().contains("templates/x.yaml"));
    }

    #[test]
    fn test_duplicates_are_preserved_in_pattern_order() {
        let docs = set(&["templates/a.yaml", "templates/b.yaml"]);
        let sel = select(&docs, &["templates/b.yaml", "templates/*.yaml"]).unwrap();
        assert_eq!(
            selected_paths(&sel),
            vec!["templates/b.yaml", "templates/a.yaml", "templates/b.yaml"]
        );
    }

    #[test]
    fn test_chart_prefix_is_not_part_of_the_path() {
        let docs = set(&["templates/a.yaml"]);
        assert!(select(&docs, &["mychart/templates/a.yaml"]).is_err());
    }

    #[test]
    fn test_malformed_documents_never_match() {
        let text = "---\n# Source: broken\nkind: A\n---\n# Source: c/templates/ok.yaml\nkind: B\n";
        let docs = OrderedDocumentSet::from_manifests(split_manifests(&ManifestBlob::from_text(text)));
        assert_eq!(docs.malformed().count(), 1);
        let sel = select(&docs, &["*"]).unwrap_err();
        assert!(matches!(sel, RenderError::SelectorNotFound { .. }));
        assert_eq!(select(&docs, &["templates/*"]).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_glob() {
        let docs = set(&["templates/a.yaml"]);
        let err = select(&docs, &["templates/[a.yaml"]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSelector { .. }));
    }

    #[test]
    fn test_no_patterns_selects_nothing() {
        let docs = set(&["templates/a.yaml"]);
        let none: [&str; 0] = [];
        assert!(select(&docs, &none).unwrap().is_empty());
    }

    #[test]
    fn test_negated_class_with_caret() {
        let docs = set(&["templates/a.yaml", "templates/b.yaml"]);
        let sel = select(&docs, &["templates/[^a].yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/b.yaml"]);
    }

    #[test]
    fn test_escaped_star_is_literal() {
        let docs = set(&["templates/a*.yaml", "templates/ab.yaml"]);
        let sel = select(&docs, &[r"templates/a\*.yaml"]).unwrap();
        assert_eq!(selected_paths(&sel), vec!["templates/a*.yaml"]);
    }

    #[test]
    fn test_trailing_backslash_is_invalid() {
        let docs = set(&["templates/a.yaml"]);
        let err = select(&docs, &[r"templates/a\"]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSelector { .. }));
    }

    #[test]
    fn test_to_glob_syntax() {
        assert_eq!(to_glob_syntax("a/**/b").unwrap(), "a/*/b");
        assert_eq!(to_glob_syntax("***.yaml").unwrap(), "*.yaml");
        assert_eq!(to_glob_syntax("[*][*]x").unwrap(), "[*][*]x");
        assert_eq!(to_glob_syntax("[]*]**").unwrap(), "[]*]*");
        assert_eq!(to_glob_syntax("[^]]**").unwrap(), "[!]]*");
        assert_eq!(to_glob_syntax("[a^b]").unwrap(), "[a^b]");
        assert_eq!(to_glob_syntax(r"x\?y\[z\]").unwrap(), "x[?]y[[]z[]]");
        assert_eq!(to_glob_syntax(r"\a\*\*").unwrap(), "a[*][*]");
        assert_eq!(to_glob_syntax(r"[\]a]").unwrap(), "[]a]");
    }
}
