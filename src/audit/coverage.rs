//! Translation coverage of each locale relative to the default locale.

use crate::audit::AuditIssue;
use crate::core::{Catalog, NodeKind, TranslationTree, resolve};

/// Report gaps (default leaves a locale cannot serve itself), shape drift
/// (structured leaves of another kind than the default's) and orphans
/// (leaves only a non-default locale has) for every non-default locale.
///
/// A locale without any tree reports every default leaf as a gap.
pub fn check_coverage(catalog: &Catalog) -> Vec<AuditIssue> {
    let default_tree = catalog.default_tree();
    let default_leaves = default_tree.leaves();
    let empty = TranslationTree::default();
    let mut issues = Vec::new();

    for locale in catalog.locales().non_default() {
        let tree = catalog.tree(locale).unwrap_or(&empty);

        for leaf in &default_leaves {
            let Some(value) = resolve(tree, &leaf.path) else {
                issues.push(AuditIssue::FallbackGap {
                    locale: locale.to_string(),
                    key: leaf.path.clone(),
                });
                continue;
            };
            let found = NodeKind::of(value);
            if found == leaf.kind {
                continue;
            }
            // A string lookup falls back past a non-string; a structured
            // lookup hands back whatever the locale has.
            if leaf.kind == NodeKind::String {
                issues.push(AuditIssue::FallbackGap {
                    locale: locale.to_string(),
                    key: leaf.path.clone(),
                });
            } else {
                issues.push(AuditIssue::ShapeDrift {
                    locale: locale.to_string(),
                    key: leaf.path.clone(),
                    expected: leaf.kind,
                    found,
                });
            }
        }

        for leaf in tree.leaves() {
            if resolve(default_tree, &leaf.path).is_none() {
                issues.push(AuditIssue::OrphanKey {
                    locale: locale.to_string(),
                    key: leaf.path,
                });
            }
        }
    }

    issues.sort();
    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::audit::Rule;
    use crate::core::SupportedLocales;

    fn tree(value: serde_json::Value) -> TranslationTree {
        TranslationTree::from_value(value).unwrap()
    }

    #[test]
    fn test_coverage_gaps_and_orphans() {
        let nl = tree(json!({
            "hero": {
                "title": "Welkom",
                "faqTitle": "Veelgestelde vragen",
                "faqs": [{"question": "Q", "answer": "A"}]
            }
        }));
        let en = tree(json!({
            "hero": {
                "title": "Welcome",
                "faqs": [{"question": "Q", "answer": "A"}],
                "tagline": "Only in English"
            }
        }));
        let catalog = Catalog::from_trees(
            SupportedLocales::new(["nl", "en"], "nl").unwrap(),
            [("nl".to_string(), nl), ("en".to_string(), en)],
        )
        .unwrap();

        let issues = check_coverage(&catalog);
        let summary: Vec<(Rule, &str)> = issues.iter().map(|i| (i.rule(), i.key())).collect();
        assert_eq!(
            summary,
            vec![
                (Rule::FallbackGap, "hero.faqTitle"),
                (Rule::OrphanKey, "hero.tagline"),
            ]
        );
    }

    #[test]
    fn test_string_replaced_by_other_kind_is_gap() {
        let nl = tree(json!({"nav": {"home": "Start"}}));
        let en = tree(json!({"nav": {"home": {"label": "Home"}}}));
        let catalog = Catalog::from_trees(
            SupportedLocales::new(["nl", "en"], "nl").unwrap(),
            [("nl".to_string(), nl), ("en".to_string(), en)],
        )
        .unwrap();

        let issues = check_coverage(&catalog);
        assert_eq!(
            issues,
            vec![
                AuditIssue::FallbackGap {
                    locale: "en".to_string(),
                    key: "nav.home".to_string()
                },
                AuditIssue::OrphanKey {
                    locale: "en".to_string(),
                    key: "nav.home.label".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_structured_leaf_of_other_kind_is_drift() {
        let nl = tree(json!({
            "hero": {
                "faqs": [{"question": "Q", "answer": "A"}],
                "levels": {"0": "geen", "100": "alles"}
            }
        }));
        let en = tree(json!({
            "hero": {
                "faqs": "Questions coming soon",
                "levels": {"0": "none", "100": "all"}
            }
        }));
        let catalog = Catalog::from_trees(
            SupportedLocales::new(["nl", "en"], "nl").unwrap(),
            [("nl".to_string(), nl), ("en".to_string(), en)],
        )
        .unwrap();

        let issues = check_coverage(&catalog);
        assert_eq!(
            issues,
            vec![AuditIssue::ShapeDrift {
                locale: "en".to_string(),
                key: "hero.faqs".to_string(),
                expected: NodeKind::Array,
                found: NodeKind::String,
            }]
        );
        assert_eq!(issues[0].rule(), Rule::ShapeDrift);
        assert_eq!(
            issues[0].message(),
            "\"hero.faqs\" is a string in 'en' but an array in the default locale"
        );
    }

    #[test]
    fn test_locale_without_tree() {
        let nl = tree(json!({"a": "1", "b": {"c": "2"}}));
        let catalog = Catalog::from_trees(
            SupportedLocales::new(["nl", "de"], "nl").unwrap(),
            [("nl".to_string(), nl)],
        )
        .unwrap();

        let issues = check_coverage(&catalog);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.rule() == Rule::FallbackGap));
    }
}
