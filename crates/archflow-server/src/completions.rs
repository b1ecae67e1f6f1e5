//! Editor completion payloads, derived from the generated symbol tables.

use crate::schema::CompletionsResponse;
use archflow::Provider;
use archflow_symbols::tables;
use std::collections::BTreeMap;

/// Keywords the editor offers alongside class names.
static KEYWORDS: &[&str] = &[
    "Diagram",
    "Cluster",
    "Edge",
    "with",
    "show",
    "filename",
    "direction",
    "outformat",
    "graph_attr",
    "node_attr",
    "edge_attr",
    "label",
];

/// Edge operators of the renderer DSL.
static OPERATORS: &[&str] = &[">>", "<<", "-"];

/// Build the completions payload for a provider.
#[must_use]
pub fn completions_for(provider: Provider) -> CompletionsResponse {
    let mut classes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut imports: BTreeMap<String, String> = BTreeMap::new();

    for entry in tables::provider_modules(provider) {
        let list = classes.entry(entry.category.to_string()).or_default();
        for &class in entry.classes {
            list.push(class.to_string());
            imports
                .entry(class.to_string())
                .or_insert_with(|| format!("from {} import {class}", entry.module));
        }
    }

    CompletionsResponse {
        classes,
        imports,
        keywords: KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
        operators: OPERATORS.iter().map(|s| (*s).to_string()).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_completions() {
        let payload = completions_for(Provider::Aws);
        assert!(payload.classes["compute"].iter().any(|c| c == "Lambda"));
        assert_eq!(
            payload.imports["Lambda"],
            "from diagrams.aws.compute import Lambda"
        );
        assert!(payload.keywords.iter().any(|k| k == "Diagram"));
        assert_eq!(payload.operators, vec![">>", "<<", "-"]);
    }

    #[test]
    fn test_duplicate_class_names_keep_first_import() {
        // AutoScaling exists in both compute and management; the import map
        // must still be single-valued.
        let payload = completions_for(Provider::Aws);
        assert_eq!(
            payload.imports["AutoScaling"],
            "from diagrams.aws.compute import AutoScaling"
        );
    }

    #[test]
    fn test_all_providers_have_payloads() {
        for provider in Provider::ALL {
            let payload = completions_for(provider);
            assert!(!payload.classes.is_empty());
            assert!(!payload.imports.is_empty());
        }
    }
}
