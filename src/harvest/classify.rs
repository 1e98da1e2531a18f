//! File kind classification
//!
//! The kind of an attachment is inferred from the text of the link pointing
//! to it, using an ordered rule table taken from the configuration.

use crate::config::{ClassificationRule, Config};

/// Ordered link-text rules, first match wins
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
    default_kind: String,
}

impl Classifier {
    pub fn new(rules: Vec<ClassificationRule>, default_kind: impl Into<String>) -> Self {
        // Patterns are matched against lowercased text
        let rules = rules
            .into_iter()
            .map(|rule| ClassificationRule::new(rule.pattern.to_lowercase(), rule.kind))
            .collect();

        Self {
            rules,
            default_kind: default_kind.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.classification.clone(), config.default_kind.clone())
    }

    /// Returns the kind for a link text
    pub fn classify(&self, link_text: &str) -> &str {
        let text = link_text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| text.contains(&rule.pattern))
            .map(|rule| rule.kind.as_str())
            .unwrap_or(&self.default_kind)
    }
}
