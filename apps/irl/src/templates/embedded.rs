//! Templates compiled into the binary.

use super::Template;

/// Name of the template used when none is chosen.
pub const DEFAULT_TEMPLATE: &str = "default";

const EMBEDDED: &[(&str, &str)] = &[
    (DEFAULT_TEMPLATE, include_str!("../../templates/default.md")),
    ("experiment", include_str!("../../templates/experiment.md")),
    (
        "literature-review",
        include_str!("../../templates/literature-review.md"),
    ),
];

/// Returns every embedded template.
#[must_use]
pub fn embedded_templates() -> Vec<Template> {
    EMBEDDED
        .iter()
        .map(|(name, content)| Template::new(*name, *content))
        .collect()
}

/// Looks up one embedded template by name.
#[must_use]
pub fn embedded_template(name: &str) -> Option<Template> {
    EMBEDDED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(name, content)| Template::new(*name, *content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_set_contains_default_first() {
        let templates = embedded_templates();
        assert_eq!(templates[0].name, DEFAULT_TEMPLATE);
        assert_eq!(templates.len(), 3);
    }

    #[test]
    fn embedded_templates_are_non_empty_markdown() {
        for template in embedded_templates() {
            assert!(template.content.starts_with("# {{project}}"), "{}", template.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert!(embedded_template("experiment").is_some());
        assert!(embedded_template("nope").is_none());
        assert_eq!(
            embedded_template(DEFAULT_TEMPLATE).unwrap().content,
            embedded_templates()[0].content
        );
    }
}
