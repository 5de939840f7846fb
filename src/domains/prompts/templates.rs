//! Prompt templates and the renderer behind them.
//!
//! Rendering is two passes over the text: conditional blocks collapse to
//! their selected branch first, then `{{variable}}` placeholders fill in.
//! Both passes walk the string with `split_once`, so there is no regex and
//! no nesting.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const IF_CLOSE: &str = "{{/if}}";

/// A named template plus the argument list it advertises.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Prompt name as listed to clients.
    pub name: String,

    /// What the workflow does, for prompt listings.
    pub description: Option<String>,

    /// Arguments the template understands.
    pub arguments: Vec<PromptArgument>,

    /// Template text with `{{variable}}` placeholders.
    pub template: String,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template against the caller's arguments.
    ///
    /// Syntax:
    /// - `{{variable}}` fills in the value, or nothing when unset
    /// - `{{#if variable}}...{{/if}}` keeps the body only when the variable
    ///   has a non-empty value
    /// - an optional `{{else}}` inside the block supplies the unset branch
    ///
    /// Conditionals do not nest.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let expanded = expand_conditionals(&self.template, arguments)?;
        Ok(substitute_variables(&expanded, arguments))
    }
}

/// Replace each conditional block with its selected branch.
fn expand_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after_open)) = rest.split_once(IF_OPEN) {
        out.push_str(before);

        let (var_name, body_and_rest) = after_open
            .split_once("}}")
            .ok_or_else(|| PromptError::template("{{#if missing its closing }}"))?;
        let (body, after_close) = body_and_rest
            .split_once(IF_CLOSE)
            .ok_or_else(|| PromptError::template("{{#if}} block never closed with {{/if}}"))?;

        let (when_set, when_unset) = match body.split_once(ELSE_TAG) {
            Some((set_branch, unset_branch)) => (set_branch, unset_branch),
            None => (body, ""),
        };

        let is_set = arguments
            .get(var_name.trim())
            .is_some_and(|value| !value.is_empty());
        out.push_str(if is_set { when_set } else { when_unset });

        rest = after_close;
    }

    out.push_str(rest);
    Ok(out)
}

/// Fill in `{{variable}}` placeholders, dropping those with no value.
fn substitute_variables(template: &str, arguments: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after_open)) = rest.split_once("{{") {
        out.push_str(before);
        match after_open.split_once("}}") {
            Some((name, after_close)) => {
                if let Some(value) = arguments.get(name.trim()) {
                    out.push_str(value);
                }
                rest = after_close;
            }
            None => {
                // A dangling "{{" is kept as literal text
                out.push_str("{{");
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn bare(text: &str) -> PromptTemplate {
        PromptTemplate::new("test", None, vec![], text)
    }

    #[test]
    fn test_simple_substitution() {
        let rendered = bare("Curate a {{theme}} playlist.")
            .render(&args(&[("theme", "rainy day jazz")]))
            .unwrap();
        assert_eq!(rendered, "Curate a rainy day jazz playlist.");
    }

    #[test]
    fn test_conditional_with_value() {
        let rendered = bare("Search{{#if section}} in section {{section}}{{/if}}.")
            .render(&args(&[("section", "3")]))
            .unwrap();
        assert_eq!(rendered, "Search in section 3.");
    }

    #[test]
    fn test_conditional_without_value() {
        let rendered = bare("Search{{#if section}} in section {{section}}{{/if}}.")
            .render(&HashMap::new())
            .unwrap();
        assert_eq!(rendered, "Search.");
    }

    #[test]
    fn test_conditional_with_else() {
        let rendered = bare("Scope: {{#if section}}one section{{else}}whole library{{/if}}.")
            .render(&HashMap::new())
            .unwrap();
        assert_eq!(rendered, "Scope: whole library.");
    }

    #[test]
    fn test_empty_value_selects_else_branch() {
        let rendered = bare("{{#if scope}}scoped{{else}}everything{{/if}}")
            .render(&args(&[("scope", "")]))
            .unwrap();
        assert_eq!(rendered, "everything");
    }

    #[test]
    fn test_unset_placeholder_renders_empty() {
        let rendered = bare("Focus: {{focus}}.").render(&HashMap::new()).unwrap();
        assert_eq!(rendered, "Focus: .");
    }

    #[test]
    fn test_unclosed_if_is_an_error() {
        let result = bare("{{#if name}}no close").render(&HashMap::new());
        assert!(matches!(result, Err(PromptError::TemplateError(_))));
    }
}
