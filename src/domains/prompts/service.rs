//! Prompt listing and rendering.
//!
//! Answers prompts/list and prompts/get. The workflows themselves live in
//! `definitions/`; this service looks the template up, checks the caller
//! supplied every required argument, and renders.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Serves prompt listings and instantiations.
pub struct PromptService {
    /// Available prompts, keyed by name.
    prompts: HashMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService with every registered prompt.
    pub fn new() -> Self {
        let prompts: HashMap<String, PromptTemplate> = get_all_prompts()
            .into_iter()
            .map(|template| (template.name.clone(), template))
            .collect();

        info!("{} prompts registered", prompts.len());

        Self { prompts }
    }

    /// Every registered prompt, for prompts/list.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Render a prompt with the caller's arguments substituted in.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        let missing = template
            .arguments
            .iter()
            .filter(|arg| arg.required.unwrap_or(false))
            .find(|arg| !arguments.contains_key(&arg.name));
        if let Some(arg) = missing {
            return Err(PromptError::missing_argument(&arg.name));
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_service_creation() {
        let service = PromptService::new();

        let prompts = service.list_prompts().await;
        assert_eq!(prompts.len(), 3);
    }

    #[tokio::test]
    async fn test_get_prompt_with_arguments() {
        let service = PromptService::new();

        let mut args = HashMap::new();
        args.insert("theme".to_string(), "rainy day jazz".to_string());

        let result = service.get_prompt("curate_playlist", Some(args)).await;
        assert!(result.is_ok());

        let prompt = result.unwrap();
        match &prompt.messages[0].content {
            rmcp::model::PromptMessageContent::Text { text } => {
                assert!(text.contains("rainy day jazz"));
                assert!(text.contains("Search across the whole library"));
            }
            _ => panic!("Expected text message"),
        }
    }

    #[tokio::test]
    async fn test_get_prompt_missing_required_argument() {
        let service = PromptService::new();

        let result = service.get_prompt("cleanup_duplicates", None).await;
        assert!(matches!(result, Err(PromptError::MissingArgument(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = PromptService::new();

        let result = service.get_prompt("nonexistent", None).await;
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }
}
