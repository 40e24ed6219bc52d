use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::dto::{request::GenerateQuizRequestDto, response::QuizResponseDto},
    services::{
        providers::QuestionProvider,
        template_service::{unresolved_placeholders, PromptTemplate},
    },
};

pub struct QuizService {
    template: PromptTemplate,
    provider: Arc<dyn QuestionProvider>,
    default_title: String,
}

impl QuizService {
    pub fn new(
        template: PromptTemplate,
        provider: Arc<dyn QuestionProvider>,
        default_title: impl Into<String>,
    ) -> Self {
        Self {
            template,
            provider,
            default_title: default_title.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn generate_quiz(&self, request: GenerateQuizRequestDto) -> AppResult<QuizResponseDto> {
        let variables = request.template_variables();
        let prompt = self.template.render(request.prompt.as_deref(), &variables);

        let unresolved = unresolved_placeholders(&prompt);
        if !unresolved.is_empty() {
            log::warn!(
                "Prompt still contains unresolved placeholders: {}",
                unresolved.join(", ")
            );
        }

        let title = request
            .title
            .unwrap_or_else(|| self.default_title.clone());

        log::info!(
            "Generating quiz '{}' via {} ({} variables, {} prompt bytes)",
            title,
            self.provider.name(),
            variables.len(),
            prompt.len()
        );

        let questions = self
            .provider
            .generate_questions(&prompt)
            .await
            .inspect_err(|e| log::error!("Quiz generation failed: {}", e))?;

        log::info!("Generated {} questions for quiz '{}'", questions.len(), title);
        Ok(QuizResponseDto { title, questions })
    }
}
