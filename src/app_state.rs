use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        providers::{build_provider, QuestionProvider},
        quiz_service::QuizService,
        template_service::PromptTemplate,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Loads the default prompt template and builds the configured provider.
    /// Fails when the template cannot be read.
    pub async fn new(config: Config) -> AppResult<Self> {
        let template = PromptTemplate::load(&config.prompt_template_path).await?;
        let provider = build_provider(&config)?;

        Ok(Self::with_provider(config, template, provider))
    }

    pub fn with_provider(
        config: Config,
        template: PromptTemplate,
        provider: Arc<dyn QuestionProvider>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            template,
            provider,
            config.default_title.clone(),
        ));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
