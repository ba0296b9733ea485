pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{
    attempt_service::AttemptService, details_service::DetailsService,
    evaluation_service::EvaluationService, media_service::MediaService,
    question_service::QuestionService, scoring_service::ScoringService,
};
use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub attempt_service: AttemptService,
    pub evaluation_service: EvaluationService,
    pub question_service: QuestionService,
    pub details_service: DetailsService,
    pub media_service: MediaService,
    pub scoring_service: ScoringService,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.scoring_timeout_secs))
            .build()
            .unwrap();

        let attempt_service = AttemptService::new(pool.clone());
        let scoring_service = ScoringService::new(&config, http_client);
        let evaluation_service = EvaluationService::new(
            Arc::new(scoring_service.clone()),
            attempt_service.clone(),
        );
        let question_service = QuestionService::new(pool.clone());
        let details_service = DetailsService::new(pool.clone());
        let media_service = MediaService::new(config.uploads_dir.clone());

        Self {
            config,
            pool,
            attempt_service,
            evaluation_service,
            question_service,
            details_service,
            media_service,
            scoring_service,
        }
    }
}
