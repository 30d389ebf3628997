//! Application state for shared services

use std::sync::Arc;

use crate::domain::exam::DomainCode;
use crate::domain::question::QuestionRepository;
use crate::domain::selection::{
    DomainAvailabilityEntry, PracticeSelectionResult, SelectionResult,
};
use crate::domain::DomainError;
use crate::infrastructure::services::SelectionService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub selection_service: Arc<dyn SelectionServiceTrait>,
}

impl AppState {
    pub fn new(selection_service: Arc<dyn SelectionServiceTrait>) -> Self {
        Self { selection_service }
    }
}

/// Trait for selection service operations
#[async_trait::async_trait]
pub trait SelectionServiceTrait: Send + Sync {
    /// Blueprint-weighted diagnostic selection; fails on insufficient content
    async fn select_by_blueprint(
        &self,
        total_questions: usize,
    ) -> Result<SelectionResult, DomainError>;

    /// Even-split practice selection; returns partial results on shortfall
    async fn select_by_domain_list(
        &self,
        exam_key: &str,
        domain_codes: &[DomainCode],
        question_count: usize,
    ) -> Result<PracticeSelectionResult, DomainError>;

    /// Per-domain availability of the blueprint's domains
    async fn availability_report(&self) -> Result<Vec<DomainAvailabilityEntry>, DomainError>;
}

#[async_trait::async_trait]
impl<R: QuestionRepository> SelectionServiceTrait for SelectionService<R> {
    async fn select_by_blueprint(
        &self,
        total_questions: usize,
    ) -> Result<SelectionResult, DomainError> {
        SelectionService::select_by_blueprint(self, total_questions).await
    }

    async fn select_by_domain_list(
        &self,
        exam_key: &str,
        domain_codes: &[DomainCode],
        question_count: usize,
    ) -> Result<PracticeSelectionResult, DomainError> {
        SelectionService::select_by_domain_list(self, exam_key, domain_codes, question_count)
            .await
    }

    async fn availability_report(&self) -> Result<Vec<DomainAvailabilityEntry>, DomainError> {
        SelectionService::availability_report(self).await
    }
}
