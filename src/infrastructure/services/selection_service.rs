//! Selection service - assembles domain-weighted question selections
//!
//! Orchestrates one allocation request end to end: availability snapshot,
//! target allocation, per-domain sampling, cross-domain shuffle, and the
//! distribution manifest. The two public flows deliberately diverge on
//! shortfall: a diagnostic must never silently serve fewer questions than
//! promised, while a practice session is allowed to under-deliver.

use std::sync::Arc;

use rand::thread_rng;
use tracing::{debug, warn};

use crate::domain::blueprint::Blueprint;
use crate::domain::exam::{DomainCode, Exam, ExamDomain};
use crate::domain::question::{EligibilityFilter, QuestionRepository, TaggedQuestion};
use crate::domain::selection::{
    blueprint_targets, even_split_targets, sampler, DomainAvailabilityEntry, DomainDistribution,
    PracticeSelectionResult, SelectionResult, MIN_POOL_THRESHOLD,
};
use crate::domain::DomainError;

/// Service implementing the diagnostic and practice selection flows
#[derive(Debug)]
pub struct SelectionService<R: QuestionRepository> {
    repository: Arc<R>,
    blueprint: Blueprint,
}

impl<R: QuestionRepository> SelectionService<R> {
    /// Create a new SelectionService over a content store and a blueprint
    pub fn new(repository: Arc<R>, blueprint: Blueprint) -> Self {
        Self {
            repository,
            blueprint,
        }
    }

    /// Select questions for a diagnostic exam using blueprint domain weights.
    ///
    /// Fails with `InsufficientContent` when the store cannot supply the full
    /// requested count.
    pub async fn select_by_blueprint(
        &self,
        total_questions: usize,
    ) -> Result<SelectionResult, DomainError> {
        if total_questions == 0 {
            return Err(DomainError::validation(
                "Question count must be greater than 0",
            ));
        }

        let filter = EligibilityFilter::new(self.blueprint.exam());
        let inventory = self.repository.domain_inventory(&filter, None).await?;
        let targets = blueprint_targets(total_questions, &self.blueprint, &inventory);

        let mut selected: Vec<TaggedQuestion> = Vec::with_capacity(total_questions);
        let mut distribution: Vec<DomainDistribution> = Vec::with_capacity(self.blueprint.len());

        for entry in self.blueprint.entries() {
            let code = &entry.domain_code;
            let target = targets.get(code);
            let available = inventory.available(code);

            warn_low_pool(code, available);

            if target == 0 {
                distribution.push(DomainDistribution::new(code.clone(), 0, available, 0));
                continue;
            }

            let Some(domain) = inventory.domain(code) else {
                warn!(domain_code = %code, "Domain metadata not found for blueprint domain");
                distribution.push(DomainDistribution::new(code.clone(), target, available, 0));
                continue;
            };

            let drawn = self.draw_for_domain(&filter, domain, target).await;
            distribution.push(DomainDistribution::new(
                code.clone(),
                target,
                available,
                drawn.len(),
            ));
            selected.extend(drawn);
        }

        if selected.len() < total_questions {
            let available: usize = self
                .blueprint
                .entries()
                .iter()
                .map(|e| inventory.available(&e.domain_code))
                .sum();
            return Err(DomainError::insufficient_content(
                total_questions,
                selected.len(),
                available,
            ));
        }

        sampler::shuffle(&mut selected, &mut thread_rng());
        selected.truncate(total_questions);

        log_distribution("diagnostic", &distribution);
        debug!(
            selected = selected.len(),
            requested = total_questions,
            "Diagnostic selection complete"
        );

        Ok(SelectionResult {
            questions: selected,
            domain_distribution: distribution,
        })
    }

    /// Select practice questions for an explicit domain list with an even
    /// split across domains.
    ///
    /// Never fails on shortfall: a partial set is returned with
    /// `total_selected < total_requested` and a warning logged.
    pub async fn select_by_domain_list(
        &self,
        exam_key: &str,
        domain_codes: &[DomainCode],
        question_count: usize,
    ) -> Result<PracticeSelectionResult, DomainError> {
        if domain_codes.is_empty() {
            return Err(DomainError::validation(
                "At least one domain code must be provided",
            ));
        }

        if question_count == 0 {
            return Err(DomainError::validation(
                "Question count must be greater than 0",
            ));
        }

        let exam = Exam::from_key(exam_key)?;
        let filter = EligibilityFilter::new(exam).with_explanations();

        let inventory = self
            .repository
            .domain_inventory(&filter, Some(domain_codes))
            .await?;

        if inventory.is_empty() {
            warn!(?domain_codes, "No domains found for requested codes");
            return Ok(PracticeSelectionResult {
                questions: Vec::new(),
                domain_distribution: domain_codes
                    .iter()
                    .map(|code| DomainDistribution::new(code.clone(), 0, 0, 0))
                    .collect(),
                total_requested: question_count,
                total_selected: 0,
            });
        }

        for code in domain_codes {
            if inventory.domain(code).is_none() {
                warn!(domain_code = %code, "Requested domain not found in exam domains");
            } else if inventory.available(code) == 0 {
                warn!(
                    domain_code = %code,
                    "Requested domain has no eligible questions with explanations"
                );
            }
        }

        let targets = even_split_targets(question_count, domain_codes, &inventory);

        let mut selected: Vec<TaggedQuestion> = Vec::with_capacity(question_count);
        let mut distribution: Vec<DomainDistribution> = Vec::with_capacity(domain_codes.len());

        for code in domain_codes {
            let target = targets.get(code);
            let available = inventory.available(code);

            warn_low_pool(code, available);

            if target == 0 || available == 0 {
                distribution.push(DomainDistribution::new(code.clone(), target, available, 0));
                continue;
            }

            let Some(domain) = inventory.domain(code) else {
                distribution.push(DomainDistribution::new(code.clone(), target, available, 0));
                continue;
            };

            let drawn = self.draw_for_domain(&filter, domain, target).await;
            distribution.push(DomainDistribution::new(
                code.clone(),
                target,
                available,
                drawn.len(),
            ));
            selected.extend(drawn);
        }

        let total_selected = selected.len();
        if total_selected < question_count {
            warn!(
                requested = question_count,
                selected = total_selected,
                available = inventory.total_available(),
                "Practice selection under-delivered across requested domains"
            );
        }

        sampler::shuffle(&mut selected, &mut thread_rng());

        log_distribution("practice", &distribution);

        Ok(PracticeSelectionResult {
            questions: selected,
            domain_distribution: distribution,
            total_requested: question_count,
            total_selected,
        })
    }

    /// Per-domain availability of the blueprint's domains, for operators and
    /// readiness checks
    pub async fn availability_report(
        &self,
    ) -> Result<Vec<DomainAvailabilityEntry>, DomainError> {
        let filter = EligibilityFilter::new(self.blueprint.exam());
        let codes: Vec<DomainCode> = self
            .blueprint
            .entries()
            .iter()
            .map(|e| e.domain_code.clone())
            .collect();

        let inventory = self
            .repository
            .domain_inventory(&filter, Some(&codes))
            .await?;

        Ok(self
            .blueprint
            .entries()
            .iter()
            .map(|entry| {
                let available = inventory.available(&entry.domain_code);
                let name = inventory
                    .domain(&entry.domain_code)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| entry.display_name.clone());

                DomainAvailabilityEntry {
                    domain_code: entry.domain_code.clone(),
                    domain_name: name,
                    available_count: available,
                    below_threshold: available < MIN_POOL_THRESHOLD,
                }
            })
            .collect())
    }

    /// Fetch one domain's pool and draw a uniform subset.
    ///
    /// A fetch failure is absorbed: the domain contributes zero questions and
    /// the shortfall surfaces through the manifest (and, for the diagnostic
    /// flow, the insufficient-content check).
    async fn draw_for_domain(
        &self,
        filter: &EligibilityFilter,
        domain: &ExamDomain,
        target: usize,
    ) -> Vec<TaggedQuestion> {
        let pool = match self.repository.eligible_questions(filter, &domain.id).await {
            Ok(pool) => pool,
            Err(e) => {
                let error = DomainError::domain_fetch(domain.code.as_str(), e.to_string());
                warn!(domain_code = %domain.code, %error, "Domain pool fetch failed");
                return Vec::new();
            }
        };

        if pool.is_empty() {
            warn!(domain_code = %domain.code, "No questions available for domain");
            return Vec::new();
        }

        let drawn = sampler::draw(pool, target, &mut thread_rng());

        drawn
            .into_iter()
            .map(|question| {
                TaggedQuestion::new(
                    question,
                    domain.id,
                    domain.code.clone(),
                    domain.name.clone(),
                )
            })
            .collect()
    }
}

fn warn_low_pool(code: &DomainCode, available: usize) {
    if available > 0 && available < MIN_POOL_THRESHOLD {
        warn!(
            domain_code = %code,
            available,
            "Domain has a low eligible question pool"
        );
    }
}

fn log_distribution(flow: &str, distribution: &[DomainDistribution]) {
    for dist in distribution {
        debug!(
            flow,
            domain_code = %dist.domain_code,
            target = dist.target_count,
            available = dist.available_count,
            selected = dist.selected_count,
            fulfilled = dist.is_fulfilled(),
            "Domain distribution"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::exam::DomainId;
    use crate::domain::question::{
        AnswerChoice, InMemoryQuestionRepository, MockQuestionRepository, Question, QuestionId,
    };

    fn code(value: &str) -> DomainCode {
        DomainCode::new(value).unwrap()
    }

    fn question(stem: &str) -> Question {
        Question::new(
            QuestionId::generate(),
            stem,
            vec![
                AnswerChoice::new("A", "Correct choice", true),
                AnswerChoice::new("B", "Distractor", false),
                AnswerChoice::new("C", "Distractor", false),
            ],
        )
    }

    /// Repository seeded with `count` eligible questions per blueprint domain
    fn seeded_repository(count: usize) -> InMemoryQuestionRepository {
        let blueprint = Blueprint::pmle();
        let mut repo = InMemoryQuestionRepository::new();

        for entry in blueprint.entries() {
            let domain = ExamDomain::new(
                DomainId::generate(),
                entry.domain_code.clone(),
                entry.display_name.clone(),
            );
            repo = repo.with_domain(domain);
            for i in 0..count {
                repo = repo.with_question(
                    &entry.domain_code,
                    question(&format!("{} question {}", entry.domain_code, i)),
                );
            }
        }

        repo
    }

    fn service(repo: InMemoryQuestionRepository) -> SelectionService<InMemoryQuestionRepository> {
        SelectionService::new(Arc::new(repo), Blueprint::pmle())
    }

    #[tokio::test]
    async fn test_diagnostic_selects_requested_count() {
        let service = service(seeded_repository(20));

        let result = service.select_by_blueprint(40).await.unwrap();

        assert_eq!(result.questions.len(), 40);
        assert_eq!(result.selected_total(), 40);
    }

    #[tokio::test]
    async fn test_diagnostic_manifest_is_complete() {
        let service = service(seeded_repository(20));

        let result = service.select_by_blueprint(10).await.unwrap();

        let blueprint = Blueprint::pmle();
        assert_eq!(result.domain_distribution.len(), blueprint.len());
        for entry in blueprint.entries() {
            assert!(
                result
                    .domain_distribution
                    .iter()
                    .any(|d| d.domain_code == entry.domain_code),
                "manifest missing {}",
                entry.domain_code
            );
        }
    }

    #[tokio::test]
    async fn test_diagnostic_manifest_counts_match_output() {
        let service = service(seeded_repository(20));

        let result = service.select_by_blueprint(25).await.unwrap();

        assert_eq!(result.questions.len(), result.selected_total());
        for dist in &result.domain_distribution {
            let tagged = result
                .questions
                .iter()
                .filter(|q| q.domain_code == dist.domain_code)
                .count();
            assert_eq!(tagged, dist.selected_count);
        }
    }

    #[tokio::test]
    async fn test_diagnostic_questions_are_domain_tagged() {
        let service = service(seeded_repository(10));

        let result = service.select_by_blueprint(12).await.unwrap();

        for question in &result.questions {
            assert!(!question.domain_name.is_empty());
            assert!(question.question.stem.contains(question.domain_code.as_str()));
        }
    }

    #[tokio::test]
    async fn test_diagnostic_insufficient_content_fails() {
        // 2 eligible questions per domain = 12 total, well under 40
        let service = service(seeded_repository(2));

        let result = service.select_by_blueprint(40).await;

        match result {
            Err(DomainError::InsufficientContent {
                requested,
                selected,
                available,
            }) => {
                assert_eq!(requested, 40);
                assert_eq!(selected, 12);
                assert_eq!(available, 12);
            }
            other => panic!("expected InsufficientContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_diagnostic_redistributes_around_narrow_domain() {
        // One domain holds a single question; the rest have plenty, so the
        // request must still be fully served
        let blueprint = Blueprint::pmle();
        let mut repo = InMemoryQuestionRepository::new();

        for (index, entry) in blueprint.entries().iter().enumerate() {
            let domain = ExamDomain::new(
                DomainId::generate(),
                entry.domain_code.clone(),
                entry.display_name.clone(),
            );
            repo = repo.with_domain(domain);

            let count = if index == 0 { 1 } else { 20 };
            for i in 0..count {
                repo = repo.with_question(
                    &entry.domain_code,
                    question(&format!("{} question {}", entry.domain_code, i)),
                );
            }
        }

        let service = service(repo);
        let result = service.select_by_blueprint(30).await.unwrap();

        assert_eq!(result.questions.len(), 30);

        let narrow = &blueprint.entries()[0].domain_code;
        let narrow_dist = result
            .domain_distribution
            .iter()
            .find(|d| &d.domain_code == narrow)
            .unwrap();
        assert_eq!(narrow_dist.selected_count, 1);
    }

    #[tokio::test]
    async fn test_diagnostic_zero_count_rejected() {
        let service = service(seeded_repository(5));
        let result = service.select_by_blueprint(0).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_diagnostic_inventory_failure_is_fatal() {
        let repo = MockQuestionRepository::new().with_inventory_error("connection reset");
        let service = SelectionService::new(Arc::new(repo), Blueprint::pmle());

        let result = service.select_by_blueprint(10).await;
        assert!(matches!(result, Err(DomainError::InventoryFetch { .. })));
    }

    #[tokio::test]
    async fn test_diagnostic_domain_fetch_failure_is_absorbed() {
        // The failing domain contributes zero; with ample content elsewhere
        // the allocator cannot know that at target time, so the request
        // cascades into the insufficient-content error
        let blueprint = Blueprint::pmle();
        let mut repo = MockQuestionRepository::new();
        let mut failing_id = None;

        for (index, entry) in blueprint.entries().iter().enumerate() {
            let domain = ExamDomain::new(
                DomainId::generate(),
                entry.domain_code.clone(),
                entry.display_name.clone(),
            );
            if index == 0 {
                failing_id = Some(domain.id);
            }
            repo = repo.with_domain(domain);
            for i in 0..10 {
                repo = repo.with_question(
                    &entry.domain_code,
                    question(&format!("{} question {}", entry.domain_code, i)),
                );
            }
        }

        let repo = repo.with_failing_domain(failing_id.unwrap());
        let service = SelectionService::new(Arc::new(repo), Blueprint::pmle());

        let result = service.select_by_blueprint(40).await;

        match result {
            Err(DomainError::InsufficientContent { selected, .. }) => {
                assert!(selected < 40);
            }
            other => panic!("expected InsufficientContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_diagnostic_output_order_varies() {
        // Statistical: identical inputs must not produce one fixed order
        let service = service(seeded_repository(20));

        let first = service.select_by_blueprint(30).await.unwrap();
        let mut varied = false;

        for _ in 0..10 {
            let next = service.select_by_blueprint(30).await.unwrap();
            let first_ids: Vec<_> = first.questions.iter().map(|q| q.question.id).collect();
            let next_ids: Vec<_> = next.questions.iter().map(|q| q.question.id).collect();
            if first_ids != next_ids {
                varied = true;
                break;
            }
        }

        assert!(varied, "selection order never varied across repeated calls");
    }

    #[tokio::test]
    async fn test_practice_even_split() {
        let service = service(seeded_repository(20));
        let codes = vec![
            code("MONITORING_ML_SOLUTIONS"),
            code("SERVING_AND_SCALING_MODELS"),
        ];

        let result = service
            .select_by_domain_list("pmle", &codes, 10)
            .await
            .unwrap();

        assert_eq!(result.total_requested, 10);
        assert_eq!(result.total_selected, 10);
        assert_eq!(result.questions.len(), 10);

        for dist in &result.domain_distribution {
            assert_eq!(dist.target_count, 5);
            assert_eq!(dist.selected_count, 5);
        }
    }

    #[tokio::test]
    async fn test_practice_under_delivers_without_error() {
        let service = service(seeded_repository(3));
        let codes = vec![code("MONITORING_ML_SOLUTIONS")];

        let result = service
            .select_by_domain_list("pmle", &codes, 10)
            .await
            .unwrap();

        assert_eq!(result.total_requested, 10);
        assert_eq!(result.total_selected, 3);
        assert_eq!(result.questions.len(), 3);
    }

    #[tokio::test]
    async fn test_practice_requires_explanations() {
        // Seed one domain where half the questions lack explanations; only
        // the explained half is eligible for practice
        use crate::domain::question::{QuestionStatus, ReviewStatus};

        let monitoring = ExamDomain::new(
            DomainId::generate(),
            code("MONITORING_ML_SOLUTIONS"),
            "Monitoring ML Solutions",
        );
        let mut repo = InMemoryQuestionRepository::new().with_domain(monitoring);

        for i in 0..4 {
            repo = repo.with_question(
                &code("MONITORING_ML_SOLUTIONS"),
                question(&format!("explained {}", i)),
            );
        }
        for i in 0..4 {
            repo = repo.with_question_metadata(
                &code("MONITORING_ML_SOLUTIONS"),
                question(&format!("unexplained {}", i)),
                QuestionStatus::Active,
                ReviewStatus::Good,
                false,
            );
        }

        let service = service(repo);
        let result = service
            .select_by_domain_list("pmle", &[code("MONITORING_ML_SOLUTIONS")], 8)
            .await
            .unwrap();

        assert_eq!(result.total_selected, 4);
        assert!(result
            .questions
            .iter()
            .all(|q| q.question.stem.starts_with("explained")));
    }

    #[tokio::test]
    async fn test_practice_unknown_codes_returns_empty_result() {
        let service = service(seeded_repository(5));
        let codes = vec![code("NO_SUCH_DOMAIN"), code("ALSO_MISSING")];

        let result = service
            .select_by_domain_list("pmle", &codes, 10)
            .await
            .unwrap();

        assert!(result.questions.is_empty());
        assert_eq!(result.total_selected, 0);
        assert_eq!(result.domain_distribution.len(), 2);
        assert!(result
            .domain_distribution
            .iter()
            .all(|d| d.selected_count == 0 && d.available_count == 0));
    }

    #[tokio::test]
    async fn test_practice_mixed_known_and_unknown_codes() {
        let service = service(seeded_repository(10));
        let codes = vec![code("MONITORING_ML_SOLUTIONS"), code("NO_SUCH_DOMAIN")];

        let result = service
            .select_by_domain_list("pmle", &codes, 6)
            .await
            .unwrap();

        // The unknown code still appears in the manifest with zeros
        let missing = result
            .domain_distribution
            .iter()
            .find(|d| d.domain_code == code("NO_SUCH_DOMAIN"))
            .unwrap();
        assert_eq!(missing.available_count, 0);
        assert_eq!(missing.selected_count, 0);

        // All the questions come from the known domain
        assert_eq!(result.total_selected, 6);
        assert!(result
            .questions
            .iter()
            .all(|q| q.domain_code == code("MONITORING_ML_SOLUTIONS")));
    }

    #[tokio::test]
    async fn test_practice_unsupported_exam_key() {
        let service = service(seeded_repository(5));
        let result = service
            .select_by_domain_list("pcde", &[code("MONITORING_ML_SOLUTIONS")], 5)
            .await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_practice_empty_domain_list() {
        let service = service(seeded_repository(5));
        let result = service.select_by_domain_list("pmle", &[], 5).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_practice_zero_count_rejected() {
        let service = service(seeded_repository(5));
        let result = service
            .select_by_domain_list("pmle", &[code("MONITORING_ML_SOLUTIONS")], 0)
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_practice_no_duplicate_questions() {
        let service = service(seeded_repository(10));
        let codes = vec![
            code("MONITORING_ML_SOLUTIONS"),
            code("SERVING_AND_SCALING_MODELS"),
            code("SCALING_PROTOTYPES_INTO_ML_MODELS"),
        ];

        let result = service
            .select_by_domain_list("pmle", &codes, 15)
            .await
            .unwrap();

        let unique: HashSet<_> = result.questions.iter().map(|q| q.question.id).collect();
        assert_eq!(unique.len(), result.questions.len());
    }

    #[tokio::test]
    async fn test_availability_report() {
        let service = service(seeded_repository(3));

        let report = service.availability_report().await.unwrap();

        assert_eq!(report.len(), Blueprint::pmle().len());
        for entry in &report {
            assert_eq!(entry.available_count, 3);
            assert!(entry.below_threshold);
            assert!(!entry.domain_name.is_empty());
        }
    }

    #[tokio::test]
    async fn test_availability_report_healthy_pools() {
        let service = service(seeded_repository(12));

        let report = service.availability_report().await.unwrap();

        assert!(report.iter().all(|e| !e.below_threshold));
    }
}
