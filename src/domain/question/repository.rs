//! Question repository trait

use async_trait::async_trait;

use super::{EligibilityFilter, Question};
use crate::domain::exam::{DomainCode, DomainId};
use crate::domain::selection::DomainInventory;
use crate::domain::DomainError;

/// Read-only access to the exam content store
///
/// Selection never writes: session snapshots are persisted by a separate
/// collaborator after selection completes.
#[async_trait]
pub trait QuestionRepository: Send + Sync + std::fmt::Debug {
    /// Count eligible questions per domain.
    ///
    /// Without an allow-list, only domains with at least one eligible
    /// question appear (callers default absent codes to zero). With an
    /// allow-list, every listed code that exists as a domain appears in the
    /// lookups even when its availability is zero; codes with no domain row
    /// at all are simply absent.
    ///
    /// A failure here is fatal to the whole allocation: an undercount would
    /// silently bias the distribution math.
    async fn domain_inventory(
        &self,
        filter: &EligibilityFilter,
        allow_list: Option<&[DomainCode]>,
    ) -> Result<DomainInventory, DomainError>;

    /// Fetch the full eligible pool for one domain.
    ///
    /// Implementations must not apply a store-side row limit: without a true
    /// random order a small limit resamples the same leading rows across
    /// sessions. Sampling happens in memory over the whole pool.
    async fn eligible_questions(
        &self,
        filter: &EligibilityFilter,
        domain_id: &DomainId,
    ) -> Result<Vec<Question>, DomainError>;
}

/// In-memory implementation of QuestionRepository
pub mod in_memory {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::exam::{Exam, ExamDomain};
    use crate::domain::question::{QuestionStatus, ReviewStatus};

    /// A question row with the content-quality metadata that gates eligibility
    #[derive(Debug, Clone)]
    struct StoredQuestion {
        exam: Exam,
        domain_id: DomainId,
        status: QuestionStatus,
        review_status: ReviewStatus,
        has_explanation: bool,
        question: Question,
    }

    /// In-memory implementation of QuestionRepository for development and testing
    #[derive(Debug, Default)]
    pub struct InMemoryQuestionRepository {
        domains: Mutex<Vec<ExamDomain>>,
        questions: Mutex<Vec<StoredQuestion>>,
    }

    impl InMemoryQuestionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_domain(self, domain: ExamDomain) -> Self {
            self.domains.lock().unwrap().push(domain);
            self
        }

        /// Add an eligible question (ACTIVE, GOOD, with explanation)
        pub fn with_question(self, domain_code: &DomainCode, question: Question) -> Self {
            self.with_question_metadata(
                domain_code,
                question,
                QuestionStatus::Active,
                ReviewStatus::Good,
                true,
            )
        }

        /// Add a question with explicit eligibility metadata
        pub fn with_question_metadata(
            self,
            domain_code: &DomainCode,
            question: Question,
            status: QuestionStatus,
            review_status: ReviewStatus,
            has_explanation: bool,
        ) -> Self {
            let domain_id = self
                .domains
                .lock()
                .unwrap()
                .iter()
                .find(|d| &d.code == domain_code)
                .map(|d| d.id)
                .expect("domain must be registered before its questions");

            self.questions.lock().unwrap().push(StoredQuestion {
                exam: Exam::Pmle,
                domain_id,
                status,
                review_status,
                has_explanation,
                question,
            });
            self
        }

        fn matches(stored: &StoredQuestion, filter: &EligibilityFilter) -> bool {
            stored.exam == filter.exam
                && stored.status == filter.status
                && stored.review_status == filter.review_status
                && (!filter.require_explanation || stored.has_explanation)
        }
    }

    #[async_trait]
    impl QuestionRepository for InMemoryQuestionRepository {
        async fn domain_inventory(
            &self,
            filter: &EligibilityFilter,
            allow_list: Option<&[DomainCode]>,
        ) -> Result<DomainInventory, DomainError> {
            let domains = self.domains.lock().unwrap();
            let questions = self.questions.lock().unwrap();
            let mut inventory = DomainInventory::new();

            match allow_list {
                None => {
                    for stored in questions.iter().filter(|q| Self::matches(q, filter)) {
                        let Some(domain) = domains.iter().find(|d| d.id == stored.domain_id)
                        else {
                            continue;
                        };
                        inventory.record_domain(domain.clone());
                        inventory.increment(&domain.code);
                    }
                }
                Some(codes) => {
                    for code in codes {
                        let Some(domain) = domains.iter().find(|d| &d.code == code) else {
                            continue;
                        };
                        let count = questions
                            .iter()
                            .filter(|q| q.domain_id == domain.id && Self::matches(q, filter))
                            .count();
                        inventory.record_domain(domain.clone());
                        inventory.record_count(code.clone(), count);
                    }
                }
            }

            Ok(inventory)
        }

        async fn eligible_questions(
            &self,
            filter: &EligibilityFilter,
            domain_id: &DomainId,
        ) -> Result<Vec<Question>, DomainError> {
            Ok(self
                .questions
                .lock()
                .unwrap()
                .iter()
                .filter(|q| &q.domain_id == domain_id && Self::matches(q, filter))
                .map(|q| q.question.clone())
                .collect())
        }
    }
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::in_memory::InMemoryQuestionRepository;
    use super::*;
    use crate::domain::exam::ExamDomain;

    /// Mock repository with error injection for testing failure policies
    #[derive(Debug, Default)]
    pub struct MockQuestionRepository {
        inner: InMemoryQuestionRepository,
        inventory_error: Mutex<Option<String>>,
        failing_domains: Mutex<HashSet<DomainId>>,
    }

    impl MockQuestionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_domain(mut self, domain: ExamDomain) -> Self {
            self.inner = self.inner.with_domain(domain);
            self
        }

        pub fn with_question(mut self, domain_code: &DomainCode, question: Question) -> Self {
            self.inner = self.inner.with_question(domain_code, question);
            self
        }

        /// Make the inventory query fail
        pub fn with_inventory_error(self, error: impl Into<String>) -> Self {
            *self.inventory_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Make the pool fetch for one domain fail
        pub fn with_failing_domain(self, domain_id: DomainId) -> Self {
            self.failing_domains.lock().unwrap().insert(domain_id);
            self
        }
    }

    #[async_trait]
    impl QuestionRepository for MockQuestionRepository {
        async fn domain_inventory(
            &self,
            filter: &EligibilityFilter,
            allow_list: Option<&[DomainCode]>,
        ) -> Result<DomainInventory, DomainError> {
            if let Some(error) = self.inventory_error.lock().unwrap().as_ref() {
                return Err(DomainError::inventory_fetch(
                    "domain availability",
                    error.clone(),
                ));
            }
            self.inner.domain_inventory(filter, allow_list).await
        }

        async fn eligible_questions(
            &self,
            filter: &EligibilityFilter,
            domain_id: &DomainId,
        ) -> Result<Vec<Question>, DomainError> {
            if self.failing_domains.lock().unwrap().contains(domain_id) {
                return Err(DomainError::storage("simulated question fetch failure"));
            }
            self.inner.eligible_questions(filter, domain_id).await
        }
    }
}
