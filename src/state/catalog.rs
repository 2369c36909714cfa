//! Question catalog for one form session
//!
//! The catalog is a snapshot taken when the session starts. A failed fetch
//! resolves to an empty catalog so the form can still render its empty state.

use tracing::{info, warn};

use super::Question;
use crate::api::ApiClientTrait;

/// Minimum number of steps a form presents
pub const MIN_STEPS: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Fetch the questions, optionally scoped to one portfolio
    pub async fn load(client: &dyn ApiClientTrait, portfolio_id: Option<&str>) -> Self {
        match client.list_questions(portfolio_id.map(str::to_string)).await {
            Ok(questions) => {
                info!(
                    count = questions.len(),
                    portfolio = portfolio_id.unwrap_or("-"),
                    "Loaded question catalog"
                );
                Self::new(questions)
            }
            Err(e) => {
                warn!("Failed to load questions: {e}");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Highest step number, never below [`MIN_STEPS`]
    pub fn max_step(&self) -> u32 {
        self.questions
            .iter()
            .map(|q| q.step)
            .max()
            .unwrap_or(0)
            .max(MIN_STEPS)
    }

    /// Questions of one step in display order
    pub fn questions_for_step(&self, step: u32) -> Vec<&Question> {
        let mut questions: Vec<&Question> =
            self.questions.iter().filter(|q| q.step == step).collect();
        // sort_by_key is stable: equal orders keep fetch order
        questions.sort_by_key(|q| q.order);
        questions
    }
}

#[cfg(test)]
pub(crate) fn question(id: &str, step: u32, order: i32, is_required: bool) -> Question {
    Question {
        id: id.to_string(),
        step,
        order,
        title: format!("Question {id}"),
        description: None,
        thumbnail: None,
        min_length: 0,
        is_required,
        portfolio_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::error::ApiError;

    fn ids(questions: &[&Question]) -> Vec<String> {
        questions.iter().map(|q| q.id.clone()).collect()
    }

    mod max_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_catalog_has_floor() {
            assert_eq!(QuestionCatalog::default().max_step(), MIN_STEPS);
        }

        #[test]
        fn test_low_steps_use_floor() {
            let catalog = QuestionCatalog::new(vec![
                question("a", 1, 0, false),
                question("b", 3, 0, false),
            ]);
            assert_eq!(catalog.max_step(), 5);
        }

        #[test]
        fn test_high_step_raises_max() {
            let catalog = QuestionCatalog::new(vec![
                question("a", 1, 0, false),
                question("b", 8, 0, false),
            ]);
            assert_eq!(catalog.max_step(), 8);
        }
    }

    mod questions_for_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_filters_by_step() {
            let catalog = QuestionCatalog::new(vec![
                question("a", 1, 0, false),
                question("b", 2, 0, false),
                question("c", 1, 1, false),
            ]);
            assert_eq!(ids(&catalog.questions_for_step(1)), vec!["a", "c"]);
            assert_eq!(ids(&catalog.questions_for_step(2)), vec!["b"]);
            assert!(catalog.questions_for_step(3).is_empty());
        }

        #[test]
        fn test_sorted_by_order() {
            let catalog = QuestionCatalog::new(vec![
                question("late", 1, 5, false),
                question("early", 1, -1, false),
                question("middle", 1, 2, false),
            ]);
            assert_eq!(
                ids(&catalog.questions_for_step(1)),
                vec!["early", "middle", "late"]
            );
        }

        #[test]
        fn test_equal_order_keeps_fetch_order() {
            let catalog = QuestionCatalog::new(vec![
                question("x", 1, 1, false),
                question("first", 1, 0, false),
                question("second", 1, 0, false),
                question("third", 1, 0, false),
            ]);
            assert_eq!(
                ids(&catalog.questions_for_step(1)),
                vec!["first", "second", "third", "x"]
            );
        }
    }

    mod load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_load_passes_scope() {
            let mut client = MockApiClientTrait::new();
            client
                .expect_list_questions()
                .withf(|scope| scope.as_deref() == Some("p1"))
                .times(1)
                .returning(|_| Ok(vec![question("a", 1, 0, true)]));

            let catalog = QuestionCatalog::load(&client, Some("p1")).await;
            assert_eq!(catalog.len(), 1);
        }

        #[tokio::test]
        async fn test_load_global_sends_no_scope() {
            let mut client = MockApiClientTrait::new();
            client
                .expect_list_questions()
                .withf(|scope| scope.is_none())
                .times(1)
                .returning(|_| Ok(Vec::new()));

            let catalog = QuestionCatalog::load(&client, None).await;
            assert!(catalog.is_empty());
        }

        #[tokio::test]
        async fn test_load_failure_resolves_to_empty() {
            let mut client = MockApiClientTrait::new();
            client.expect_list_questions().returning(|_| {
                Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                })
            });

            let catalog = QuestionCatalog::load(&client, None).await;
            assert!(catalog.is_empty());
            assert_eq!(catalog.max_step(), MIN_STEPS);
        }
    }
}
