//! Application state definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use super::admin::AdminState;
use super::form_session::FormSession;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Portfolios,
    Form,
    Complete,
    Login,
    Submissions,
    SubmissionDetail,
    Builder,
    BuilderEditor,
}

impl View {
    /// Views that own transient input and are skipped when going back
    pub fn is_form_view(&self) -> bool {
        matches!(
            self,
            View::Form | View::Login | View::Complete | View::BuilderEditor
        )
    }
}

/// A portfolio, i.e. one form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<PortfolioCounts>,
}

fn default_true() -> bool {
    true
}

/// Related record counts the server attaches to listed portfolios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioCounts {
    #[serde(default)]
    pub questions: u32,
    #[serde(default)]
    pub submissions: u32,
}

impl Portfolio {
    /// "3 questions · 12 submissions", when the server sent counts
    pub fn counts_label(&self) -> Option<String> {
        self.counts.map(|c| {
            format!(
                "{} question{} · {} submission{}",
                c.questions,
                if c.questions == 1 { "" } else { "s" },
                c.submissions,
                if c.submissions == 1 { "" } else { "s" },
            )
        })
    }
}

/// A single prompt of a multi-step form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub step: u32,
    #[serde(default)]
    pub order: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Advisory only; validation checks emptiness
    #[serde(default)]
    pub min_length: u32,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub portfolio_id: Option<String>,
}

/// Answers keyed by question id
pub type ResponseSet = HashMap<String, String>;

/// Validation messages keyed by question id
pub type ErrorSet = HashMap<String, String>;

/// Portfolio summary embedded in a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRef {
    pub title: String,
    pub slug: String,
}

/// A completed form as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub portfolio_id: Option<String>,
    #[serde(default)]
    pub responses: ResponseSet,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub portfolio: Option<PortfolioRef>,
}

impl Submission {
    pub fn portfolio_title(&self) -> &str {
        self.portfolio
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("General application")
    }
}

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        *self == Role::SuperAdmin
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super admin",
            Role::Admin => "admin",
            Role::Other => "user",
        }
    }
}

/// User returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
}

/// Account as listed on the user management tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Claims of a verified bearer credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    pub role: Role,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Home
    pub portfolios: Vec<Portfolio>,
    pub selected_index: usize,
    pub api_connected: bool,

    // Form filling
    pub form: Option<FormSession>,

    // Review
    pub submissions: Vec<Submission>,
    pub submissions_index: usize,
    pub submission_filter: Option<String>,
    pub review_questions: Vec<Question>,
    pub scroll_offset: usize,

    // Builder
    pub admin: AdminState,

    // Feedback
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Number of rows on the home list (global form + portfolios)
    pub fn home_entry_count(&self) -> usize {
        self.portfolios.len() + 1
    }

    /// Portfolio under the home cursor; `None` is the global form row
    pub fn selected_portfolio(&self) -> Option<&Portfolio> {
        self.selected_index
            .checked_sub(1)
            .and_then(|i| self.portfolios.get(i))
    }

    /// Keep only active portfolios, ordered for display
    pub fn set_portfolios(&mut self, mut portfolios: Vec<Portfolio>) {
        portfolios.retain(|p| p.is_active);
        portfolios.sort_by_key(|p| p.order);
        self.portfolios = portfolios;
        self.selected_index = self.selected_index.min(self.portfolios.len());
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_submission(&self) -> Option<&Submission> {
        self.submissions.get(self.submissions_index)
    }

    /// Title of the portfolio the review list is filtered by
    pub fn submission_filter_label(&self) -> &str {
        self.submission_filter
            .as_deref()
            .and_then(|id| self.portfolios.iter().find(|p| p.id == id))
            .map(|p| p.title.as_str())
            .unwrap_or("All portfolios")
    }

    /// Cycle the review filter: all → each portfolio → all
    pub fn cycle_submission_filter(&mut self) {
        let next = match &self.submission_filter {
            None => self.portfolios.first(),
            Some(current) => self
                .portfolios
                .iter()
                .position(|p| &p.id == current)
                .and_then(|i| self.portfolios.get(i + 1)),
        };
        self.submission_filter = next.map(|p| p.id.clone());
    }

    /// Queue a modal notice
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio(id: &str, order: i32, is_active: bool) -> Portfolio {
        Portfolio {
            id: id.to_string(),
            title: format!("Portfolio {id}"),
            description: String::new(),
            slug: id.to_string(),
            thumbnail: None,
            is_active,
            order,
            counts: None,
        }
    }

    mod models {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_question_from_camel_case_json() {
            let json = r#"{
                "id": "q1",
                "step": 2,
                "order": 3,
                "title": "Why us?",
                "minLength": 10,
                "isRequired": true,
                "portfolioId": "p1"
            }"#;
            let question: Question = serde_json::from_str(json).unwrap();
            assert_eq!(question.id, "q1");
            assert_eq!(question.step, 2);
            assert_eq!(question.order, 3);
            assert_eq!(question.min_length, 10);
            assert!(question.is_required);
            assert!(question.description.is_none());
            assert_eq!(question.portfolio_id.as_deref(), Some("p1"));
        }

        #[test]
        fn test_question_optional_fields_default() {
            let json = r#"{"id": "q1", "step": 1, "title": "Name"}"#;
            let question: Question = serde_json::from_str(json).unwrap();
            assert_eq!(question.order, 0);
            assert_eq!(question.min_length, 0);
            assert!(!question.is_required);
        }

        #[test]
        fn test_portfolio_defaults_to_active() {
            let json = r#"{"id": "p1", "title": "Design", "slug": "design"}"#;
            let portfolio: Portfolio = serde_json::from_str(json).unwrap();
            assert!(portfolio.is_active);
            assert_eq!(portfolio.order, 0);
        }

        #[test]
        fn test_portfolio_counts_from_listing() {
            let json = r#"{
                "id": "p1",
                "title": "Design",
                "slug": "design",
                "_count": {"questions": 1, "submissions": 12}
            }"#;
            let portfolio: Portfolio = serde_json::from_str(json).unwrap();
            assert_eq!(
                portfolio.counts,
                Some(PortfolioCounts {
                    questions: 1,
                    submissions: 12
                })
            );
            assert_eq!(
                portfolio.counts_label().as_deref(),
                Some("1 question · 12 submissions")
            );
        }

        #[test]
        fn test_portfolio_without_counts() {
            let json = r#"{"id": "p1", "title": "Design", "slug": "design"}"#;
            let portfolio: Portfolio = serde_json::from_str(json).unwrap();
            assert!(portfolio.counts_label().is_none());
            let back = serde_json::to_value(&portfolio).unwrap();
            assert!(back.get("_count").is_none());
        }

        #[test]
        fn test_user_account_decodes() {
            let json = r#"{
                "id": "u2",
                "email": "editor@example.com",
                "name": "Editor",
                "role": "SUPER_ADMIN",
                "createdAt": "2025-01-02T03:04:05Z"
            }"#;
            let user: UserAccount = serde_json::from_str(json).unwrap();
            assert_eq!(user.role, Role::SuperAdmin);
            assert!(user.created_at.is_some());
        }

        #[test]
        fn test_role_deserialization() {
            let role: Role = serde_json::from_str("\"SUPER_ADMIN\"").unwrap();
            assert_eq!(role, Role::SuperAdmin);
            let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
            assert_eq!(role, Role::Admin);
            let role: Role = serde_json::from_str("\"EDITOR\"").unwrap();
            assert_eq!(role, Role::Other);
        }

        #[test]
        fn test_role_is_admin() {
            assert!(Role::SuperAdmin.is_admin());
            assert!(Role::Admin.is_admin());
            assert!(!Role::Other.is_admin());
            assert!(Role::SuperAdmin.is_super_admin());
            assert!(!Role::Admin.is_super_admin());
        }

        #[test]
        fn test_submission_without_portfolio() {
            let json = r#"{
                "id": "s1",
                "responses": {"q1": "hello"},
                "completedAt": "2025-01-02T03:04:05Z"
            }"#;
            let submission: Submission = serde_json::from_str(json).unwrap();
            assert_eq!(submission.responses.get("q1").map(String::as_str), Some("hello"));
            assert_eq!(submission.portfolio_title(), "General application");
        }
    }

    mod home {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_portfolios_filters_inactive_and_sorts() {
            let mut state = AppState::default();
            state.set_portfolios(vec![
                portfolio("c", 2, true),
                portfolio("hidden", 0, false),
                portfolio("a", 0, true),
                portfolio("b", 1, true),
            ]);
            let ids: Vec<&str> = state.portfolios.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
        }

        #[test]
        fn test_first_row_is_global_form() {
            let mut state = AppState::default();
            state.set_portfolios(vec![portfolio("a", 0, true)]);
            assert_eq!(state.home_entry_count(), 2);
            assert!(state.selected_portfolio().is_none());
            state.move_selection_down(state.home_entry_count());
            assert_eq!(state.selected_portfolio().map(|p| p.id.as_str()), Some("a"));
        }

        #[test]
        fn test_selection_clamped_when_list_shrinks() {
            let mut state = AppState::default();
            state.selected_index = 5;
            state.set_portfolios(vec![portfolio("a", 0, true)]);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_move_selection_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }
    }

    mod review {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cycle_submission_filter_wraps_to_all() {
            let mut state = AppState::default();
            state.set_portfolios(vec![portfolio("a", 0, true), portfolio("b", 1, true)]);

            assert_eq!(state.submission_filter_label(), "All portfolios");
            state.cycle_submission_filter();
            assert_eq!(state.submission_filter.as_deref(), Some("a"));
            assert_eq!(state.submission_filter_label(), "Portfolio a");
            state.cycle_submission_filter();
            assert_eq!(state.submission_filter.as_deref(), Some("b"));
            state.cycle_submission_filter();
            assert!(state.submission_filter.is_none());
        }

        #[test]
        fn test_cycle_without_portfolios_stays_all() {
            let mut state = AppState::default();
            state.cycle_submission_filter();
            assert!(state.submission_filter.is_none());
        }
    }

    mod notices {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_are_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            assert_eq!(state.error_count(), 2);
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_view_form_views() {
            assert!(View::Form.is_form_view());
            assert!(View::Login.is_form_view());
            assert!(View::BuilderEditor.is_form_view());
            assert!(!View::Builder.is_form_view());
            assert!(!View::Portfolios.is_form_view());
            assert!(!View::Submissions.is_form_view());
        }
    }
}
