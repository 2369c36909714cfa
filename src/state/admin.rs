//! Form builder state: portfolio, question and user management
//!
//! Only super administrators reach this state. Lists here are the raw
//! server view, so inactive portfolios are included.

use serde::Serialize;

use super::app_state::{Portfolio, Question, Role, UserAccount};
use super::forms::EditorForm;

/// Tabs of the builder view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Portfolios,
    Questions,
    Users,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Portfolios, AdminTab::Questions, AdminTab::Users];

    pub fn title(&self) -> &'static str {
        match self {
            AdminTab::Portfolios => "Portfolios",
            AdminTab::Questions => "Questions",
            AdminTab::Users => "Users",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AdminTab::Portfolios => 0,
            AdminTab::Questions => 1,
            AdminTab::Users => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Record waiting for a y/n confirmation before it is deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Portfolio { id: String, title: String },
    Question { id: String, title: String },
}

impl DeleteTarget {
    pub fn title(&self) -> &str {
        match self {
            DeleteTarget::Portfolio { title, .. } | DeleteTarget::Question { title, .. } => title,
        }
    }

    /// Extra warning shown in the confirmation dialog
    pub fn warning(&self) -> &'static str {
        match self {
            DeleteTarget::Portfolio { .. } => {
                "Its questions and submissions are deleted with it."
            }
            DeleteTarget::Question { .. } => "Answers already submitted are kept.",
        }
    }
}

/// Body of a portfolio create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub is_active: bool,
    pub order: i32,
}

/// Body of a question create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub portfolio_id: String,
    pub step: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub min_length: u32,
    pub order: i32,
    pub is_required: bool,
}

/// Body of a user creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Default)]
pub struct AdminState {
    pub tab: AdminTab,
    pub portfolios: Vec<Portfolio>,
    pub questions: Vec<Question>,
    pub users: Vec<UserAccount>,
    /// Portfolio whose questions the questions tab shows
    pub question_portfolio: Option<String>,
    pub selected_index: usize,
    pub editor: Option<EditorForm>,
    pub pending_delete: Option<DeleteTarget>,
}

impl AdminState {
    /// Store the full portfolio list and keep the questions tab pointed at
    /// a portfolio that still exists
    pub fn set_portfolios(&mut self, mut portfolios: Vec<Portfolio>) {
        portfolios.sort_by_key(|p| p.order);
        self.portfolios = portfolios;

        let still_there = self
            .question_portfolio
            .as_deref()
            .is_some_and(|id| self.portfolios.iter().any(|p| p.id == id));
        if !still_there {
            self.question_portfolio = self.portfolios.first().map(|p| p.id.clone());
            self.questions.clear();
        }
        self.clamp_selection();
    }

    /// Questions of the selected portfolio, by step then order
    pub fn set_questions(&mut self, mut questions: Vec<Question>) {
        questions.sort_by_key(|q| (q.step, q.order));
        self.questions = questions;
        self.clamp_selection();
    }

    pub fn set_users(&mut self, users: Vec<UserAccount>) {
        self.users = users;
        self.clamp_selection();
    }

    pub fn switch_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
        self.selected_index = 0;
    }

    /// Rows in the current tab
    pub fn row_count(&self) -> usize {
        match self.tab {
            AdminTab::Portfolios => self.portfolios.len(),
            AdminTab::Questions => self.questions.len(),
            AdminTab::Users => self.users.len(),
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.row_count() {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.row_count().saturating_sub(1));
    }

    pub fn selected_portfolio(&self) -> Option<&Portfolio> {
        match self.tab {
            AdminTab::Portfolios => self.portfolios.get(self.selected_index),
            _ => None,
        }
    }

    pub fn selected_question(&self) -> Option<&Question> {
        match self.tab {
            AdminTab::Questions => self.questions.get(self.selected_index),
            _ => None,
        }
    }

    /// Title of the portfolio the questions tab is showing
    pub fn question_portfolio_title(&self) -> &str {
        self.question_portfolio
            .as_deref()
            .and_then(|id| self.portfolios.iter().find(|p| p.id == id))
            .map(|p| p.title.as_str())
            .unwrap_or("No portfolio")
    }

    /// Point the questions tab at the next portfolio, wrapping around
    pub fn cycle_question_portfolio(&mut self) {
        if self.portfolios.is_empty() {
            return;
        }
        let next = self
            .question_portfolio
            .as_deref()
            .and_then(|id| self.portfolios.iter().position(|p| p.id == id))
            .map_or(0, |i| (i + 1) % self.portfolios.len());
        self.question_portfolio = Some(self.portfolios[next].id.clone());
        self.questions.clear();
        self.selected_index = 0;
    }

    /// What `d` would delete on the current row
    pub fn delete_target(&self) -> Option<DeleteTarget> {
        if let Some(p) = self.selected_portfolio() {
            return Some(DeleteTarget::Portfolio {
                id: p.id.clone(),
                title: p.title.clone(),
            });
        }
        self.selected_question().map(|q| DeleteTarget::Question {
            id: q.id.clone(),
            title: q.title.clone(),
        })
    }

    /// Forget everything loaded under a credential
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::question;

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

    mod lists {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_builder_keeps_inactive_portfolios() {
            let mut admin = AdminState::default();
            admin.set_portfolios(vec![portfolio("b", 1, true), portfolio("a", 0, false)]);
            let ids: Vec<&str> = admin.portfolios.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        }

        #[test]
        fn test_question_portfolio_defaults_to_first() {
            let mut admin = AdminState::default();
            admin.set_portfolios(vec![portfolio("b", 1, true), portfolio("a", 0, true)]);
            assert_eq!(admin.question_portfolio.as_deref(), Some("a"));
            assert_eq!(admin.question_portfolio_title(), "Portfolio a");
        }

        #[test]
        fn test_deleted_question_portfolio_is_replaced() {
            let mut admin = AdminState::default();
            admin.set_portfolios(vec![portfolio("a", 0, true), portfolio("b", 1, true)]);
            admin.cycle_question_portfolio();
            admin.set_questions(vec![question("q", 1, 0, true)]);
            assert_eq!(admin.question_portfolio.as_deref(), Some("b"));

            admin.set_portfolios(vec![portfolio("a", 0, true)]);
            assert_eq!(admin.question_portfolio.as_deref(), Some("a"));
            assert!(admin.questions.is_empty());
        }

        #[test]
        fn test_cycle_question_portfolio_wraps() {
            let mut admin = AdminState::default();
            admin.cycle_question_portfolio();
            assert!(admin.question_portfolio.is_none());

            admin.set_portfolios(vec![portfolio("a", 0, true), portfolio("b", 1, true)]);
            admin.cycle_question_portfolio();
            assert_eq!(admin.question_portfolio.as_deref(), Some("b"));
            admin.cycle_question_portfolio();
            assert_eq!(admin.question_portfolio.as_deref(), Some("a"));
        }

        #[test]
        fn test_questions_sorted_by_step_then_order() {
            let mut admin = AdminState::default();
            admin.set_questions(vec![
                question("c", 2, 0, false),
                question("b", 1, 1, false),
                question("a", 1, 0, false),
            ]);
            let ids: Vec<&str> = admin.questions.iter().map(|q| q.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_selection_follows_tab() {
            let mut admin = AdminState::default();
            admin.set_portfolios(vec![portfolio("a", 0, true), portfolio("b", 1, true)]);
            admin.move_selection_down();
            admin.move_selection_down();
            assert_eq!(admin.selected_index, 1);
            assert_eq!(admin.selected_portfolio().map(|p| p.id.as_str()), Some("b"));

            admin.switch_tab(AdminTab::Questions);
            assert_eq!(admin.selected_index, 0);
            assert!(admin.selected_portfolio().is_none());
            assert!(admin.selected_question().is_none());
        }

        #[test]
        fn test_selection_clamped_when_list_shrinks() {
            let mut admin = AdminState::default();
            admin.switch_tab(AdminTab::Questions);
            admin.set_questions(vec![question("a", 1, 0, false), question("b", 1, 1, false)]);
            admin.move_selection_down();
            admin.set_questions(vec![question("a", 1, 0, false)]);
            assert_eq!(admin.selected_index, 0);
        }

        #[test]
        fn test_delete_target_per_tab() {
            let mut admin = AdminState::default();
            admin.set_portfolios(vec![portfolio("a", 0, true)]);
            assert_eq!(
                admin.delete_target(),
                Some(DeleteTarget::Portfolio {
                    id: "a".to_string(),
                    title: "Portfolio a".to_string()
                })
            );

            admin.switch_tab(AdminTab::Questions);
            admin.set_questions(vec![question("q", 1, 0, false)]);
            assert_eq!(
                admin.delete_target().as_ref().map(DeleteTarget::title),
                Some("Question q")
            );

            admin.switch_tab(AdminTab::Users);
            assert!(admin.delete_target().is_none());
        }

        #[test]
        fn test_tab_cycle() {
            assert_eq!(AdminTab::Portfolios.next(), AdminTab::Questions);
            assert_eq!(AdminTab::Users.next(), AdminTab::Portfolios);
            assert_eq!(AdminTab::Portfolios.prev(), AdminTab::Users);
        }
    }

    mod payloads {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_question_draft_wire_shape() {
            let draft = QuestionDraft {
                portfolio_id: "p1".to_string(),
                step: 2,
                title: "Why us?".to_string(),
                description: None,
                thumbnail: None,
                min_length: 10,
                order: 0,
                is_required: true,
            };
            assert_eq!(
                serde_json::to_value(&draft).unwrap(),
                serde_json::json!({
                    "portfolioId": "p1",
                    "step": 2,
                    "title": "Why us?",
                    "minLength": 10,
                    "order": 0,
                    "isRequired": true
                })
            );
        }

        #[test]
        fn test_new_user_role_on_the_wire() {
            let user = NewUser {
                email: "a@b.c".to_string(),
                password: "pw".to_string(),
                name: "A".to_string(),
                role: Role::SuperAdmin,
            };
            let json = serde_json::to_value(&user).unwrap();
            assert_eq!(json["role"], "SUPER_ADMIN");
        }
    }
}
