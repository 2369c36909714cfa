//! One form-filling session: scope, loading phase, navigator and focus

use super::catalog::QuestionCatalog;
use super::navigator::{FormScope, StepNavigator};

#[derive(Debug, Clone)]
pub struct FormSession {
    /// Tags background results so late ones from a closed session are dropped
    pub id: u64,
    pub scope: FormScope,
    navigator: Option<StepNavigator>,
    /// Index of the focused question within the current step
    pub focused: usize,
}

impl FormSession {
    pub fn new(id: u64, scope: FormScope) -> Self {
        Self {
            id,
            scope,
            navigator: None,
            focused: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.navigator.is_none()
    }

    pub fn navigator(&self) -> Option<&StepNavigator> {
        self.navigator.as_ref()
    }

    pub fn navigator_mut(&mut self) -> Option<&mut StepNavigator> {
        self.navigator.as_mut()
    }

    /// Start navigating once the catalog snapshot has arrived
    pub fn catalog_loaded(&mut self, catalog: QuestionCatalog) {
        self.navigator = Some(StepNavigator::new(self.scope.clone(), catalog));
        self.focused = 0;
    }

    fn step_question_count(&self) -> usize {
        self.navigator
            .as_ref()
            .map(|n| n.current_questions().len())
            .unwrap_or(0)
    }

    pub fn focused_question_id(&self) -> Option<String> {
        let navigator = self.navigator.as_ref()?;
        navigator
            .current_questions()
            .get(self.focused)
            .map(|q| q.id.clone())
    }

    pub fn focus_next(&mut self) {
        let count = self.step_question_count();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.step_question_count();
        if count > 0 {
            self.focused = if self.focused == 0 {
                count - 1
            } else {
                self.focused - 1
            };
        }
    }

    /// Scroll back to the top of the step
    pub fn reset_focus(&mut self) {
        self.focused = 0;
    }

    /// Append a character to the focused answer
    pub fn input_char(&mut self, c: char) {
        if let Some(id) = self.focused_question_id() {
            if let Some(navigator) = self.navigator.as_mut() {
                let mut text = navigator.answer(&id).to_string();
                text.push(c);
                navigator.record_answer(&id, text);
            }
        }
    }

    /// Remove the last character of the focused answer
    pub fn backspace(&mut self) {
        if let Some(id) = self.focused_question_id() {
            if let Some(navigator) = self.navigator.as_mut() {
                let mut text = navigator.answer(&id).to_string();
                text.pop();
                navigator.record_answer(&id, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::question;

    fn loaded_session() -> FormSession {
        let mut session = FormSession::new(1, FormScope::Global);
        session.catalog_loaded(QuestionCatalog::new(vec![
            question("b", 1, 1, true),
            question("a", 1, 0, true),
            question("c", 2, 0, false),
        ]));
        session
    }

    #[test]
    fn test_loading_until_catalog_arrives() {
        let mut session = FormSession::new(1, FormScope::Global);
        assert!(session.is_loading());
        assert!(session.focused_question_id().is_none());
        session.input_char('x');
        session.catalog_loaded(QuestionCatalog::default());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_focus_follows_display_order_and_wraps() {
        let mut session = loaded_session();
        assert_eq!(session.focused_question_id().as_deref(), Some("a"));
        session.focus_next();
        assert_eq!(session.focused_question_id().as_deref(), Some("b"));
        session.focus_next();
        assert_eq!(session.focused_question_id().as_deref(), Some("a"));
        session.focus_prev();
        assert_eq!(session.focused_question_id().as_deref(), Some("b"));
    }

    #[test]
    fn test_typing_edits_focused_answer() {
        let mut session = loaded_session();
        session.input_char('h');
        session.input_char('i');
        session.input_char('!');
        session.backspace();
        let navigator = session.navigator().unwrap();
        assert_eq!(navigator.answer("a"), "hi");
        assert_eq!(navigator.answer("b"), "");
    }

    #[test]
    fn test_typing_clears_focused_error() {
        let mut session = loaded_session();
        session.navigator_mut().unwrap().advance();
        session.input_char('x');
        let navigator = session.navigator().unwrap();
        assert!(navigator.error("a").is_none());
        assert!(navigator.error("b").is_some());
    }

    #[test]
    fn test_focus_on_empty_step_is_noop() {
        let mut session = FormSession::new(1, FormScope::Global);
        session.catalog_loaded(QuestionCatalog::default());
        session.focus_next();
        session.focus_prev();
        assert_eq!(session.focused, 0);
        session.backspace();
    }
}
