//! Form domain layer
//!
//! Text-input forms outside the multi-step flow: the admin login and the
//! builder editors.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{
    EditorForm, EditorSave, Form, LoginForm, PortfolioForm, QuestionForm, UserForm,
};
