//! Application state module

mod admin;
mod app_state;
mod catalog;
mod form_session;
mod forms;
mod navigator;
mod session;

pub use admin::{AdminState, AdminTab, DeleteTarget, NewUser, PortfolioDraft, QuestionDraft};
pub use app_state::*;
pub use catalog::QuestionCatalog;
pub use form_session::FormSession;
pub use forms::*;
pub use navigator::{Advance, FormScope, StepNavigator, SubmissionRequest, REQUIRED_MESSAGE};
pub use session::{AccessError, Session};

#[cfg(test)]
pub(crate) use catalog::question;
