//! Trait abstraction for the API client to enable mocking in tests

use async_trait::async_trait;

use super::client::LoginResponse;
use crate::error::ApiError;
use crate::state::{
    NewUser, Portfolio, PortfolioDraft, Question, QuestionDraft, Submission, SubmissionRequest,
    TokenClaims, UserAccount,
};

/// Operations the client needs from the portfolio server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// List all portfolios
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, ApiError>;

    /// Look up one portfolio by slug; `None` if there is no such portfolio
    async fn get_portfolio(&self, slug: &str) -> Result<Option<Portfolio>, ApiError>;

    /// List questions, optionally only those of one portfolio
    async fn list_questions(&self, portfolio_id: Option<String>) -> Result<Vec<Question>, ApiError>;

    /// Post a completed form
    async fn submit(&self, request: SubmissionRequest) -> Result<(), ApiError>;

    /// Exchange email and password for a bearer credential
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Check a bearer credential; `None` if it is no longer valid
    async fn verify_token(&self, token: &str) -> Result<Option<TokenClaims>, ApiError>;

    /// List submissions (admin only), optionally only those of one portfolio
    async fn list_submissions(
        &self,
        token: &str,
        portfolio_id: Option<String>,
    ) -> Result<Vec<Submission>, ApiError>;

    // Builder operations, all bearer-authenticated

    async fn create_portfolio(&self, token: &str, draft: PortfolioDraft) -> Result<(), ApiError>;

    async fn update_portfolio(
        &self,
        token: &str,
        id: String,
        draft: PortfolioDraft,
    ) -> Result<(), ApiError>;

    /// Delete a portfolio together with its questions and submissions
    async fn delete_portfolio(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn create_question(&self, token: &str, draft: QuestionDraft) -> Result<(), ApiError>;

    async fn update_question(
        &self,
        token: &str,
        id: String,
        draft: QuestionDraft,
    ) -> Result<(), ApiError>;

    async fn delete_question(&self, token: &str, id: &str) -> Result<(), ApiError>;

    /// List administrator accounts (super admin only)
    async fn list_users(&self, token: &str) -> Result<Vec<UserAccount>, ApiError>;

    async fn create_user(&self, token: &str, user: NewUser) -> Result<(), ApiError>;
}
