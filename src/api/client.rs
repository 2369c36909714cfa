//! HTTP client for the portfolio API
//!
//! All endpoints speak JSON. Failed requests carry an `{ "error": "..." }`
//! body whose message is surfaced to the user as-is.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::traits::ApiClientTrait;
use crate::error::ApiError;
use crate::state::{
    AuthUser, NewUser, Portfolio, PortfolioDraft, Question, QuestionDraft, Submission,
    SubmissionRequest, TokenClaims, UserAccount,
};

/// Shown when a failed submission carries no message of its own
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while submitting.";

/// Shown when a failed login carries no message of its own
pub const LOGIN_FAILED_MESSAGE: &str = "Sign-in failed.";

/// Credential issued by the login endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct PortfoliosEnvelope {
    portfolios: Vec<Portfolio>,
}

#[derive(Deserialize)]
struct PortfolioEnvelope {
    portfolio: Portfolio,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct SubmissionsEnvelope {
    submissions: Vec<Submission>,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<UserAccount>,
}

/// Update bodies carry the record id next to the edited fields
#[derive(Serialize)]
struct WithId<'a, T> {
    id: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for communicating with the portfolio server
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL below the base, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Decode a successful body or turn the failure into [`ApiError::Status`]
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send a request whose success body is not needed
    async fn send_for_status(request: RequestBuilder, fallback: &str) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
        })
    }
}

/// Message of an `{ "error": ... }` body, if there is a non-blank one
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

fn request_failed(status: reqwest::StatusCode) -> String {
    format!("Request failed (HTTP {})", status.as_u16())
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, ApiError> {
        let url = self.endpoint(&["api", "portfolios"])?;
        debug!(%url, "Listing portfolios");

        let response = self.http.get(url).send().await?;
        let fallback = request_failed(response.status());
        let envelope: PortfoliosEnvelope = Self::read_json(response, &fallback).await?;
        Ok(envelope.portfolios)
    }

    async fn get_portfolio(&self, slug: &str) -> Result<Option<Portfolio>, ApiError> {
        let url = self.endpoint(&["api", "portfolios", slug])?;
        debug!(%url, "Fetching portfolio");

        let response = self.http.get(url).send().await?;
        let fallback = request_failed(response.status());
        match Self::read_json::<PortfolioEnvelope>(response, &fallback).await {
            Ok(envelope) => Ok(Some(envelope.portfolio)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_questions(
        &self,
        portfolio_id: Option<String>,
    ) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&["api", "questions"])?;
        debug!(%url, portfolio = portfolio_id.as_deref().unwrap_or("-"), "Listing questions");

        let mut request = self.http.get(url);
        if let Some(id) = &portfolio_id {
            request = request.query(&[("portfolioId", id)]);
        }
        let response = request.send().await?;
        let fallback = request_failed(response.status());
        let envelope: QuestionsEnvelope = Self::read_json(response, &fallback).await?;
        Ok(envelope.questions)
    }

    async fn submit(&self, request: SubmissionRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "submissions"])?;
        debug!(%url, answers = request.responses.len(), "Posting submission");

        Self::send_for_status(self.http.post(url).json(&request), SUBMIT_FAILED_MESSAGE).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        debug!(%url, email, "Signing in");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::read_json(response, LOGIN_FAILED_MESSAGE).await
    }

    async fn verify_token(&self, token: &str) -> Result<Option<TokenClaims>, ApiError> {
        let url = self.endpoint(&["api", "auth", "verify"])?;
        debug!(%url, "Verifying credential");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let fallback = request_failed(response.status());
        match Self::read_json::<TokenClaims>(response, &fallback).await {
            Ok(claims) => Ok(Some(claims)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_submissions(
        &self,
        token: &str,
        portfolio_id: Option<String>,
    ) -> Result<Vec<Submission>, ApiError> {
        let url = self.endpoint(&["api", "submissions"])?;
        debug!(%url, portfolio = portfolio_id.as_deref().unwrap_or("-"), "Listing submissions");

        let mut request = self.http.get(url).bearer_auth(token);
        if let Some(id) = &portfolio_id {
            request = request.query(&[("portfolioId", id)]);
        }
        let response = request.send().await?;
        let fallback = request_failed(response.status());
        let envelope: SubmissionsEnvelope = Self::read_json(response, &fallback).await?;
        Ok(envelope.submissions)
    }

    async fn create_portfolio(&self, token: &str, draft: PortfolioDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "portfolios"])?;
        debug!(%url, slug = %draft.slug, "Creating portfolio");

        let request = self.http.post(url).bearer_auth(token).json(&draft);
        Self::send_for_status(request, "Could not save the portfolio.").await
    }

    async fn update_portfolio(
        &self,
        token: &str,
        id: String,
        draft: PortfolioDraft,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "portfolios"])?;
        debug!(%url, %id, "Updating portfolio");

        let body = WithId {
            id: &id,
            body: &draft,
        };
        let request = self.http.put(url).bearer_auth(token).json(&body);
        Self::send_for_status(request, "Could not save the portfolio.").await
    }

    async fn delete_portfolio(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "portfolios"])?;
        debug!(%url, id, "Deleting portfolio");

        let request = self.http.delete(url).bearer_auth(token).query(&[("id", id)]);
        Self::send_for_status(request, "Could not delete the portfolio.").await
    }

    async fn create_question(&self, token: &str, draft: QuestionDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "questions"])?;
        debug!(%url, portfolio = %draft.portfolio_id, step = draft.step, "Creating question");

        let request = self.http.post(url).bearer_auth(token).json(&draft);
        Self::send_for_status(request, "Could not save the question.").await
    }

    async fn update_question(
        &self,
        token: &str,
        id: String,
        draft: QuestionDraft,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "questions"])?;
        debug!(%url, %id, "Updating question");

        let body = WithId {
            id: &id,
            body: &draft,
        };
        let request = self.http.put(url).bearer_auth(token).json(&body);
        Self::send_for_status(request, "Could not save the question.").await
    }

    async fn delete_question(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "questions"])?;
        debug!(%url, id, "Deleting question");

        let request = self.http.delete(url).bearer_auth(token).query(&[("id", id)]);
        Self::send_for_status(request, "Could not delete the question.").await
    }

    async fn list_users(&self, token: &str) -> Result<Vec<UserAccount>, ApiError> {
        let url = self.endpoint(&["api", "users", "list"])?;
        debug!(%url, "Listing users");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let fallback = request_failed(response.status());
        let envelope: UsersEnvelope = Self::read_json(response, &fallback).await?;
        Ok(envelope.users)
    }

    async fn create_user(&self, token: &str, user: NewUser) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "users", "create"])?;
        debug!(%url, email = %user.email, role = user.role.label(), "Creating user");

        let request = self.http.post(url).bearer_auth(token).json(&user);
        Self::send_for_status(request, "Could not create the user.").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).unwrap()
    }

    mod endpoints {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_endpoint_from_bare_host() {
            let url = client("http://localhost:3000")
                .endpoint(&["api", "questions"])
                .unwrap();
            assert_eq!(url.as_str(), "http://localhost:3000/api/questions");
        }

        #[test]
        fn test_endpoint_keeps_base_path() {
            let url = client("https://example.com/forms/")
                .endpoint(&["api", "portfolios"])
                .unwrap();
            assert_eq!(url.as_str(), "https://example.com/forms/api/portfolios");
        }

        #[test]
        fn test_endpoint_escapes_segments() {
            let url = client("http://localhost:3000")
                .endpoint(&["api", "portfolios", "a b/c"])
                .unwrap();
            assert_eq!(url.as_str(), "http://localhost:3000/api/portfolios/a%20b%2Fc");
        }

        #[test]
        fn test_invalid_base_url() {
            let result = ApiClient::new("not a url", Duration::from_secs(1));
            assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
        }

        #[test]
        fn test_non_base_url_rejected() {
            let result = ApiClient::new("mailto:admin@example.com", Duration::from_secs(1));
            assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
        }
    }

    mod bodies {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_message_from_body() {
            let body = br#"{"error": "Portfolio id and responses are required."}"#;
            assert_eq!(
                error_message(body).as_deref(),
                Some("Portfolio id and responses are required.")
            );
        }

        #[test]
        fn test_error_message_missing_or_blank() {
            assert!(error_message(b"{}").is_none());
            assert!(error_message(br#"{"error": "  "}"#).is_none());
            assert!(error_message(b"<html>502</html>").is_none());
        }

        #[test]
        fn test_login_response_decodes() {
            let body = r#"{
                "token": "jwt",
                "user": {"id": "u1", "email": "a@b.c", "name": "A", "role": "ADMIN"}
            }"#;
            let login: LoginResponse = serde_json::from_str(body).unwrap();
            assert_eq!(login.token, "jwt");
            assert!(login.user.role.is_admin());
        }

        #[test]
        fn test_questions_envelope_decodes() {
            let body = r#"{"questions": [{"id": "q", "step": 1, "title": "T", "isRequired": true}]}"#;
            let envelope: QuestionsEnvelope = serde_json::from_str(body).unwrap();
            assert_eq!(envelope.questions.len(), 1);
            assert!(envelope.questions[0].is_required);
        }

        #[test]
        fn test_login_request_shape() {
            let json = serde_json::to_value(LoginRequest {
                email: "a@b.c",
                password: "pw",
            })
            .unwrap();
            assert_eq!(json, serde_json::json!({"email": "a@b.c", "password": "pw"}));
        }

        #[test]
        fn test_update_body_carries_id() {
            let draft = PortfolioDraft {
                title: "Design".to_string(),
                description: String::new(),
                slug: "design".to_string(),
                thumbnail: None,
                is_active: true,
                order: 2,
            };
            let json = serde_json::to_value(WithId {
                id: "p1",
                body: &draft,
            })
            .unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "id": "p1",
                    "title": "Design",
                    "description": "",
                    "slug": "design",
                    "isActive": true,
                    "order": 2
                })
            );
        }

        #[test]
        fn test_users_envelope_decodes() {
            let body = r#"{"users": [{"id": "u1", "email": "a@b.c", "name": "A", "role": "ADMIN"}]}"#;
            let envelope: UsersEnvelope = serde_json::from_str(body).unwrap();
            assert_eq!(envelope.users.len(), 1);
            assert!(envelope.users[0].created_at.is_none());
        }

        #[test]
        fn test_request_failed_message() {
            assert_eq!(
                request_failed(reqwest::StatusCode::BAD_GATEWAY),
                "Request failed (HTTP 502)"
            );
        }
    }
}
