//! Blocking REST client for the Watizat backend.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, WatizatError};
use crate::post::{Comment, Post, PostDraft, PostType};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::session::{AuthResponse, LoginRequest, Session};
use crate::volunteer::{ProfessionalArea, Registration, VolunteerProfile};

use super::sidebar::{SidebarContent, SidebarItem};

/// REST client bound to one backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("watizat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an `/api` path
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    /// `GET /api/posts`, optionally filtered by type on the server
    pub fn list_posts(&self, session: &Session, post_type: Option<PostType>) -> Result<Vec<Post>> {
        let mut request = self.request(Method::GET, "posts", Some(session));
        if let Some(post_type) = post_type {
            request = request.query(&[("type", post_type.as_str())]);
        }
        self.execute(request)
    }

    /// Validates the draft locally, then `POST /api/posts`
    pub fn create_post(&self, session: &Session, draft: &PostDraft) -> Result<Post> {
        let body = draft.to_request()?;
        let request = self.request(Method::POST, "posts", Some(session)).json(&body);
        self.execute(request)
    }

    pub fn list_comments(&self, session: &Session, post_id: &str) -> Result<Vec<Comment>> {
        let path = format!("posts/{}/comments", post_id);
        self.execute(self.request(Method::GET, &path, Some(session)))
    }

    /// Blank comments are rejected without a request
    pub fn add_comment(&self, session: &Session, post_id: &str, text: &str) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WatizatError::MissingField { field: "comment" });
        }
        #[derive(Serialize)]
        struct Body<'a> {
            comment: &'a str,
        }
        let path = format!("posts/{}/comments", post_id);
        let request = self
            .request(Method::POST, &path, Some(session))
            .json(&Body { comment: text });
        self.execute(request)
    }

    // ------------------------------------------------------------------
    // Profile & auth
    // ------------------------------------------------------------------

    pub fn profile(&self, session: &Session) -> Result<UserProfile> {
        self.execute(self.request(Method::GET, "profile", Some(session)))
    }

    pub fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> Result<UserProfile> {
        let request = self
            .request(Method::PUT, "profile", Some(session))
            .json(update);
        self.execute(request)
    }

    /// Validates every wizard step, then `POST /api/auth/register`
    pub fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let body = registration.to_request()?;
        self.execute(self.request(Method::POST, "auth/register", None).json(&body))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        if email.trim().is_empty() {
            return Err(WatizatError::MissingField { field: "email" });
        }
        if password.is_empty() {
            return Err(WatizatError::MissingField { field: "password" });
        }
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.execute(self.request(Method::POST, "auth/login", None).json(&body))
    }

    // ------------------------------------------------------------------
    // Volunteers & sidebar
    // ------------------------------------------------------------------

    pub fn list_volunteers(
        &self,
        session: &Session,
        area: Option<ProfessionalArea>,
    ) -> Result<Vec<VolunteerProfile>> {
        let mut request = self.request(Method::GET, "volunteers", Some(session));
        if let Some(area) = area {
            request = request.query(&[("area", area.id())]);
        }
        self.execute(request)
    }

    pub fn sidebar_content(&self, session: Option<&Session>) -> Result<Vec<SidebarItem>> {
        let content: SidebarContent =
            self.execute(self.request(Method::GET, "sidebar-content", session))?;
        Ok(content.items)
    }

    pub fn advertisements(&self) -> Result<Vec<SidebarItem>> {
        self.execute(self.request(Method::GET, "advertisements", None))
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(
            method = method.as_str(),
            url = url.as_str(),
            authenticated = session.is_some(),
            "api request"
        );
        let request = self.http.request(method, url);
        match session {
            Some(session) => request.header(AUTHORIZATION, session.bearer()),
            None => request,
        }
    }

    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        let err = error_from_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "api call failed");
        return Err(err);
    }
    Ok(serde_json::from_str(&body)?)
}

/// Builds an `Http` error, using the server's `detail` message when present
pub(crate) fn error_from_body(status: u16, body: &str) -> WatizatError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        });
    let message = detail.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("HTTP {}", status)
        } else {
            trimmed.chars().take(200).collect()
        }
    });
    WatizatError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = ApiClient::with_client("https://api.example.org/", Client::new());
        assert_eq!(client.base_url(), "https://api.example.org");
        assert_eq!(client.url("posts"), "https://api.example.org/api/posts");
        assert_eq!(
            client.url("/posts/42/comments"),
            "https://api.example.org/api/posts/42/comments"
        );
    }

    #[test]
    fn test_error_from_detail() {
        let err = error_from_body(400, r#"{"detail": "Email already registered"}"#);
        match err {
            WatizatError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = error_from_body(502, "");
        assert_eq!(err.to_string(), "API error (502): HTTP 502");
        let err = error_from_body(500, "Internal Server Error");
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");
    }

    #[test]
    fn test_blank_comment_rejected_before_request() {
        let client = ApiClient::with_client("http://127.0.0.1:9", Client::new());
        let session = Session::new("t").unwrap();
        let err = client.add_comment(&session, "p1", "   ").unwrap_err();
        assert!(matches!(err, WatizatError::MissingField { field: "comment" }));
    }

    #[test]
    fn test_invalid_draft_rejected_before_request() {
        let client = ApiClient::with_client("http://127.0.0.1:9", Client::new());
        let session = Session::new("t").unwrap();
        let draft = PostDraft::new(PostType::Need);
        let err = client.create_post(&session, &draft).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_incomplete_registration_rejected_before_request() {
        let client = ApiClient::with_client("http://127.0.0.1:9", Client::new());
        let err = client.register(&Registration::new()).unwrap_err();
        assert!(matches!(err, WatizatError::IncompleteStep { step: 1, .. }));
    }
}
