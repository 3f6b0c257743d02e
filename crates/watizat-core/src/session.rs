//! Authenticated session, passed explicitly to every call that needs it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WatizatError};
use crate::profile::UserProfile;

/// Bearer token plus the user it belongs to (when known)
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(WatizatError::NotAuthenticated);
        }
        Ok(Self {
            token: token.trim().to_string(),
            user: None,
        })
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// First non-empty token from the candidates, in priority order
    pub fn resolve<I, S>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .flatten()
            .map(Into::into)
            .find(|t: &String| !t.trim().is_empty())
            .ok_or(WatizatError::NotAuthenticated)
            .and_then(Self::new)
    }
}

/// Response of register/login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    pub fn into_session(self) -> Result<Session> {
        Ok(Session::new(self.token)?.with_user(self.user))
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
