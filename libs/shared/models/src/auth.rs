use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub user_metadata: Option<serde_json::Value>,
    pub iat: Option<u64>,
}

/// The authenticated user attached to a request by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Full name when known, otherwise the email, otherwise the raw id.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.display_name())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub greeting: String,
}

impl From<&User> for SessionResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            display_name: user.display_name().to_string(),
            greeting: user.greeting(),
        }
    }
}
