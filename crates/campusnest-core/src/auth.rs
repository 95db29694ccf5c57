use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `"STUDENT"` or `"AGENT"` on the current backend.
    #[serde(default)]
    pub role: Option<String>,
}

/// Signed-in state persisted under the auth storage key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: UserSummary,
}

impl AuthSession {
    #[must_use]
    pub fn is_agent(&self) -> bool {
        self.user
            .role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("agent"))
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[redacted]")
            .field("user", &self.user)
            .finish()
    }
}
