use serde::{Serialize, Deserialize};

/// The authenticated caller, as carried by either auth strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub subject: String,
    pub username: String,
    pub user_id: Option<i64>,
    pub is_admin: bool,
}

impl Identity {
    pub fn admin(username: &str) -> Self {
        Identity {
            subject: format!("admin:{}", username),
            username: username.to_string(),
            user_id: None,
            is_admin: true,
        }
    }

    pub fn customer(user_id: i64, username: &str) -> Self {
        Identity {
            subject: format!("user:{}", user_id),
            username: username.to_string(),
            user_id: Some(user_id),
            is_admin: false,
        }
    }

    /// Name recorded against moderation decisions.
    pub fn moderator(&self) -> &str {
        if self.username.trim().is_empty() {
            "admin"
        } else {
            &self.username
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub uid: Option<i64>,
    pub admin: bool,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            subject: claims.sub,
            username: claims.username,
            user_id: claims.uid,
            is_admin: claims.admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
