use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{types::LoginResponse, MediNetError, Result};

/// Portal role attached to every session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    /// Lowercase wire form, as sent in the login form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Capitalized label used in banner text when no display name is known.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
        }
    }

    /// Parses the lowercase wire form.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "patient" => Ok(Self::Patient),
            other => Err(MediNetError::Credentials(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

/// Per-session credential context, read by the client before each request
/// and never mutated by it.
#[derive(Clone)]
pub struct Credentials {
    /// Bearer token issued at login.
    pub token: String,
    /// CSRF token attached as `X-CSRF-Token`.
    pub csrf_token: String,
    /// Portal user id, interpolated into per-patient endpoint paths.
    pub user_id: u64,
    /// Session role.
    pub role: Role,
    /// Display name, when the server provided one.
    pub name: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}

impl Credentials {
    /// Creates a credential context from already-known values.
    pub fn new(
        token: impl Into<String>,
        csrf_token: impl Into<String>,
        user_id: u64,
        role: Role,
    ) -> Self {
        Self {
            token: token.into(),
            csrf_token: csrf_token.into(),
            user_id,
            role,
            name: None,
        }
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the context from a login response.
    ///
    /// When the server omits `name`, the local part of the login email is
    /// used, matching the portal's login page.
    pub fn from_login(
        email: &str,
        role: Role,
        csrf_token: impl Into<String>,
        response: LoginResponse,
    ) -> Self {
        let name = response
            .name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_owned)
            });
        Self {
            token: response.token,
            csrf_token: csrf_token.into(),
            user_id: response.user_id,
            role,
            name,
        }
    }

    /// Display name, falling back to the role label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.role.label())
    }
}
