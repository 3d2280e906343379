use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric user identifier
pub type UserId = u64;

/// Number of users the API returns per page
pub const PER_PAGE: u32 = 6;

/// Placeholder avatar used when a record has none
pub const DEFAULT_AVATAR: &str = "https://reqres.in/img/faces/1-image.jpg";

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

/// User record as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, unique within a collection
    pub id: UserId,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Avatar image URL
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

impl User {
    /// Build the local copy of a freshly created user.
    ///
    /// A missing or blank avatar falls back to [`DEFAULT_AVATAR`].
    pub fn from_draft(id: UserId, draft: NewUser) -> Self {
        let avatar = draft
            .avatar
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(default_avatar);

        Self {
            id,
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            avatar,
        }
    }

    /// Case-insensitive substring match over first name, last name and email.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// One page of the user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    /// Page number that was requested (1-based)
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Total number of users across all pages
    pub total: u32,
    /// Number of pages
    pub total_pages: u32,
    /// Users on this page, in server order
    pub data: Vec<User>,
}

/// Single user wrapped the way `GET /users/{id}` returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub data: User,
}

/// Draft submitted to `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial update submitted to `PUT /users/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    /// Patch that sets all three editable fields
    pub fn full(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// Merge the supplied fields into `user`. Id and avatar are never touched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
    }
}

/// Response of `POST /users`: the request body echoed back plus `id` and `createdAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    /// Upstream sends either a number or a numeric string here
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Echoed request fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CreatedUser {
    /// The echoed id coerced to a number.
    ///
    /// Returns `None` when the id is absent, zero, negative, fractional or not
    /// numeric.
    pub fn numeric_id(&self) -> Option<UserId> {
        let id = match self.id.as_ref()? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<UserId>().ok(),
            _ => None,
        }?;

        (id != 0).then_some(id)
    }
}

/// Response of `PUT /users/{id}`: the request body echoed back plus `updatedAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedUser {
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
