//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned by the server
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl User {
    /// Build a user from client-supplied fields under the given identity.
    ///
    /// Any id carried by the draft is ignored.
    pub fn from_draft(id: Uuid, draft: UserDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
        }
    }
}

/// Client-supplied user fields, used for both create and full-replace update.
///
/// Missing fields deserialize to empty strings so they are reported as
/// `Required` violations rather than as malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    /// Ignored; identity is assigned by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[cfg_attr(feature = "openapi", schema(max_length = 100))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(max_length = 100))]
    pub last_name: String,
    #[cfg_attr(feature = "openapi", schema(max_length = 255))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(min_length = 9, max_length = 9))]
    pub phone_number: String,
}
