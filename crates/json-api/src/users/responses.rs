//! User Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispatch_app::domain::users::records::UserRecord;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub username: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,

    /// `user` or `admin`
    pub role: String,

    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.into_i64(),
            uuid: user.uuid.into_uuid(),
            username: user.username,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}
