use serde::{Deserialize, Serialize};

/// The authenticated identity as seen by this crate: an opaque owner id plus
/// the display email. Its presence gates which entries are visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
}
