use crate::UserId;

/// Feedback may be sent anonymously, in which case the user id is left off
/// the wire entirely.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewFeedback {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    pub feedback: String,
}
