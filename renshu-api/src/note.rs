use crate::{Time, UserId};

/// Per-question note; private notes are only shown to their author
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Note {
    pub content: String,

    #[serde(rename = "isPrivate", default)]
    pub is_private: bool,

    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,

    #[serde(rename = "questionTitle", default)]
    pub question_title: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Time>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewNote {
    pub content: String,

    #[serde(rename = "isPrivate")]
    pub is_private: bool,

    #[serde(rename = "userId")]
    pub user_id: UserId,
}
