use chrono::Utc;

use crate::{Time, UserId};

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub String);

/// User block embedded in comments and discussions. Every field may be
/// missing on the wire (deleted accounts keep their documents).
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Author {
    #[serde(rename = "_id", default)]
    pub id: Option<UserId>,

    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    /// Assigned by the backend at creation, immutable afterwards
    #[serde(rename = "_id")]
    pub id: CommentId,

    #[serde(rename = "user", default)]
    pub author: Author,

    pub text: String,

    /// Id of the parent comment; None means a top-level reply to the
    /// containing discussion
    #[serde(rename = "parentCommentId", default)]
    pub parent_id: Option<CommentId>,

    /// Child comments in arrival order
    #[serde(default)]
    pub replies: Vec<Comment>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Time>,
}

impl Comment {
    /// A freshly minted comment, the shape the backend answers creation with
    pub fn created_now(
        id: CommentId,
        author: Author,
        text: String,
        parent_id: Option<CommentId>,
    ) -> Comment {
        Comment {
            id,
            author,
            text,
            parent_id,
            replies: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    #[serde(rename = "userId")]
    pub user_id: UserId,

    pub text: String,

    #[serde(rename = "parentCommentId")]
    pub parent_comment_id: Option<CommentId>,
}
