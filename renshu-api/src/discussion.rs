use crate::{Author, Comment, Time, UserId};

/// Page size the discussion list is fetched with
pub const DISCUSSION_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DiscussionId(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Discussion {
    #[serde(rename = "_id")]
    pub id: DiscussionId,

    pub title: String,
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "user", default)]
    pub author: Author,

    #[serde(default)]
    pub upvotes: Vec<UserId>,

    #[serde(default)]
    pub downvotes: Vec<UserId>,

    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Time>,
}

impl Discussion {
    pub fn is_upvoted_by(&self, user: &UserId) -> bool {
        self.upvotes.contains(user)
    }

    pub fn is_downvoted_by(&self, user: &UserId) -> bool {
        self.downvotes.contains(user)
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        self.author.id.as_ref() == Some(user)
    }
}

/// Response of the paginated discussion listing
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DiscussionPage {
    pub discussions: Vec<Discussion>,

    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewDiscussion {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,

    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// The backend wants the author id twice, under both names
    #[serde(rename = "createdBy")]
    pub created_by: UserId,
}

impl NewDiscussion {
    pub fn by(user_id: UserId, title: String, content: String, tags: Vec<String>) -> NewDiscussion {
        NewDiscussion {
            title,
            content,
            tags,
            created_by: user_id.clone(),
            user_id,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VoteRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,

    #[serde(rename = "voteType")]
    pub vote_type: VoteKind,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DeleteRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// Query-string parameters of the discussion listing
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct DiscussionQuery {
    pub page: u32,
    pub limit: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl DiscussionQuery {
    pub fn for_page(page: u32) -> DiscussionQuery {
        DiscussionQuery {
            page,
            ..DiscussionQuery::default()
        }
    }

    pub fn with_tag(mut self, tag: String) -> DiscussionQuery {
        self.tag = Some(tag);
        self
    }
}

impl Default for DiscussionQuery {
    fn default() -> DiscussionQuery {
        DiscussionQuery {
            page: 1,
            limit: DISCUSSION_PAGE_SIZE,
            tag: None,
        }
    }
}

/// Discussion attached to a single practice question
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct QuestionDiscussion {
    #[serde(rename = "_id")]
    pub id: DiscussionId,

    #[serde(rename = "questionTitle", default)]
    pub question_title: String,

    pub title: String,
    pub content: String,

    #[serde(rename = "user", default)]
    pub author: Author,

    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub upvotes: Vec<UserId>,

    #[serde(default)]
    pub downvotes: Vec<UserId>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Time>,
}

impl QuestionDiscussion {
    pub fn is_upvoted_by(&self, user: &UserId) -> bool {
        self.upvotes.contains(user)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewQuestionDiscussion {
    pub title: String,
    pub content: String,

    #[serde(rename = "userId")]
    pub user_id: UserId,

    #[serde(rename = "questionTitle")]
    pub question_title: String,
}

/// Canonicalize raw comma-separated tag input: trimmed, lowercased, empties
/// dropped, first occurrence wins.
pub fn normalize_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',') {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
