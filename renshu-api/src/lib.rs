use chrono::Utc;

mod auth;
mod comment;
mod discussion;
mod error;
mod feedback;
mod note;
mod question;
mod user;

pub use auth::{AuthToken, SignInRequest, SignInResponse};
pub use comment::{Author, Comment, CommentId, NewComment, ANONYMOUS};
pub use discussion::{
    normalize_tags, DeleteRequest, Discussion, DiscussionId, DiscussionPage, DiscussionQuery,
    NewDiscussion, NewQuestionDiscussion, QuestionDiscussion, VoteKind, VoteRequest,
    DISCUSSION_PAGE_SIZE,
};
pub use error::Error;
pub use feedback::NewFeedback;
pub use note::{NewNote, Note};
pub use question::{Question, SolvedQuestions, SolvedUpdate};
pub use user::{User, UserId};

pub type Time = chrono::DateTime<Utc>;
