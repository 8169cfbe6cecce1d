use async_trait::async_trait;

use crate::api::{
    AuthToken, Comment, DeleteRequest, Discussion, DiscussionId, DiscussionPage, DiscussionQuery,
    NewComment, NewDiscussion, NewFeedback, NewNote, NewQuestionDiscussion, Note, Question,
    QuestionDiscussion, SignInRequest, SignInResponse, SolvedQuestions, SolvedUpdate, UserId,
    VoteRequest,
};
use crate::Error;

/// The REST surface of the practice-platform backend, one method per
/// endpoint. [`crate::Connection`] implements it over HTTP; the in-memory
/// mock server implements it for tests.
///
/// Every method takes the bearer token separately from the body, mirroring
/// the wire: user ids ride inside JSON bodies, the token rides in the
/// Authorization header and is attached to every request a signed-in client
/// makes, reads included.
#[async_trait]
pub trait Backend {
    async fn sign_in(&mut self, req: &SignInRequest) -> Result<SignInResponse, Error>;

    async fn list_comments(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
    ) -> Result<Vec<Comment>, Error>;

    async fn create_comment(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &NewComment,
    ) -> Result<Comment, Error>;

    async fn list_discussions(
        &mut self,
        token: Option<&AuthToken>,
        query: &DiscussionQuery,
    ) -> Result<DiscussionPage, Error>;

    async fn create_discussion(
        &mut self,
        token: Option<&AuthToken>,
        req: &NewDiscussion,
    ) -> Result<Discussion, Error>;

    async fn vote_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &VoteRequest,
    ) -> Result<Discussion, Error>;

    async fn delete_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &DeleteRequest,
    ) -> Result<(), Error>;

    async fn list_question_discussions(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
    ) -> Result<Vec<QuestionDiscussion>, Error>;

    async fn create_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        req: &NewQuestionDiscussion,
    ) -> Result<QuestionDiscussion, Error>;

    async fn reply_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &NewComment,
    ) -> Result<Comment, Error>;

    async fn vote_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &VoteRequest,
    ) -> Result<(), Error>;

    async fn list_companies(&mut self, token: Option<&AuthToken>) -> Result<Vec<String>, Error>;

    async fn list_questions(
        &mut self,
        token: Option<&AuthToken>,
        company: &str,
    ) -> Result<Vec<Question>, Error>;

    async fn solved_questions(
        &mut self,
        token: Option<&AuthToken>,
        user: &UserId,
    ) -> Result<SolvedQuestions, Error>;

    /// `solved` picks between the add and remove endpoints
    async fn update_solved(
        &mut self,
        token: Option<&AuthToken>,
        solved: bool,
        req: &SolvedUpdate,
    ) -> Result<SolvedQuestions, Error>;

    async fn list_notes(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        user: &UserId,
    ) -> Result<Vec<Note>, Error>;

    async fn save_note(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        req: &NewNote,
    ) -> Result<(), Error>;

    async fn send_feedback(
        &mut self,
        token: Option<&AuthToken>,
        req: &NewFeedback,
    ) -> Result<(), Error>;
}
