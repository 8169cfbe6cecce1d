//! Bridges user actions to the backend: validates the input, gates on the
//! session, performs the call. Callers feed the results into the boards in
//! [`state`](crate::state).

use crate::{
    api::{
        AuthToken, Comment, CommentId, DeleteRequest, Discussion, DiscussionId, DiscussionPage,
        DiscussionQuery, NewComment, NewDiscussion, NewFeedback, NewNote, NewQuestionDiscussion,
        Note, Question, QuestionDiscussion, SignInRequest, SolvedQuestions, SolvedUpdate, VoteKind,
        VoteRequest,
    },
    Backend, Error, Session,
};

fn signed_in<'s>(session: Option<&'s Session>, action: &'static str) -> Result<&'s Session, Error> {
    session.ok_or(Error::AuthRequired { action })
}

/// Rejects blank input but leaves the text itself untouched. What the user
/// typed, spaces included, is what the server gets.
fn required(text: &str, field: &'static str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(())
}

fn token_of(session: Option<&Session>) -> Option<&AuthToken> {
    session.map(|s| &s.token)
}

pub async fn sign_in<B: Backend>(backend: &mut B, credential: String) -> Result<Session, Error> {
    let resp = backend.sign_in(&SignInRequest { credential }).await?;
    Ok(Session::from_sign_in(resp))
}

pub async fn load_forest<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
) -> Result<Vec<Comment>, Error> {
    backend.list_comments(token_of(session), discussion).await
}

/// Sends a comment, top-level when `parent_id` is `None`. Returns the
/// server-confirmed comment, to be merged into the local forest.
pub async fn submit_comment<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
    text: &str,
    parent_id: Option<CommentId>,
) -> Result<Comment, Error> {
    let action = if parent_id.is_some() { "reply" } else { "comment" };
    let session = signed_in(session, action)?;
    required(text, "Comment text")?;
    let req = NewComment {
        user_id: session.user_id().clone(),
        text: text.to_owned(),
        parent_comment_id: parent_id,
    };
    backend
        .create_comment(Some(&session.token), discussion, &req)
        .await
}

pub async fn load_discussions<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    query: &DiscussionQuery,
) -> Result<DiscussionPage, Error> {
    backend.list_discussions(token_of(session), query).await
}

pub async fn create_discussion<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    title: &str,
    content: &str,
    tags: Vec<String>,
) -> Result<Discussion, Error> {
    let session = signed_in(session, "create a discussion")?;
    required(title, "Title")?;
    required(content, "Content")?;
    if tags.is_empty() {
        return Err(Error::EmptyField { field: "Tags" });
    }
    let req = NewDiscussion::by(
        session.user_id().clone(),
        title.to_owned(),
        content.to_owned(),
        tags,
    );
    backend.create_discussion(Some(&session.token), &req).await
}

/// Votes on a discussion. The server treats a repeated vote of the same kind
/// as a retraction, so the caller just reports what was clicked.
pub async fn vote_discussion<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
    kind: VoteKind,
) -> Result<Discussion, Error> {
    let session = signed_in(session, "vote")?;
    let req = VoteRequest {
        user_id: session.user_id().clone(),
        vote_type: kind,
    };
    backend
        .vote_discussion(Some(&session.token), discussion, &req)
        .await
}

pub async fn delete_discussion<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
) -> Result<(), Error> {
    let session = signed_in(session, "delete a discussion")?;
    let req = DeleteRequest {
        user_id: session.user_id().clone(),
    };
    backend
        .delete_discussion(Some(&session.token), discussion, &req)
        .await
}

pub async fn load_question_discussions<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    question_title: &str,
) -> Result<Vec<QuestionDiscussion>, Error> {
    backend
        .list_question_discussions(token_of(session), question_title)
        .await
}

pub async fn create_question_discussion<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    question_title: &str,
    title: &str,
    content: &str,
) -> Result<QuestionDiscussion, Error> {
    let session = signed_in(session, "start a discussion")?;
    required(title, "Title")?;
    required(content, "Content")?;
    let req = NewQuestionDiscussion {
        title: title.to_owned(),
        content: content.to_owned(),
        user_id: session.user_id().clone(),
        question_title: question_title.to_owned(),
    };
    backend
        .create_question_discussion(Some(&session.token), &req)
        .await
}

pub async fn submit_question_reply<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
    text: &str,
    parent_id: Option<CommentId>,
) -> Result<Comment, Error> {
    let action = if parent_id.is_some() { "reply" } else { "comment" };
    let session = signed_in(session, action)?;
    required(text, "Comment text")?;
    let req = NewComment {
        user_id: session.user_id().clone(),
        text: text.to_owned(),
        parent_comment_id: parent_id,
    };
    backend
        .reply_question_discussion(Some(&session.token), discussion, &req)
        .await
}

pub async fn vote_question_discussion<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    discussion: &DiscussionId,
    kind: VoteKind,
) -> Result<(), Error> {
    let session = signed_in(session, "vote")?;
    let req = VoteRequest {
        user_id: session.user_id().clone(),
        vote_type: kind,
    };
    backend
        .vote_question_discussion(Some(&session.token), discussion, &req)
        .await
}

pub async fn load_companies<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
) -> Result<Vec<String>, Error> {
    backend.list_companies(token_of(session)).await
}

pub async fn load_questions<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    company: &str,
) -> Result<Vec<Question>, Error> {
    backend.list_questions(token_of(session), company).await
}

pub async fn load_solved<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
) -> Result<SolvedQuestions, Error> {
    let session = signed_in(session, "track solved questions")?;
    backend
        .solved_questions(Some(&session.token), session.user_id())
        .await
}

pub async fn set_solved<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    title: &str,
    solved: bool,
) -> Result<SolvedQuestions, Error> {
    let session = signed_in(session, "mark questions solved")?;
    let req = SolvedUpdate {
        title: title.to_owned(),
        user_id: session.user_id().clone(),
    };
    backend
        .update_solved(Some(&session.token), solved, &req)
        .await
}

pub async fn load_notes<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    question_title: &str,
) -> Result<Vec<Note>, Error> {
    let session = signed_in(session, "view notes")?;
    backend
        .list_notes(Some(&session.token), question_title, session.user_id())
        .await
}

pub async fn save_note<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    question_title: &str,
    content: &str,
    is_private: bool,
) -> Result<(), Error> {
    let session = signed_in(session, "save notes")?;
    required(content, "Note content")?;
    let req = NewNote {
        content: content.to_owned(),
        is_private,
        user_id: session.user_id().clone(),
    };
    backend
        .save_note(Some(&session.token), question_title, &req)
        .await
}

/// Feedback works signed-out too. The user id goes along when there is one.
pub async fn send_feedback<B: Backend>(
    backend: &mut B,
    session: Option<&Session>,
    text: &str,
) -> Result<(), Error> {
    required(text, "Feedback")?;
    let req = NewFeedback {
        user_id: session.map(|s| s.user_id().clone()),
        feedback: text.to_owned(),
    };
    backend.send_feedback(token_of(session), &req).await
}
