use async_trait::async_trait;
use reqwest::Url;

use crate::api::{
    self, AuthToken, Comment, DeleteRequest, Discussion, DiscussionId, DiscussionPage,
    DiscussionQuery, NewComment, NewDiscussion, NewFeedback, NewNote, NewQuestionDiscussion, Note,
    Question, QuestionDiscussion, SignInRequest, SignInResponse, SolvedQuestions, SolvedUpdate,
    UserId, VoteRequest,
};
use crate::{Backend, Error};

/// HTTP connection to a backend deployment.
pub struct Connection {
    client: reqwest::Client,
    base: Url,
}

impl Connection {
    /// `base` is the deployment root, eg. `https://practice.example.com/`;
    /// endpoint paths are joined under it.
    pub fn new(base: Url) -> Connection {
        assert!(
            !base.cannot_be_a_base(),
            "backend base URL must be hierarchical"
        );
        Connection {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Joining through path segments percent-encodes each one, which matters
    /// for question titles with spaces in them.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL checked hierarchical in Connection::new")
            .pop_if_empty()
            .extend(segments);
        url
    }

    fn with_token(
        req: reqwest::RequestBuilder,
        token: Option<&AuthToken>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(t) => req.bearer_auth(&t.0),
            None => req,
        }
    }

    async fn send(req: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let (client, req) = req.build_split();
        let req = req?;
        tracing::debug!(method = %req.method(), url = %req.url(), "sending request");
        let resp = client.execute(req).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await?;
            return Err(Error::Api(api::Error::parse(status, &body)));
        }
        Ok(resp)
    }

    async fn recv_json<R>(req: reqwest::RequestBuilder) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        Ok(Self::send(req).await?.json().await?)
    }

    /// For endpoints whose success answer is just a 2xx, body ignored
    async fn recv_unit(req: reqwest::RequestBuilder) -> Result<(), Error> {
        Self::send(req).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for Connection {
    async fn sign_in(&mut self, req: &SignInRequest) -> Result<SignInResponse, Error> {
        Self::recv_json(
            self.client
                .post(self.endpoint(&["auth", "google"]))
                .json(req),
        )
        .await
    }

    async fn list_comments(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
    ) -> Result<Vec<Comment>, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "comments", &discussion.0]));
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn create_comment(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        body: &NewComment,
    ) -> Result<Comment, Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "comments", &discussion.0]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn list_discussions(
        &mut self,
        token: Option<&AuthToken>,
        query: &DiscussionQuery,
    ) -> Result<DiscussionPage, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "discussions"]))
            .query(query);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn create_discussion(
        &mut self,
        token: Option<&AuthToken>,
        body: &NewDiscussion,
    ) -> Result<Discussion, Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "discussions"]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn vote_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        body: &VoteRequest,
    ) -> Result<Discussion, Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "discussions", &discussion.0, "vote"]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn delete_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        body: &DeleteRequest,
    ) -> Result<(), Error> {
        let req = self
            .client
            .delete(self.endpoint(&["api", "discussions", &discussion.0]))
            .json(body);
        Self::recv_unit(Self::with_token(req, token)).await
    }

    async fn list_question_discussions(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
    ) -> Result<Vec<QuestionDiscussion>, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "question-discussions", question_title]));
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn create_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        body: &NewQuestionDiscussion,
    ) -> Result<QuestionDiscussion, Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "question-discussions"]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn reply_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        body: &NewComment,
    ) -> Result<Comment, Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "question-comment-reply", &discussion.0]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn vote_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        body: &VoteRequest,
    ) -> Result<(), Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "questions", "discussions", &discussion.0, "vote"]))
            .json(body);
        Self::recv_unit(Self::with_token(req, token)).await
    }

    async fn list_companies(&mut self, token: Option<&AuthToken>) -> Result<Vec<String>, Error> {
        let req = self.client.get(self.endpoint(&["api", "companies"]));
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn list_questions(
        &mut self,
        token: Option<&AuthToken>,
        company: &str,
    ) -> Result<Vec<Question>, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "questions", company]));
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn solved_questions(
        &mut self,
        token: Option<&AuthToken>,
        user: &UserId,
    ) -> Result<SolvedQuestions, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "user", "solved-questions"]))
            .query(&[("userId", user.0.as_str())]);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn update_solved(
        &mut self,
        token: Option<&AuthToken>,
        solved: bool,
        body: &SolvedUpdate,
    ) -> Result<SolvedQuestions, Error> {
        let op = if solved { "add" } else { "remove" };
        let req = self
            .client
            .post(self.endpoint(&["api", "user", "solved-questions", op]))
            .json(body);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn list_notes(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        user: &UserId,
    ) -> Result<Vec<Note>, Error> {
        let req = self
            .client
            .get(self.endpoint(&["api", "questions", question_title, "notes"]))
            .query(&[("userId", user.0.as_str())]);
        Self::recv_json(Self::with_token(req, token)).await
    }

    async fn save_note(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        body: &NewNote,
    ) -> Result<(), Error> {
        let req = self
            .client
            .post(self.endpoint(&["api", "questions", question_title, "notes"]))
            .json(body);
        Self::recv_unit(Self::with_token(req, token)).await
    }

    async fn send_feedback(
        &mut self,
        token: Option<&AuthToken>,
        body: &NewFeedback,
    ) -> Result<(), Error> {
        let req = self.client.post(self.endpoint(&["api", "feedback"])).json(body);
        Self::recv_unit(Self::with_token(req, token)).await
    }
}
