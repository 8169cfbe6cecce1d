use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use renshu_client::{
    api::{
        self, Author, AuthToken, Comment, CommentId, DeleteRequest, Discussion, DiscussionId,
        DiscussionPage, DiscussionQuery, NewComment, NewDiscussion, NewFeedback, NewNote,
        NewQuestionDiscussion, Note, Question, QuestionDiscussion, SignInRequest, SignInResponse,
        SolvedQuestions, SolvedUpdate, User, UserId, VoteKind, VoteRequest,
    },
    forest, Backend, Error,
};
use uuid::Uuid;

/// In-memory rendition of the backend, for tests that want to compare what
/// the client shows with what the server holds.
pub struct MockServer {
    users: BTreeMap<UserId, MockUser>,
    discussions: Vec<Discussion>,
    question_discussions: Vec<QuestionDiscussion>,
    questions: BTreeMap<String, Vec<Question>>,
    notes: Vec<Note>,
    feedback: Vec<NewFeedback>,
}

#[derive(Debug)]
struct MockUser {
    name: String,
    credential: String,
    sessions: HashSet<AuthToken>,
    solved: Vec<String>,
}

fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

/// Voting again with the held kind retracts it, the other kind switches. A
/// user ends up in at most one of the two lists.
fn toggle_vote(
    upvotes: &mut Vec<UserId>,
    downvotes: &mut Vec<UserId>,
    user: &UserId,
    kind: VoteKind,
) {
    let (wanted, other) = match kind {
        VoteKind::Upvote => (upvotes, downvotes),
        VoteKind::Downvote => (downvotes, upvotes),
    };
    if wanted.contains(user) {
        wanted.retain(|u| u != user);
    } else {
        other.retain(|u| u != user);
        wanted.push(user.clone());
    }
}

fn insert_comment(
    comments: &mut Vec<Comment>,
    author: Author,
    req: &NewComment,
) -> Result<Comment, api::Error> {
    let comment = Comment::created_now(
        CommentId(mint_id()),
        author,
        req.text.clone(),
        req.parent_comment_id.clone(),
    );
    match &req.parent_comment_id {
        None => comments.push(comment.clone()),
        Some(pid) => match forest::find_mut(comments, pid) {
            None => return Err(api::Error::NotFound),
            Some(parent) => parent.replies.push(comment.clone()),
        },
    }
    Ok(comment)
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            discussions: Vec::new(),
            question_discussions: Vec::new(),
            questions: BTreeMap::new(),
            notes: Vec::new(),
            feedback: Vec::new(),
        }
    }

    /// Registers an account the identity provider would vouch for
    pub fn test_add_user(&mut self, name: &str, credential: &str) -> UserId {
        let id = UserId(mint_id());
        self.users.insert(
            id.clone(),
            MockUser {
                name: name.to_owned(),
                credential: credential.to_owned(),
                sessions: HashSet::new(),
                solved: Vec::new(),
            },
        );
        id
    }

    /// Return name & credential for user number `id`
    pub fn test_get_user_info(&self, id: usize) -> (&str, &str) {
        let u = self
            .users
            .values()
            .nth(id)
            .unwrap_or_else(|| panic!("getting user {id} among {}", self.users.len()));
        (&u.name, &u.credential)
    }

    /// Return the current number of users
    pub fn test_num_users(&self) -> usize {
        self.users.len()
    }

    pub fn test_add_company(&mut self, company: &str, questions: Vec<Question>) {
        self.questions.insert(company.to_owned(), questions);
    }

    pub fn test_num_discussions(&self) -> usize {
        self.discussions.len()
    }

    pub fn test_discussion_id(&self, idx: usize) -> &DiscussionId {
        let d = self
            .discussions
            .get(idx)
            .unwrap_or_else(|| panic!("getting discussion {idx} among {}", self.discussions.len()));
        &d.id
    }

    /// The comment forest the server holds for a discussion
    pub fn test_forest(&self, id: &DiscussionId) -> &[Comment] {
        let d = self
            .discussions
            .iter()
            .find(|d| d.id == *id)
            .unwrap_or_else(|| panic!("no discussion {id:?}"));
        &d.comments
    }

    pub fn test_question_forest(&self, id: &DiscussionId) -> &[Comment] {
        let d = self
            .question_discussions
            .iter()
            .find(|d| d.id == *id)
            .unwrap_or_else(|| panic!("no question discussion {id:?}"));
        &d.comments
    }

    pub fn test_feedback(&self) -> &[NewFeedback] {
        &self.feedback
    }

    fn resolve(&self, token: Option<&AuthToken>) -> Result<(&UserId, &MockUser), api::Error> {
        let token = token.ok_or(api::Error::PermissionDenied)?;
        self.users
            .iter()
            .find(|(_, u)| u.sessions.contains(token))
            .ok_or(api::Error::PermissionDenied)
    }

    /// The signed-in user as a user block for embedding in documents
    fn author(&self, token: Option<&AuthToken>) -> Result<Author, api::Error> {
        let (id, u) = self.resolve(token)?;
        Ok(Author {
            id: Some(id.clone()),
            name: Some(u.name.clone()),
        })
    }

    fn discussion_mut(&mut self, id: &DiscussionId) -> Result<&mut Discussion, api::Error> {
        self.discussions
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or(api::Error::NotFound)
    }

    fn question_discussion_mut(
        &mut self,
        id: &DiscussionId,
    ) -> Result<&mut QuestionDiscussion, api::Error> {
        self.question_discussions
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or(api::Error::NotFound)
    }
}

#[async_trait]
impl Backend for MockServer {
    async fn sign_in(&mut self, req: &SignInRequest) -> Result<SignInResponse, Error> {
        for (id, u) in self.users.iter_mut() {
            if u.credential == req.credential {
                let token = AuthToken(mint_id());
                u.sessions.insert(token.clone());
                return Ok(SignInResponse {
                    token,
                    user: User {
                        id: id.clone(),
                        name: Some(u.name.clone()),
                        email: None,
                        solved_questions: u.solved.clone(),
                    },
                });
            }
        }
        Err(api::Error::PermissionDenied.into())
    }

    async fn list_comments(
        &mut self,
        _token: Option<&AuthToken>,
        discussion: &DiscussionId,
    ) -> Result<Vec<Comment>, Error> {
        let d = self
            .discussions
            .iter()
            .find(|d| d.id == *discussion)
            .ok_or(api::Error::NotFound)?;
        Ok(d.comments.clone())
    }

    async fn create_comment(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &NewComment,
    ) -> Result<Comment, Error> {
        let author = self.author(token)?;
        let d = self.discussion_mut(discussion)?;
        Ok(insert_comment(&mut d.comments, author, req)?)
    }

    async fn list_discussions(
        &mut self,
        _token: Option<&AuthToken>,
        query: &DiscussionQuery,
    ) -> Result<DiscussionPage, Error> {
        let page = query.page.max(1) as usize;
        let limit = query.limit.max(1) as usize;
        let filtered: Vec<&Discussion> = self
            .discussions
            .iter()
            .filter(|d| match &query.tag {
                None => true,
                Some(tag) => d.tags.iter().any(|t| t == tag),
            })
            .collect();
        let discussions = filtered
            .iter()
            .skip((page - 1) * limit)
            .take(limit)
            .map(|d| (*d).clone())
            .collect();
        Ok(DiscussionPage {
            discussions,
            has_more: page * limit < filtered.len(),
        })
    }

    async fn create_discussion(
        &mut self,
        token: Option<&AuthToken>,
        req: &NewDiscussion,
    ) -> Result<Discussion, Error> {
        let author = self.author(token)?;
        let d = Discussion {
            id: DiscussionId(mint_id()),
            title: req.title.clone(),
            content: req.content.clone(),
            tags: req.tags.clone(),
            author,
            upvotes: Vec::new(),
            downvotes: Vec::new(),
            comments: Vec::new(),
            created_at: Some(Utc::now()),
        };
        // newest first, the order the list endpoint answers in
        self.discussions.insert(0, d.clone());
        Ok(d)
    }

    async fn vote_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &VoteRequest,
    ) -> Result<Discussion, Error> {
        self.resolve(token)?;
        let kind = req.vote_type;
        let user = req.user_id.clone();
        let d = self.discussion_mut(discussion)?;
        toggle_vote(&mut d.upvotes, &mut d.downvotes, &user, kind);
        Ok(d.clone())
    }

    async fn delete_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &DeleteRequest,
    ) -> Result<(), Error> {
        self.resolve(token)?;
        let idx = self
            .discussions
            .iter()
            .position(|d| d.id == *discussion)
            .ok_or(api::Error::NotFound)?;
        if !self.discussions[idx].is_authored_by(&req.user_id) {
            return Err(api::Error::PermissionDenied.into());
        }
        self.discussions.remove(idx);
        Ok(())
    }

    async fn list_question_discussions(
        &mut self,
        _token: Option<&AuthToken>,
        question_title: &str,
    ) -> Result<Vec<QuestionDiscussion>, Error> {
        Ok(self
            .question_discussions
            .iter()
            .filter(|d| d.question_title == question_title)
            .cloned()
            .collect())
    }

    async fn create_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        req: &NewQuestionDiscussion,
    ) -> Result<QuestionDiscussion, Error> {
        let author = self.author(token)?;
        let d = QuestionDiscussion {
            id: DiscussionId(mint_id()),
            question_title: req.question_title.clone(),
            title: req.title.clone(),
            content: req.content.clone(),
            author,
            comments: Vec::new(),
            upvotes: Vec::new(),
            downvotes: Vec::new(),
            created_at: Some(Utc::now()),
        };
        self.question_discussions.insert(0, d.clone());
        Ok(d)
    }

    async fn reply_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &NewComment,
    ) -> Result<Comment, Error> {
        let author = self.author(token)?;
        let d = self.question_discussion_mut(discussion)?;
        Ok(insert_comment(&mut d.comments, author, req)?)
    }

    async fn vote_question_discussion(
        &mut self,
        token: Option<&AuthToken>,
        discussion: &DiscussionId,
        req: &VoteRequest,
    ) -> Result<(), Error> {
        self.resolve(token)?;
        let kind = req.vote_type;
        let user = req.user_id.clone();
        let d = self.question_discussion_mut(discussion)?;
        toggle_vote(&mut d.upvotes, &mut d.downvotes, &user, kind);
        Ok(())
    }

    async fn list_companies(&mut self, _token: Option<&AuthToken>) -> Result<Vec<String>, Error> {
        Ok(self.questions.keys().cloned().collect())
    }

    async fn list_questions(
        &mut self,
        _token: Option<&AuthToken>,
        company: &str,
    ) -> Result<Vec<Question>, Error> {
        Ok(self.questions.get(company).cloned().unwrap_or_default())
    }

    async fn solved_questions(
        &mut self,
        token: Option<&AuthToken>,
        user: &UserId,
    ) -> Result<SolvedQuestions, Error> {
        self.resolve(token)?;
        let u = self.users.get(user).ok_or(api::Error::NotFound)?;
        Ok(SolvedQuestions {
            solved_questions: u.solved.clone(),
        })
    }

    async fn update_solved(
        &mut self,
        token: Option<&AuthToken>,
        solved: bool,
        req: &SolvedUpdate,
    ) -> Result<SolvedQuestions, Error> {
        self.resolve(token)?;
        let u = self
            .users
            .get_mut(&req.user_id)
            .ok_or(api::Error::NotFound)?;
        if solved {
            if !u.solved.contains(&req.title) {
                u.solved.push(req.title.clone());
            }
        } else {
            u.solved.retain(|t| t != &req.title);
        }
        Ok(SolvedQuestions {
            solved_questions: u.solved.clone(),
        })
    }

    async fn list_notes(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        user: &UserId,
    ) -> Result<Vec<Note>, Error> {
        self.resolve(token)?;
        Ok(self
            .notes
            .iter()
            .filter(|n| n.question_title.as_deref() == Some(question_title))
            .filter(|n| !n.is_private || n.user_id.as_ref() == Some(user))
            .cloned()
            .collect())
    }

    async fn save_note(
        &mut self,
        token: Option<&AuthToken>,
        question_title: &str,
        req: &NewNote,
    ) -> Result<(), Error> {
        self.resolve(token)?;
        let note = Note {
            content: req.content.clone(),
            is_private: req.is_private,
            user_id: Some(req.user_id.clone()),
            question_title: Some(question_title.to_owned()),
            created_at: Some(Utc::now()),
        };
        // one note per user and question, saving again overwrites
        let existing = self.notes.iter_mut().find(|n| {
            n.user_id.as_ref() == Some(&req.user_id)
                && n.question_title.as_deref() == Some(question_title)
        });
        match existing {
            Some(slot) => *slot = note,
            None => self.notes.push(note),
        }
        Ok(())
    }

    async fn send_feedback(
        &mut self,
        _token: Option<&AuthToken>,
        req: &NewFeedback,
    ) -> Result<(), Error> {
        self.feedback.push(req.clone());
        Ok(())
    }
}
