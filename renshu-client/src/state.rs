//! Client-side boards: the list of discussions on screen, the comment forest
//! per discussion, which forests are unfolded. Everything here is plain state
//! manipulation, the network calls live in [`sync`](crate::sync).

use std::collections::{HashMap, HashSet};

use crate::{
    api::{
        Comment, Discussion, DiscussionId, DiscussionPage, Note, Question, QuestionDiscussion,
        SolvedQuestions,
    },
    forest, VisibilityState,
};

/// Merges a server-confirmed reply into a forest. When the parent is not in
/// the forest the reply is dropped, a later reload will pick it up.
fn merge_server_comment(
    id: &DiscussionId,
    forest: Vec<Comment>,
    comment: Comment,
) -> Vec<Comment> {
    let parent = comment.parent_id.clone();
    if let Some(pid) = &parent {
        if !forest::contains(&forest, pid) {
            tracing::warn!(
                discussion = ?id,
                parent = ?pid,
                "got reply confirmation for a parent not in the local forest"
            );
            return forest;
        }
    }
    forest::merge_reply(forest, parent.as_ref(), comment)
}

/// State behind the discussion list page.
#[derive(Clone, Debug, Default)]
pub struct DiscussionBoard {
    discussions: Vec<Discussion>,
    page: u32,
    has_more: bool,
    forests: HashMap<DiscussionId, Vec<Comment>>,
    visible: VisibilityState,
}

impl DiscussionBoard {
    pub fn new() -> DiscussionBoard {
        DiscussionBoard::default()
    }

    pub fn discussions(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The comment forest loaded for `id`, empty until one is loaded
    pub fn forest(&self, id: &DiscussionId) -> &[Comment] {
        self.forests.get(id).map(|f| f as &[Comment]).unwrap_or(&[])
    }

    /// Records a page of results. Page 1 starts the list over and drops all
    /// loaded forests, later pages extend the list in place.
    pub fn apply_page(&mut self, page: u32, data: DiscussionPage) {
        if page <= 1 {
            self.discussions = data.discussions;
            self.forests.clear();
            self.visible.reset();
        } else {
            self.discussions.extend(data.discussions);
        }
        self.page = page;
        self.has_more = data.has_more;
    }

    /// A discussion the current user just created goes on top of the list.
    pub fn apply_created(&mut self, discussion: Discussion) {
        self.discussions.insert(0, discussion);
    }

    /// Replaces a discussion with the state the server answered a vote with.
    pub fn apply_vote(&mut self, updated: Discussion) {
        match self.discussions.iter_mut().find(|d| d.id == updated.id) {
            None => tracing::warn!(discussion = ?updated.id, "got vote result for unlisted discussion"),
            Some(d) => *d = updated,
        }
    }

    pub fn apply_delete(&mut self, id: &DiscussionId) {
        self.discussions.retain(|d| d.id != *id);
        self.forests.remove(id);
        self.visible.forget(id);
    }

    /// Stores a freshly fetched forest. Fetches that complete after their
    /// discussion left the list are dropped.
    pub fn set_forest(&mut self, id: &DiscussionId, forest: Vec<Comment>) {
        if !self.discussions.iter().any(|d| d.id == *id) {
            tracing::warn!(discussion = ?id, "got comments for unlisted discussion");
            return;
        }
        self.forests.insert(id.clone(), forest);
    }

    /// Merges a server-confirmed comment into the forest of `id`.
    pub fn apply_new_comment(&mut self, id: &DiscussionId, comment: Comment) {
        if !self.discussions.iter().any(|d| d.id == *id) {
            tracing::warn!(discussion = ?id, "got comment confirmation for unlisted discussion");
            return;
        }
        let forest = self.forests.remove(id).unwrap_or_default();
        let forest = merge_server_comment(id, forest, comment);
        self.forests.insert(id.clone(), forest);
    }

    /// Folds or unfolds the comments of `id`, returning the new state.
    pub fn toggle_comments(&mut self, id: &DiscussionId) -> bool {
        self.visible.toggle(id)
    }

    pub fn comments_visible(&self, id: &DiscussionId) -> bool {
        self.visible.is_expanded(id)
    }
}

/// State behind the per-company question list: which questions exist, which
/// ones the user solved, the notes for the open question.
#[derive(Clone, Debug, Default)]
pub struct QuestionBoard {
    companies: Vec<String>,
    questions: Vec<Question>,
    solved: HashSet<String>,
    notes: Vec<Note>,
}

impl QuestionBoard {
    pub fn new() -> QuestionBoard {
        QuestionBoard::default()
    }

    pub fn set_companies(&mut self, companies: Vec<String>) {
        self.companies = companies;
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_solved(&self, title: &str) -> bool {
        self.solved.contains(title)
    }

    /// Replaces the solved set with what the server answered.
    pub fn apply_solved(&mut self, solved: SolvedQuestions) {
        self.solved = solved.solved_questions.into_iter().collect();
    }

    /// Flips a question locally, for when the confirmation has not landed
    /// yet. Returns the new solved state.
    pub fn toggle_solved_local(&mut self, title: &str) -> bool {
        if self.solved.remove(title) {
            false
        } else {
            self.solved.insert(title.to_owned());
            true
        }
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// State behind the discussion tab of a single question. Unlike the general
/// board the forest lives inside each discussion, the way the server sends it.
#[derive(Clone, Debug)]
pub struct QuestionDiscussionBoard {
    question_title: String,
    discussions: Vec<QuestionDiscussion>,
    visible: VisibilityState,
}

impl QuestionDiscussionBoard {
    pub fn for_question(question_title: String) -> QuestionDiscussionBoard {
        QuestionDiscussionBoard {
            question_title,
            discussions: Vec::new(),
            visible: VisibilityState::new(),
        }
    }

    pub fn question_title(&self) -> &str {
        &self.question_title
    }

    pub fn set_discussions(&mut self, discussions: Vec<QuestionDiscussion>) {
        self.discussions = discussions;
        self.visible.reset();
    }

    pub fn discussions(&self) -> &[QuestionDiscussion] {
        &self.discussions
    }

    pub fn apply_created(&mut self, discussion: QuestionDiscussion) {
        self.discussions.insert(0, discussion);
    }

    /// Merges a server-confirmed reply into the forest of `id`.
    pub fn apply_reply(&mut self, id: &DiscussionId, comment: Comment) {
        match self.discussions.iter_mut().find(|d| d.id == *id) {
            None => tracing::warn!(discussion = ?id, "got reply for unlisted question discussion"),
            Some(d) => {
                let comments = std::mem::take(&mut d.comments);
                d.comments = merge_server_comment(id, comments, comment);
            }
        }
    }

    pub fn toggle_comments(&mut self, id: &DiscussionId) -> bool {
        self.visible.toggle(id)
    }

    pub fn comments_visible(&self, id: &DiscussionId) -> bool {
        self.visible.is_expanded(id)
    }
}
