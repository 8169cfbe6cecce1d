//! Pure operations over a discussion's comment forest.
//!
//! `Comment` owns its replies, so the structure is a forest by construction
//! and recursive traversal cannot loop; nesting depth of untrusted input is
//! capped by serde_json's recursion limit at parse time.

use crate::api::{Comment, CommentId};

/// Insert a server-confirmed reply into a forest.
///
/// With no parent id the reply is appended as the last top-level comment.
/// With a parent id it is appended as the last reply of the first node (in
/// depth-first order) carrying that id; ids are unique by backend contract,
/// so "first" is only a tie-break against malformed data. When no node
/// carries the id, the forest comes back unchanged and the reply is dropped
/// from display until the next full reload.
///
/// Consumes the forest and returns the updated one; sibling order and every
/// untouched subtree are preserved. Cost is linear in the total number of
/// comments.
pub fn merge_reply(
    mut forest: Vec<Comment>,
    parent_id: Option<&CommentId>,
    reply: Comment,
) -> Vec<Comment> {
    match parent_id {
        None => forest.push(reply),
        Some(pid) => {
            if let Some(parent) = find_mut(&mut forest, pid) {
                parent.replies.push(reply);
            }
        }
    }
    forest
}

pub fn find<'a>(forest: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
    for c in forest {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find(&c.replies, id) {
            return Some(res);
        }
    }
    None
}

pub fn find_mut<'a>(forest: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
    for c in forest {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find_mut(&mut c.replies, id) {
            return Some(res);
        }
    }
    None
}

pub fn contains(forest: &[Comment], id: &CommentId) -> bool {
    find(forest, id).is_some()
}

/// Total number of comments, nested replies included
pub fn count(forest: &[Comment]) -> usize {
    forest.iter().map(|c| 1 + count(&c.replies)).sum()
}
