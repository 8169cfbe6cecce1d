#![cfg(test)]

use std::{cmp, ops::RangeTo, panic::AssertUnwindSafe};

use async_recursion::async_recursion;
use renshu_client::{
    api::{self, Comment, CommentId, DiscussionId, DiscussionQuery, VoteKind},
    forest, sync, DiscussionBoard, Error, Session,
};
use renshu_mock_server::MockServer;

macro_rules! do_tokio_test {
    ( $name:ident, $gen:expr, $fn:expr ) => {
        #[test]
        fn $name() {
            if std::env::var("RUST_LOG").is_ok() {
                // several tests may race to install the global subscriber
                let _ = tracing_subscriber::fmt::try_init();
            }
            let runtime = AssertUnwindSafe(
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("failed initializing tokio runtime"),
            );
            bolero::check!()
                .with_generator($gen)
                .cloned()
                .for_each(move |v| {
                    let () = runtime.block_on($fn(v));
                })
        }
    };
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    SignIn {
        uid: usize,
    },
    SignOut {
        sid: usize,
    },
    NewDiscussion {
        sid: usize,
        #[generator(bolero::generator::gen_with::<String>().len(1..20usize))]
        title: String,
        #[generator(bolero::generator::gen_with::<String>().len(1..50usize))]
        content: String,
    },
    Comment {
        sid: usize,
        did: usize,
        parent: Option<usize>,
        #[generator(bolero::generator::gen_with::<String>().len(1..30usize))]
        text: String,
    },
    Vote {
        sid: usize,
        did: usize,
        down: bool,
    },
    Delete {
        sid: usize,
        did: usize,
    },
    Reload,
}

fn resize_int(fuzz_id: usize, RangeTo { end }: RangeTo<usize>) -> Option<usize> {
    if end == 0 {
        return None;
    }
    let bucket_size = cmp::max(1, usize::MAX / end); // in case we rounded to 0
    let id = fuzz_id / bucket_size;
    Some(cmp::min(id, end - 1)) // in case id was actually over end - 1 due to rounding
}

/// Comment number `n` of the forest in depth-first order
fn nth_comment<'a>(comments: &'a [Comment], n: usize) -> Option<&'a Comment> {
    fn walk<'a>(comments: &'a [Comment], n: usize, seen: &mut usize) -> Option<&'a Comment> {
        for c in comments {
            if *seen == n {
                return Some(c);
            }
            *seen += 1;
            if let Some(found) = walk(&c.replies, n, seen) {
                return Some(found);
            }
        }
        None
    }
    walk(comments, n, &mut 0)
}

/// Removes the comment carrying `id`, wherever it nests. Lets the merge test
/// compare a merged forest against the one it started from.
fn remove_comment(comments: &mut Vec<Comment>, id: &CommentId) -> bool {
    if let Some(i) = comments.iter().position(|c| c.id == *id) {
        comments.remove(i);
        return true;
    }
    for c in comments.iter_mut() {
        if remove_comment(&mut c.replies, id) {
            return true;
        }
    }
    false
}

/// Drives random user actions through the synchronization shim against the
/// mock server, keeping one local board like a client would, and checks the
/// board never diverges from what the server holds.
struct Fuzzer {
    server: MockServer,
    sessions: Vec<Session>,
    board: DiscussionBoard,
}

impl Fuzzer {
    fn new() -> Fuzzer {
        Fuzzer {
            server: MockServer::new(),
            sessions: Vec::new(),
            board: DiscussionBoard::new(),
        }
    }

    fn session_at(&self, sid: usize) -> Option<&Session> {
        resize_int(sid, ..self.sessions.len()).map(|i| &self.sessions[i])
    }

    /// Refetches everything the way a client starting fresh would
    async fn reload(&mut self) {
        let mut page = 1;
        loop {
            let data = sync::load_discussions(
                &mut self.server,
                None,
                &DiscussionQuery::for_page(page),
            )
            .await
            .expect("listing discussions");
            let has_more = data.has_more;
            self.board.apply_page(page, data);
            if !has_more {
                break;
            }
            page += 1;
        }
        let ids: Vec<DiscussionId> = self
            .board
            .discussions()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        for id in ids {
            let comments = sync::load_forest(&mut self.server, None, &id)
                .await
                .expect("loading forest");
            self.board.set_forest(&id, comments);
        }
        self.check_forests();
    }

    fn check_forests(&self) {
        assert_eq!(
            self.board.discussions().len(),
            self.server.test_num_discussions(),
            "local list has a different number of discussions than the server"
        );
        for d in self.board.discussions() {
            assert_eq!(
                self.board.forest(&d.id),
                self.server.test_forest(&d.id),
                "local forest diverged from the server for {:?}",
                d.id
            );
        }
    }

    #[async_recursion]
    async fn execute_fuzz_op(&mut self, op: FuzzOp) {
        match op {
            FuzzOp::SignIn { uid } => match resize_int(uid, ..self.server.test_num_users()) {
                Some(uid) => {
                    let (_, credential) = self.server.test_get_user_info(uid);
                    let credential = credential.to_owned();
                    let session = sync::sign_in(&mut self.server, credential)
                        .await
                        .expect("signing in a registered user");
                    self.sessions.push(session);
                }
                None => {
                    let n = self.server.test_num_users();
                    self.server
                        .test_add_user(&format!("user-{n}"), &format!("credential-{n}"));
                    self.execute_fuzz_op(FuzzOp::SignIn { uid }).await;
                }
            },
            FuzzOp::SignOut { sid } => {
                // forgetting the session is all signing out does
                if let Some(sid) = resize_int(sid, ..self.sessions.len()) {
                    self.sessions.remove(sid);
                }
            }
            FuzzOp::NewDiscussion {
                sid,
                title,
                content,
            } => match self.session_at(sid).cloned() {
                Some(session) => {
                    let res = sync::create_discussion(
                        &mut self.server,
                        Some(&session),
                        &title,
                        &content,
                        vec![String::from("generated")],
                    )
                    .await;
                    match res {
                        Ok(d) => self.board.apply_created(d),
                        // generated text can be all whitespace
                        Err(Error::EmptyField { .. }) => (),
                        Err(e) => panic!("unexpected error creating discussion: {e}"),
                    }
                }
                None => {
                    self.execute_fuzz_op(FuzzOp::SignIn { uid: sid }).await;
                    self.execute_fuzz_op(FuzzOp::NewDiscussion {
                        sid,
                        title,
                        content,
                    })
                    .await;
                }
            },
            FuzzOp::Comment {
                sid,
                did,
                parent,
                text,
            } => {
                let session = match self.session_at(sid).cloned() {
                    Some(s) => s,
                    None => {
                        self.execute_fuzz_op(FuzzOp::SignIn { uid: sid }).await;
                        return self
                            .execute_fuzz_op(FuzzOp::Comment {
                                sid,
                                did,
                                parent,
                                text,
                            })
                            .await;
                    }
                };
                let did = match resize_int(did, ..self.server.test_num_discussions()) {
                    Some(d) => d,
                    None => {
                        self.execute_fuzz_op(FuzzOp::NewDiscussion {
                            sid,
                            title: String::from("seed discussion"),
                            content: String::from("seed content"),
                        })
                        .await;
                        return self
                            .execute_fuzz_op(FuzzOp::Comment {
                                sid,
                                did,
                                parent,
                                text,
                            })
                            .await;
                    }
                };
                let id = self.server.test_discussion_id(did).clone();
                // pick the parent among comments the client can see, like a
                // user clicking reply
                let parent = parent.and_then(|p| {
                    let local = self.board.forest(&id);
                    resize_int(p, ..forest::count(local)).map(|n| {
                        nth_comment(local, n)
                            .expect("picked comment index within count")
                            .id
                            .clone()
                    })
                });
                match sync::submit_comment(&mut self.server, Some(&session), &id, &text, parent)
                    .await
                {
                    Ok(c) => self.board.apply_new_comment(&id, c),
                    Err(Error::EmptyField { .. }) => (),
                    Err(e) => panic!("unexpected error submitting comment: {e}"),
                }
            }
            FuzzOp::Vote { sid, did, down } => {
                let session = match self.session_at(sid).cloned() {
                    Some(s) => s,
                    None => {
                        self.execute_fuzz_op(FuzzOp::SignIn { uid: sid }).await;
                        return self.execute_fuzz_op(FuzzOp::Vote { sid, did, down }).await;
                    }
                };
                let did = match resize_int(did, ..self.server.test_num_discussions()) {
                    Some(d) => d,
                    None => {
                        self.execute_fuzz_op(FuzzOp::NewDiscussion {
                            sid,
                            title: String::from("seed discussion"),
                            content: String::from("seed content"),
                        })
                        .await;
                        return self.execute_fuzz_op(FuzzOp::Vote { sid, did, down }).await;
                    }
                };
                let id = self.server.test_discussion_id(did).clone();
                let kind = match down {
                    true => VoteKind::Downvote,
                    false => VoteKind::Upvote,
                };
                let uid = session.user_id().clone();
                let held = self
                    .board
                    .discussions()
                    .iter()
                    .find(|d| d.id == id)
                    .map(|d| match kind {
                        VoteKind::Upvote => d.is_upvoted_by(&uid),
                        VoteKind::Downvote => d.is_downvoted_by(&uid),
                    })
                    .expect("voting on a discussion the board lists");
                let updated = sync::vote_discussion(&mut self.server, Some(&session), &id, kind)
                    .await
                    .expect("voting");
                let holds_now = match kind {
                    VoteKind::Upvote => updated.is_upvoted_by(&uid),
                    VoteKind::Downvote => updated.is_downvoted_by(&uid),
                };
                assert_eq!(holds_now, !held, "vote did not toggle");
                assert!(
                    !(updated.is_upvoted_by(&uid) && updated.is_downvoted_by(&uid)),
                    "user ended up in both vote lists"
                );
                self.board.apply_vote(updated);
            }
            FuzzOp::Delete { sid, did } => {
                let session = match self.session_at(sid).cloned() {
                    Some(s) => s,
                    None => {
                        self.execute_fuzz_op(FuzzOp::SignIn { uid: sid }).await;
                        return self.execute_fuzz_op(FuzzOp::Delete { sid, did }).await;
                    }
                };
                let did = match resize_int(did, ..self.server.test_num_discussions()) {
                    Some(d) => d,
                    None => return,
                };
                let id = self.server.test_discussion_id(did).clone();
                let owned = self
                    .board
                    .discussions()
                    .iter()
                    .find(|d| d.id == id)
                    .map(|d| d.is_authored_by(session.user_id()))
                    .expect("deleting a discussion the board lists");
                match sync::delete_discussion(&mut self.server, Some(&session), &id).await {
                    Ok(()) => {
                        assert!(owned, "deleting a foreign discussion succeeded");
                        self.board.apply_delete(&id);
                    }
                    Err(Error::Api(api::Error::PermissionDenied)) => {
                        assert!(!owned, "deleting an owned discussion was denied");
                    }
                    Err(e) => panic!("unexpected error deleting discussion: {e}"),
                }
            }
            FuzzOp::Reload => self.reload().await,
        }
    }
}

do_tokio_test!(
    board_tracks_server,
    bolero::generator::gen_with::<Vec<FuzzOp>>().len(1..50usize),
    |ops: Vec<FuzzOp>| async move {
        let mut fuzzer = Fuzzer::new();
        for op in ops {
            fuzzer.execute_fuzz_op(op).await;
        }
        fuzzer.reload().await;
    }
);

do_tokio_test!(
    merge_reply_never_loses_comments,
    bolero::generator::gen_with::<Vec<Option<usize>>>().len(0..40usize),
    |ops: Vec<Option<usize>>| async move {
        let mut comments: Vec<Comment> = Vec::new();
        let mut next = 0u32;
        for parent in ops {
            let parent = parent.and_then(|p| {
                resize_int(p, ..forest::count(&comments) + 1).and_then(|n| {
                    // one beyond the count exercises the unknown-parent path
                    match nth_comment(&comments, n) {
                        Some(c) => Some(c.id.clone()),
                        None => Some(CommentId(String::from("not-there"))),
                    }
                })
            });
            let known = match &parent {
                None => true,
                Some(pid) => forest::contains(&comments, pid),
            };
            let before = comments.clone();
            let id = CommentId(format!("c{next}"));
            let reply = Comment::created_now(
                id.clone(),
                api::Author::default(),
                format!("text {next}"),
                parent.clone(),
            );
            next += 1;
            comments = forest::merge_reply(comments, parent.as_ref(), reply);
            if !known {
                assert_eq!(comments, before, "unknown parent must leave the forest alone");
                continue;
            }
            assert_eq!(forest::count(&comments), forest::count(&before) + 1);
            let tail = match &parent {
                None => comments.last(),
                Some(pid) => forest::find(&comments, pid)
                    .expect("parent still in the forest")
                    .replies
                    .last(),
            };
            assert_eq!(
                tail.map(|c| &c.id),
                Some(&id),
                "reply did not land at its parent's tail"
            );
            // everything else must read exactly as it did before the merge
            let mut rest = comments.clone();
            assert!(remove_comment(&mut rest, &id));
            assert_eq!(rest, before);
        }
    }
);
