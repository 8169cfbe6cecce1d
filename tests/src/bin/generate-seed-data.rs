//! Prints a JSON document of plausible seed data for a development backend:
//! users, per-company question lists and discussions with nested comment
//! trees, all in the wire shapes the client parses.

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use renshu_client::api::{Author, Comment, CommentId, Discussion, DiscussionId, Question, UserId};
use uuid::Uuid;

const NUM_USERS: usize = 5;
const NUM_DISCUSSIONS: usize = 25;
const MAX_TOP_LEVEL_COMMENTS: usize = 4;
const MAX_REPLIES: usize = 3;
const MAX_REPLY_DEPTH: usize = 4;
const MAX_COMMENT_WORDS: usize = 12;
const MAX_CONTENT_WORDS: usize = 40;
const MAX_SEED_AGE_DAYS: i64 = 90;

const TAGS: &[&str] = &[
    "arrays",
    "strings",
    "dp",
    "graphs",
    "greedy",
    "binary-search",
];
const COMPANIES: &[&str] = &["acme", "globex", "initech"];
const DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];

fn gen_comment(
    rng: &mut impl Rng,
    authors: &[Author],
    parent: Option<&CommentId>,
    depth: usize,
) -> Comment {
    let mut comment = Comment::created_now(
        CommentId(Uuid::new_v4().to_string()),
        authors
            .choose(rng)
            .expect("author pool is not empty")
            .clone(),
        lipsum::lipsum(rng.gen_range(4..MAX_COMMENT_WORDS)),
        parent.cloned(),
    );
    if depth < MAX_REPLY_DEPTH {
        let id = comment.id.clone();
        for _ in 0..rng.gen_range(0..=MAX_REPLIES) {
            comment
                .replies
                .push(gen_comment(rng, authors, Some(&id), depth + 1));
        }
    }
    comment
}

fn gen_question(rng: &mut impl Rng) -> Question {
    let title = lipsum::lipsum_title();
    Question {
        link: format!(
            "https://practice.example.com/questions/{}",
            title.to_lowercase().replace(' ', "-")
        ),
        title,
        difficulty: DIFFICULTIES
            .choose(rng)
            .expect("difficulty pool is not empty")
            .to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let users: Vec<(UserId, String)> = (0..NUM_USERS)
        .map(|i| (UserId(Uuid::new_v4().to_string()), format!("seed-user-{i}")))
        .collect();
    let authors: Vec<Author> = users
        .iter()
        .map(|(id, name)| Author {
            id: Some(id.clone()),
            name: Some(name.clone()),
        })
        .collect();

    let questions: BTreeMap<String, Vec<Question>> = COMPANIES
        .iter()
        .map(|company| {
            let qs = (0..rng.gen_range(5..15)).map(|_| gen_question(&mut rng)).collect();
            (company.to_string(), qs)
        })
        .collect();

    let discussions: Vec<Discussion> = (0..NUM_DISCUSSIONS)
        .map(|_| {
            let mut upvotes = Vec::new();
            let mut downvotes = Vec::new();
            for (uid, _) in &users {
                match rng.gen_range(0..4) {
                    0 => upvotes.push(uid.clone()),
                    1 => downvotes.push(uid.clone()),
                    _ => (),
                }
            }
            let comments = (0..rng.gen_range(0..=MAX_TOP_LEVEL_COMMENTS))
                .map(|_| gen_comment(&mut rng, &authors, None, 1))
                .collect();
            let num_tags = rng.gen_range(1..=3);
            Discussion {
                id: DiscussionId(Uuid::new_v4().to_string()),
                title: lipsum::lipsum_title(),
                content: lipsum::lipsum(rng.gen_range(10..MAX_CONTENT_WORDS)),
                tags: TAGS
                    .choose_multiple(&mut rng, num_tags)
                    .map(|t| t.to_string())
                    .collect(),
                author: authors
                    .choose(&mut rng)
                    .expect("author pool is not empty")
                    .clone(),
                upvotes,
                downvotes,
                comments,
                created_at: Some(Utc::now() - Duration::days(rng.gen_range(0..MAX_SEED_AGE_DAYS))),
            }
        })
        .collect();

    let seed = serde_json::json!({
        "users": users
            .iter()
            .map(|(id, name)| serde_json::json!({
                "_id": id,
                "name": name,
                "email": format!("{name}@example.com"),
                "solvedQuestions": [],
            }))
            .collect::<Vec<_>>(),
        "questions": questions,
        "discussions": discussions,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&seed).context("serializing seed data")?
    );
    Ok(())
}
