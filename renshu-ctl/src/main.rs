use anyhow::Context;
use renshu_client::{
    api::{Comment, CommentId, DiscussionId, DiscussionQuery, VoteKind},
    sync, Connection, Session,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Backend deployment root, eg. https://practice.example.com/
    #[structopt(short, long, env = "RENSHU_HOST")]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Sign in and print the session for RENSHU_SESSION
    SignIn {
        /// Identity-provider credential
        credential: String,
    },

    /// List the companies questions are curated for
    Companies,

    /// List the questions curated for a company
    Questions {
        /// Company name
        company: String,
    },

    /// List the questions you marked solved
    Solved,

    /// Mark a question solved
    Solve {
        /// Question title
        title: String,
    },

    /// Unmark a solved question
    Unsolve {
        /// Question title
        title: String,
    },

    /// List a page of discussions
    Discussions {
        /// Page number, starting at 1
        #[structopt(default_value = "1")]
        page: u32,

        /// Only discussions carrying this tag
        #[structopt(long)]
        tag: Option<String>,
    },

    /// Open a new discussion
    NewDiscussion {
        /// Title
        title: String,

        /// Body text
        content: String,

        /// Comma-separated tags
        tags: String,
    },

    /// Print the comment tree of a discussion
    Comments {
        /// Discussion id
        discussion: String,
    },

    /// Comment on a discussion
    Comment {
        /// Discussion id
        discussion: String,

        /// Comment text
        text: String,

        /// Reply under this comment instead of at top level
        #[structopt(long)]
        parent: Option<String>,
    },

    /// Upvote a discussion, or downvote with --down
    Vote {
        /// Discussion id
        discussion: String,

        #[structopt(long)]
        down: bool,
    },

    /// Delete a discussion you authored
    DeleteDiscussion {
        /// Discussion id
        discussion: String,
    },

    /// Send feedback about the platform
    Feedback {
        /// Feedback text
        text: String,
    },
}

fn session_from_env() -> anyhow::Result<Option<Session>> {
    match std::env::var("RENSHU_SESSION") {
        Ok(json) => Ok(Some(
            serde_json::from_str(&json).context("parsing RENSHU_SESSION as a session")?,
        )),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).context("retrieving RENSHU_SESSION environment variable"),
    }
}

fn print_forest(comments: &[Comment], depth: usize) {
    for c in comments {
        println!(
            "{:indent$}{}: {}",
            "",
            c.author.display_name(),
            c.text,
            indent = depth * 4
        );
        print_forest(&c.replies, depth + 1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let host = reqwest::Url::parse(&opt.host).context("parsing backend host URL")?;
    let mut conn = Connection::new(host);
    let session = session_from_env()?;
    let session = session.as_ref();

    match opt.cmd {
        Command::SignIn { credential } => {
            let session = sync::sign_in(&mut conn, credential).await?;
            println!(
                "{}",
                serde_json::to_string(&session).context("serializing session")?
            );
        }
        Command::Companies => {
            for company in sync::load_companies(&mut conn, session).await? {
                println!("{company}");
            }
        }
        Command::Questions { company } => {
            for q in sync::load_questions(&mut conn, session, &company).await? {
                println!("[{}] {} ({})", q.difficulty, q.title, q.link);
            }
        }
        Command::Solved => {
            for title in sync::load_solved(&mut conn, session).await?.solved_questions {
                println!("{title}");
            }
        }
        Command::Solve { title } => {
            sync::set_solved(&mut conn, session, &title, true).await?;
        }
        Command::Unsolve { title } => {
            sync::set_solved(&mut conn, session, &title, false).await?;
        }
        Command::Discussions { page, tag } => {
            let mut query = DiscussionQuery::for_page(page);
            if let Some(tag) = tag {
                query = query.with_tag(tag);
            }
            let result = sync::load_discussions(&mut conn, session, &query).await?;
            for d in &result.discussions {
                println!(
                    "{}  {} (by {}, +{} -{}) [{}]",
                    d.id.0,
                    d.title,
                    d.author.display_name(),
                    d.upvotes.len(),
                    d.downvotes.len(),
                    d.tags.join(", "),
                );
            }
            if result.has_more {
                println!("... more on page {}", page + 1);
            }
        }
        Command::NewDiscussion {
            title,
            content,
            tags,
        } => {
            let tags = renshu_client::api::normalize_tags(&tags);
            let d = sync::create_discussion(&mut conn, session, &title, &content, tags).await?;
            println!("{}", d.id.0);
        }
        Command::Comments { discussion } => {
            let forest =
                sync::load_forest(&mut conn, session, &DiscussionId(discussion)).await?;
            print_forest(&forest, 0);
        }
        Command::Comment {
            discussion,
            text,
            parent,
        } => {
            let c = sync::submit_comment(
                &mut conn,
                session,
                &DiscussionId(discussion),
                &text,
                parent.map(CommentId),
            )
            .await?;
            println!("{}", c.id.0);
        }
        Command::Vote { discussion, down } => {
            let kind = if down {
                VoteKind::Downvote
            } else {
                VoteKind::Upvote
            };
            let d =
                sync::vote_discussion(&mut conn, session, &DiscussionId(discussion), kind).await?;
            println!("+{} -{}", d.upvotes.len(), d.downvotes.len());
        }
        Command::DeleteDiscussion { discussion } => {
            sync::delete_discussion(&mut conn, session, &DiscussionId(discussion)).await?;
        }
        Command::Feedback { text } => {
            sync::send_feedback(&mut conn, session, &text).await?;
        }
    }

    Ok(())
}
