mod backend;
pub use backend::Backend;

mod error;
pub use error::Error;

pub mod forest;

mod remote;
pub use remote::Connection;

mod session;
pub use session::Session;

mod state;
pub use state::{DiscussionBoard, QuestionBoard, QuestionDiscussionBoard};

pub mod sync;

mod visibility;
pub use visibility::VisibilityState;

pub mod api {
    pub use renshu_api::*;
}
