mod article;
pub use article::{ArticleCache, ArticleLoader, ArticleRequest, JustCreated, LoadStart, Loaded, PageDetail};

mod comment;
pub use comment::{
    comments_heading, comments_section_visible, comments_view, delete_prompt, key_action, submit_comment,
    CommentDraft, CommentRow, CommentsView, Confirm, KeyAction, PendingDelete,
};

pub mod datetime;

mod feed;
pub use feed::{DataStore, FeedOptions, FeedRequest, FeedStatus, MenuEntry};

pub mod history;

pub mod introspection;

mod request;
pub use request::{RequestToken, Sequencer};

pub mod api {
    pub use bl0k_api::*;
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt::try_init();
    }
}
