mod app;
pub use app::{App, Route, View};

mod article;
pub use article::{ArticleMsg, ArticleView};

mod comments;
pub use comments::Comments;

mod date;
pub use date::DateTime;

mod feed;
pub use feed::{feed_item, Feed, FeedState};

mod feed_big;
pub use feed_big::FeedBig;

mod header;
pub use header::Header;

mod history;
pub use history::History;

mod introspection;
pub use introspection::Introspection;

mod itable;
pub use itable::ITable;

mod shell;
pub use shell::{Shell, ShellMsg};
