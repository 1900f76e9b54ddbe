use chrono::Utc;

pub type Time = chrono::DateTime<Utc>;

mod article;
pub use article::{Article, ArticleData, ArticleId, ArticleType, Card, Chain, Link, Rendered, Source};

mod backend;
pub use backend::Backend;

mod comment;
pub use comment::{Comment, CommentId, NewComment};

mod error;
pub use error::Error;

mod feed;
pub use feed::{ChainId, ChainInfo, Embed, FeedArticle, FeedDataset, FeedQuery};

mod history;
pub use history::{HistoryAction, HistoryEntry};

mod user;
pub use user::{User, UserId};

/// Marker prefixed to every article identifier
pub const ARTICLE_ID_MARKER: &str = "0x";
