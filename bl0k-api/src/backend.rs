use async_trait::async_trait;

use crate::{Article, ArticleId, Comment, CommentId, Error, FeedDataset, FeedQuery, NewComment};

/// Remote API, as seen from the client
///
/// Futures are not required to be `Send`: the browser runs everything on a single thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn fetch_feed(&self, q: &FeedQuery) -> Result<FeedDataset, Error>;
    async fn fetch_article(&self, id: &ArticleId) -> Result<Article, Error>;
    async fn post_comment(&self, article: &ArticleId, c: &NewComment) -> Result<Comment, Error>;
    async fn delete_comment(&self, article: &ArticleId, comment: &CommentId) -> Result<(), Error>;
}
