use async_trait::async_trait;
use bl0k_client::api::{
    Article, ArticleId, Backend, Comment, CommentId, Error, FeedDataset, FeedQuery, NewComment,
};

use crate::config::Config;

fn network(e: reqwest::Error) -> Error {
    Error::Network(format!("{e}"))
}

/// Reads the answer, turning non-success responses into the error the server described
async fn answer(resp: reqwest::Result<reqwest::Response>) -> Result<reqwest::Response, Error> {
    let resp = resp.map_err(network)?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await.map_err(network)?;
    let err = Error::from_response(status, &body);
    tracing::warn!(%status, ?err, "server answered with an error");
    Err(err)
}

async fn answer_json<R>(resp: reqwest::Result<reqwest::Response>) -> Result<R, Error>
where
    R: for<'de> serde::Deserialize<'de>,
{
    answer(resp)
        .await?
        .json()
        .await
        .map_err(|e| Error::Unknown(format!("failed parsing server answer: {e}")))
}

/// The remote API, reached over HTTP
#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackend {
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> HttpBackend {
        HttpBackend { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_feed(&self, q: &FeedQuery) -> Result<FeedDataset, Error> {
        let req = crate::CLIENT.get(self.url("articles")).query(&q.pairs());
        answer_json(self.authed(req).send().await).await
    }

    async fn fetch_article(&self, id: &ArticleId) -> Result<Article, Error> {
        let req = crate::CLIENT.get(self.url(&format!("article/{id}")));
        answer_json(self.authed(req).send().await).await
    }

    async fn post_comment(&self, article: &ArticleId, c: &NewComment) -> Result<Comment, Error> {
        let req = crate::CLIENT
            .post(self.url(&format!("article/{article}/comment")))
            .json(c);
        answer_json(self.authed(req).send().await).await
    }

    async fn delete_comment(&self, article: &ArticleId, comment: &CommentId) -> Result<(), Error> {
        let req = crate::CLIENT.delete(self.url(&format!("article/{article}/comment/{comment}")));
        answer(self.authed(req).send().await).await?;
        Ok(())
    }
}
