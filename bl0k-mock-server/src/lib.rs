use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
};

use async_trait::async_trait;
use bl0k_api::{
    Article, ArticleData, ArticleId, ArticleType, Backend, Card, Chain, ChainId, ChainInfo,
    Comment, CommentId, Error, FeedArticle, FeedDataset, FeedQuery, HistoryAction, HistoryEntry,
    Link, NewComment, Source, Time, User, UserId,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

/// In-memory stand-in for the remote API
pub struct MockServer(RefCell<State>);

#[derive(Debug, Default)]
struct State {
    viewer: Option<User>,
    articles: BTreeMap<ArticleId, Article>,
    chains: BTreeMap<ChainId, ChainInfo>,
    comments_lazy: bool,
    requests: usize,
}

impl State {
    fn resolve_mut(&mut self, id: &ArticleId) -> Result<&mut Article, Error> {
        self.articles
            .values_mut()
            .find(|a| a.id == *id || a.sid == *id)
            .ok_or_else(|| Error::NotFound(id.0.clone()))
    }

    fn viewer(&self) -> Result<&User, Error> {
        self.viewer.as_ref().ok_or(Error::PermissionDenied)
    }

    /// Strips what the current viewer may not see
    fn redact(&self, mut a: Article) -> Article {
        let is_admin = self.viewer.as_ref().map_or(false, |v| v.admin);
        let is_author = self.viewer.as_ref().map_or(false, |v| a.is_authored_by(v));
        if !is_admin && !is_author {
            a.history = None;
        }
        if !is_admin {
            a.data = None;
        }
        if self.comments_lazy {
            a.comments = None;
        }
        a
    }
}

fn feed_item(a: &Article) -> FeedArticle {
    FeedArticle {
        id: a.id.clone(),
        slug: a.url.rsplit('/').next().map(String::from).unwrap_or_default(),
        date: a.date,
        topic: a.chains.first().map(|c| c.name.clone()),
        html: a.card.html.clone(),
        embed: None,
        important_embed: None,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer(RefCell::new(State::default()))
    }

    pub fn alice() -> User {
        User {
            id: UserId(String::from("u-alice")),
            username: String::from("alice"),
            avatar: String::from("/avatars/alice.png"),
            admin: false,
        }
    }

    pub fn bob() -> User {
        User {
            id: UserId(String::from("u-bob")),
            username: String::from("bob"),
            avatar: String::from("/avatars/bob.png"),
            admin: false,
        }
    }

    pub fn admin() -> User {
        User {
            id: UserId(String::from("u-admin")),
            username: String::from("admin"),
            avatar: String::from("/avatars/admin.png"),
            admin: true,
        }
    }

    fn epoch() -> Time {
        Utc.with_ymd_and_hms(2020, 5, 1, 10, 0, 0).unwrap()
    }

    /// Server with a public article `0xAAA` carrying two comments and some history, a draft
    /// `0xBBB` (short id `0xBB`) and a public `0xCCC`, spread over chains `btc` and `eth`
    pub fn example() -> MockServer {
        let server = MockServer::new();
        let btc = ChainId(String::from("btc"));
        let eth = ChainId(String::from("eth"));
        server.add_chain(btc.clone(), "Bitcoin");
        server.add_chain(eth.clone(), "Ethereum");
        let t0 = MockServer::epoch();

        server.add_article(Article {
            id: ArticleId(String::from("0xAAA")),
            sid: ArticleId(String::from("0xAAA")),
            url: String::from("/zpravy/0xAAA/slug-x"),
            kind: ArticleType::Public,
            author: MockServer::alice(),
            date: t0,
            important: true,
            data: Some(ArticleData {
                text: String::from("Bitcoin **halving** done #btc #eth"),
            }),
            card: Card {
                title: String::from("Bitcoin halving done"),
                description: String::from("The third halving happened."),
                text: String::from("Bitcoin halving done"),
                html: String::from("<p>Bitcoin <b>halving</b> done</p>"),
            },
            rendered: None,
            tags: BTreeSet::from([String::from("btc"), String::from("eth")]),
            chains: vec![Chain {
                id: btc.clone(),
                name: String::from("Bitcoin"),
            }],
            sources: vec![Source {
                name: String::from("twitter"),
                url: String::from("https://twitter.com/example/status/1"),
            }],
            links: vec![Link {
                url: String::from("https://example.org/halving"),
                surl: String::from("https://bl0k.cz/l/abc"),
                link: String::from("abc"),
            }],
            comments_count: 2,
            comments: Some(vec![
                Comment {
                    id: CommentId(String::from("c-1")),
                    author: MockServer::bob(),
                    created: t0 + Duration::minutes(5),
                    text: String::from("finally"),
                    html: String::from("<p>finally</p>"),
                },
                Comment {
                    id: CommentId(String::from("c-2")),
                    author: MockServer::alice(),
                    created: t0 + Duration::minutes(7),
                    text: String::from("indeed"),
                    html: String::from("<p>indeed</p>"),
                },
            ]),
            history: Some(vec![
                HistoryEntry {
                    created: t0 - Duration::minutes(30),
                    author: MockServer::alice(),
                    action: HistoryAction::Created,
                    diff: None,
                    data: None,
                },
                HistoryEntry {
                    created: t0 - Duration::minutes(20),
                    author: MockServer::alice(),
                    action: HistoryAction::Updated,
                    diff: Some(json!({ "text": ["Bitcoin halving", "Bitcoin **halving** done"] })),
                    data: Some(json!({ "text": "Bitcoin halving" })),
                },
                HistoryEntry {
                    created: t0,
                    author: MockServer::admin(),
                    action: HistoryAction::Published,
                    diff: None,
                    data: None,
                },
            ]),
        });

        server.add_article(Article {
            id: ArticleId(String::from("0xBBB")),
            sid: ArticleId(String::from("0xBB")),
            url: String::from("/zpravy/0xBBB/draft-y"),
            kind: ArticleType::Draft,
            author: MockServer::alice(),
            date: t0 + Duration::hours(1),
            important: false,
            data: Some(ArticleData {
                text: String::from("Ethereum upgrade soon"),
            }),
            card: Card {
                title: String::from("Ethereum upgrade soon"),
                description: String::new(),
                text: String::from("Ethereum upgrade soon"),
                html: String::from("<p>Ethereum upgrade soon</p>"),
            },
            rendered: None,
            tags: BTreeSet::new(),
            chains: vec![Chain {
                id: eth.clone(),
                name: String::from("Ethereum"),
            }],
            sources: Vec::new(),
            links: Vec::new(),
            comments_count: 0,
            comments: Some(Vec::new()),
            history: Some(Vec::new()),
        });

        server.add_article(Article {
            id: ArticleId(String::from("0xCCC")),
            sid: ArticleId(String::from("0xCCC")),
            url: String::from("/zpravy/0xCCC/gas-fees"),
            kind: ArticleType::Public,
            author: MockServer::bob(),
            date: t0 + Duration::hours(2),
            important: false,
            data: Some(ArticleData {
                text: String::from("Gas fees are up"),
            }),
            card: Card {
                title: String::from("Gas fees are up"),
                description: String::new(),
                text: String::from("Gas fees are up"),
                html: String::from("<p>Gas fees are up</p>"),
            },
            rendered: None,
            tags: BTreeSet::from([String::from("eth")]),
            chains: vec![Chain {
                id: eth,
                name: String::from("Ethereum"),
            }],
            sources: Vec::new(),
            links: Vec::new(),
            comments_count: 0,
            comments: Some(Vec::new()),
            history: None,
        });

        server
    }

    pub fn add_chain(&self, id: ChainId, name: &str) {
        self.0.borrow_mut().chains.insert(
            id,
            ChainInfo {
                name: String::from(name),
            },
        );
    }

    pub fn add_article(&self, a: Article) {
        self.0.borrow_mut().articles.insert(a.id.clone(), a);
    }

    /// Acts as if `viewer` were logged in for the following requests
    pub fn login(&self, viewer: Option<User>) {
        self.0.borrow_mut().viewer = viewer;
    }

    /// Answer articles without their comments, as if they were not loaded yet
    pub fn set_comments_lazy(&self, lazy: bool) {
        self.0.borrow_mut().comments_lazy = lazy;
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.0.borrow().requests
    }

    fn count_request(&self, what: &str) {
        tracing::trace!(what, "mock server request");
        self.0.borrow_mut().requests += 1;
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait(?Send)]
impl Backend for MockServer {
    async fn fetch_feed(&self, q: &FeedQuery) -> Result<FeedDataset, Error> {
        self.count_request("fetch-feed");
        let s = self.0.borrow();
        let mut articles = s
            .articles
            .values()
            .filter(|a| a.kind == ArticleType::Public)
            .filter(|a| match &q.chain {
                None => true,
                Some(c) => a.chains.iter().any(|ac| ac.id == *c),
            })
            .collect::<Vec<_>>();
        articles.sort_by_key(|a| std::cmp::Reverse(a.date));
        Ok(FeedDataset {
            important: articles
                .iter()
                .filter(|a| a.important)
                .map(|a| feed_item(a))
                .collect(),
            articles: articles.iter().map(|a| feed_item(a)).collect(),
            chains: s.chains.clone(),
        })
    }

    async fn fetch_article(&self, id: &ArticleId) -> Result<Article, Error> {
        self.count_request("fetch-article");
        let mut s = self.0.borrow_mut();
        let a = s.resolve_mut(id)?.clone();
        Ok(s.redact(a))
    }

    async fn post_comment(&self, article: &ArticleId, c: &NewComment) -> Result<Comment, Error> {
        self.count_request("post-comment");
        let mut s = self.0.borrow_mut();
        let author = s.viewer()?.clone();
        if c.text.trim().is_empty() {
            return Err(Error::EmptyComment);
        }
        let comment = Comment {
            id: CommentId(format!("c-{}", Uuid::new_v4())),
            author,
            created: Utc::now(),
            text: c.text.clone(),
            html: format!("<p>{}</p>", escape(&c.text)),
        };
        let a = s.resolve_mut(article)?;
        a.comments
            .get_or_insert_with(Vec::new)
            .push(comment.clone());
        a.comments_count += 1;
        Ok(comment)
    }

    async fn delete_comment(&self, article: &ArticleId, comment: &CommentId) -> Result<(), Error> {
        self.count_request("delete-comment");
        let mut s = self.0.borrow_mut();
        let viewer = s.viewer()?.clone();
        let a = s.resolve_mut(article)?;
        let comments = a.comments.get_or_insert_with(Vec::new);
        let idx = comments
            .iter()
            .position(|c| c.id == *comment)
            .ok_or_else(|| Error::NotFound(comment.0.clone()))?;
        if !viewer.can_modify(&comments[idx].author.id) {
            return Err(Error::PermissionDenied);
        }
        comments.remove(idx);
        a.comments_count -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn feed_is_filtered_by_chain() {
        let s = MockServer::example();
        let all = block_on(s.fetch_feed(&FeedQuery::all())).unwrap();
        assert_eq!(all.articles.len(), 2);
        assert_eq!(all.important.len(), 1);
        assert_eq!(all.chains.len(), 2);
        assert_eq!(all.articles[0].id, ArticleId(String::from("0xCCC")));

        let eth = block_on(s.fetch_feed(&FeedQuery::for_chain(ChainId(String::from("eth")))))
            .unwrap();
        assert_eq!(eth.articles.len(), 1);
        assert!(eth.important.is_empty());
        assert_eq!(s.request_count(), 2);
    }

    #[test]
    fn articles_are_redacted() {
        let s = MockServer::example();
        let id = ArticleId(String::from("0xAAA"));
        let anon = block_on(s.fetch_article(&id)).unwrap();
        assert!(anon.history.is_none());
        assert!(anon.data.is_none());

        s.login(Some(MockServer::alice()));
        let author = block_on(s.fetch_article(&id)).unwrap();
        assert!(author.history.is_some());
        assert!(author.data.is_none());

        s.login(Some(MockServer::admin()));
        let admin = block_on(s.fetch_article(&id)).unwrap();
        assert!(admin.history.is_some());
        assert!(admin.data.is_some());
    }

    #[test]
    fn short_id_resolves() {
        let s = MockServer::example();
        let a = block_on(s.fetch_article(&ArticleId(String::from("0xBB")))).unwrap();
        assert_eq!(a.id, ArticleId(String::from("0xBBB")));
    }

    #[test]
    fn comments_need_login() {
        let s = MockServer::example();
        let id = ArticleId(String::from("0xCCC"));
        let c = NewComment {
            text: String::from("<script>"),
        };
        assert_eq!(block_on(s.post_comment(&id, &c)), Err(Error::PermissionDenied));
        s.login(Some(MockServer::bob()));
        let posted = block_on(s.post_comment(&id, &c)).unwrap();
        assert_eq!(posted.html, "<p>&lt;script&gt;</p>");
        assert_eq!(block_on(s.fetch_article(&id)).unwrap().comments_count, 1);
    }
}
