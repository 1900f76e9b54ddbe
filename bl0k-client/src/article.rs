use std::{collections::HashMap, rc::Rc};

use crate::{
    api::{Article, ArticleId, Error},
    RequestToken, Sequencer,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageDetail {
    pub title: String,
    pub description: String,
}

impl PageDetail {
    pub fn of(a: &Article) -> PageDetail {
        PageDetail {
            title: a.card.title.clone(),
            description: a.card.description.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArticleRequest {
    pub token: RequestToken,
    pub id: ArticleId,
}

/// What the host has to do once an article became current
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loaded {
    pub page: PageDetail,

    /// Canonical url to silently replace the current route with
    pub replace_route: Option<String>,

    /// Short id of the just-created article the page may now forget
    pub evicted_just_created: Option<ArticleId>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadStart {
    /// Set when the article could be shown without waiting for the network
    pub immediate: Option<Loaded>,
    pub request: ArticleRequest,
}

#[derive(serde::Deserialize)]
struct PageBlob {
    #[serde(default)]
    article: Option<Article>,
}

/// Article the user just created, which the read path may not know about yet
#[derive(Clone, Debug, Default)]
pub struct JustCreated(Option<Article>);

impl JustCreated {
    /// Reads the article out of the blob the editor leaves on the page
    pub fn from_page_blob(json: &str) -> Option<Article> {
        match serde_json::from_str::<PageBlob>(json) {
            Ok(b) => b.article,
            Err(err) => {
                tracing::error!(?err, "failed parsing the page blob");
                None
            }
        }
    }

    pub fn hold(&mut self, a: Article) {
        self.0 = Some(a);
    }

    pub fn matching(&self, id: &ArticleId) -> Option<&Article> {
        self.0.as_ref().filter(|a| a.sid == *id)
    }

    /// Drops the held article once the server returned its canonical version
    ///
    /// Returns the short id of the dropped article.
    pub fn evict_superseded(&mut self, canonical: &Article) -> Option<ArticleId> {
        if !self
            .0
            .as_ref()
            .map_or(false, |a| a.id == canonical.id || a.sid == canonical.sid)
        {
            return None;
        }
        tracing::debug!(id = %canonical.id, "just-created article superseded");
        self.0.take().map(|a| a.sid)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Known articles, addressable by id or short id
#[derive(Clone, Debug, Default)]
pub struct ArticleCache {
    articles: HashMap<ArticleId, Rc<Article>>,
    short_ids: HashMap<ArticleId, ArticleId>,
}

impl ArticleCache {
    pub fn get(&self, id: &ArticleId) -> Option<Rc<Article>> {
        let id = self.short_ids.get(id).unwrap_or(id);
        self.articles.get(id).cloned()
    }

    /// Inserts `a`, keeping the lazily-loaded parts of the known version that `a` lacks
    pub fn update(&mut self, mut a: Article) -> Rc<Article> {
        if let Some(old) = self.articles.get(&a.id) {
            if a.comments.is_none() {
                a.comments = old.comments.clone();
            }
            if a.history.is_none() {
                a.history = old.history.clone();
            }
            if a.data.is_none() {
                a.data = old.data.clone();
            }
            if a.rendered.is_none() {
                a.rendered = old.rendered.clone();
            }
        }
        self.short_ids.insert(a.sid.clone(), a.id.clone());
        let a = Rc::new(a);
        self.articles.insert(a.id.clone(), a.clone());
        a
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// State behind the article detail view
#[derive(Clone, Debug, Default)]
pub struct ArticleLoader {
    id: Option<ArticleId>,
    current: Option<Rc<Article>>,
    error: Option<Error>,
    cache: ArticleCache,
    just_created: JustCreated,
    requests: Sequencer,
    show_history: bool,
}

impl ArticleLoader {
    pub fn new() -> ArticleLoader {
        ArticleLoader::default()
    }

    pub fn id(&self) -> Option<&ArticleId> {
        self.id.as_ref()
    }

    pub fn current(&self) -> Option<Rc<Article>> {
        self.current.clone()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn hold_just_created(&mut self, a: Article) {
        self.just_created.hold(a);
    }

    pub fn just_created(&self) -> &JustCreated {
        &self.just_created
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    pub fn toggle_history(&mut self) -> bool {
        self.show_history = !self.show_history;
        true
    }

    fn make_current(&mut self, a: Rc<Article>, current_route: &str) -> Loaded {
        let replace_route = (current_route != a.url).then(|| a.url.clone());
        let page = PageDetail::of(&a);
        self.current = Some(a);
        self.error = None;
        Loaded {
            page,
            replace_route,
            evicted_just_created: None,
        }
    }

    /// Starts loading article `id`
    ///
    /// A just-created article with the same short id is shown right away; the network fetch
    /// is issued either way.
    pub fn load(&mut self, id: ArticleId, current_route: &str) -> LoadStart {
        tracing::debug!(%id, "loading article");
        if self.id.as_ref() != Some(&id) {
            self.current = self.cache.get(&id);
            self.error = None;
        }
        self.id = Some(id.clone());
        let immediate = match self.just_created.matching(&id).cloned() {
            None => None,
            Some(blob) => {
                let a = self.cache.update(blob);
                Some(self.make_current(a, current_route))
            }
        };
        LoadStart {
            immediate,
            request: ArticleRequest {
                token: self.requests.issue(),
                id,
            },
        }
    }

    /// Reloads the current article, if any
    pub fn reload(&mut self, current_route: &str) -> Option<LoadStart> {
        let id = self.id.clone()?;
        Some(self.load(id, current_route))
    }

    /// Handles the route now pointing at `id`; returns None if that is already the current one
    pub fn route_changed(&mut self, id: ArticleId, current_route: &str) -> Option<LoadStart> {
        if self.id.as_ref() == Some(&id) {
            return None;
        }
        self.show_history = false;
        Some(self.load(id, current_route))
    }

    /// Applies the answer to request `token`
    ///
    /// Returns None if the answer is stale and was dropped, otherwise what the host must do
    /// before re-rendering.
    pub fn finish(
        &mut self,
        token: RequestToken,
        res: Result<Article, Error>,
        current_route: &str,
    ) -> Option<Result<Loaded, Error>> {
        if !self.requests.complete(token) {
            tracing::debug!(?token, "dropping stale article answer");
            return None;
        }
        Some(match res {
            Ok(a) => {
                let evicted = self.just_created.evict_superseded(&a);
                let a = self.cache.update(a);
                let mut l = self.make_current(a, current_route);
                l.evicted_just_created = evicted;
                Ok(l)
            }
            Err(err) => {
                tracing::error!(?err, "failed loading article");
                self.error = Some(err.clone());
                Err(err)
            }
        })
    }

    /// The detail view went away
    pub fn unmount(&mut self) {
        self.id = None;
        self.current = None;
        self.error = None;
        self.show_history = false;
        self.requests.cancel();
    }
}

#[cfg(test)]
mod tests {
    use bl0k_mock_server::MockServer;
    use futures::executor::block_on;

    use super::*;
    use crate::api::Backend;

    /// Stands for the router: remembers the route and counts silent replacements
    struct Host {
        route: String,
        replacements: usize,
        title: Option<String>,
        evicted: Vec<ArticleId>,
    }

    impl Host {
        fn at(route: &str) -> Host {
            crate::init_test_logging();
            Host {
                route: String::from(route),
                replacements: 0,
                title: None,
                evicted: Vec::new(),
            }
        }

        fn apply(&mut self, l: Loaded) {
            self.title = Some(l.page.title);
            self.evicted.extend(l.evicted_just_created);
            if let Some(r) = l.replace_route {
                self.route = r;
                self.replacements += 1;
            }
        }

        fn run(&mut self, loader: &mut ArticleLoader, server: &MockServer, start: LoadStart) {
            if let Some(l) = start.immediate {
                self.apply(l);
            }
            let res = block_on(server.fetch_article(&start.request.id));
            if let Some(Ok(l)) = loader.finish(start.request.token, res, &self.route) {
                self.apply(l);
            }
        }
    }

    fn id(s: &str) -> ArticleId {
        ArticleId(String::from(s))
    }

    #[test]
    fn route_is_repaired_once() {
        let server = MockServer::example();
        let mut host = Host::at("/zpravy/0xAAA/old-slug");
        let mut loader = ArticleLoader::new();

        let start = loader.load(id("0xAAA"), &host.route);
        assert!(start.immediate.is_none());
        assert!(loader.current().is_none());
        host.run(&mut loader, &server, start);

        assert_eq!(host.route, "/zpravy/0xAAA/slug-x");
        assert_eq!(host.replacements, 1);
        let a = loader.current().unwrap();
        assert_eq!(host.title.as_deref(), Some(&a.card.title as &str));

        // The router now points at the same article, which does not trigger a reload
        assert!(loader
            .route_changed(ArticleId::from_route_param("0xAAA"), &host.route)
            .is_none());

        // An explicit reload with the route already canonical does not replace it again
        let start = loader.reload(&host.route).unwrap();
        host.run(&mut loader, &server, start);
        assert_eq!(host.replacements, 1);
    }

    #[test]
    fn pending_comments_show_placeholder_until_loaded() {
        let server = MockServer::example();
        server.set_comments_lazy(true);
        let mut host = Host::at("/zpravy/0xAAA/old-slug");
        let mut loader = ArticleLoader::new();
        let start = loader.load(id("0xAAA"), &host.route);
        host.run(&mut loader, &server, start);
        let a = loader.current().unwrap();
        assert_eq!(a.comments_count, 2);
        assert!(a.comments_pending());

        server.set_comments_lazy(false);
        let start = loader.reload(&host.route).unwrap();
        host.run(&mut loader, &server, start);
        let a = loader.current().unwrap();
        assert!(!a.comments_pending());
        assert_eq!(a.comments.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn just_created_is_shown_immediately_then_superseded() {
        let server = MockServer::example();
        let mut blob = block_on(server.fetch_article(&id("0xAAA"))).unwrap();
        blob.card.title = String::from("still being indexed");
        blob.comments = None;
        blob.comments_count = 0;

        let mut loader = ArticleLoader::new();
        loader.hold_just_created(blob);
        let mut host = Host::at("/zpravy/0xAAA/slug-x");
        let start = loader.load(id("0xAAA"), &host.route);
        let immediate = start.immediate.clone().unwrap();
        assert_eq!(immediate.page.title, "still being indexed");
        assert_eq!(immediate.replace_route, None);
        assert_eq!(
            loader.current().unwrap().card.title,
            "still being indexed"
        );
        assert!(!loader.just_created().is_empty());
        assert!(host.evicted.is_empty());

        host.run(&mut loader, &server, start);
        assert!(loader.just_created().is_empty());
        assert_eq!(host.evicted, vec![id("0xAAA")]);
        assert_ne!(loader.current().unwrap().card.title, "still being indexed");
        assert_eq!(host.replacements, 0);
    }

    #[test]
    fn just_created_is_matched_on_short_id_only() {
        let server = MockServer::example();
        let blob = block_on(server.fetch_article(&id("0xBBB"))).unwrap();
        let mut loader = ArticleLoader::new();
        loader.hold_just_created(blob);
        let mut host = Host::at("/");
        let start = loader.load(id("0xAAA"), &host.route);
        assert!(start.immediate.is_none());

        host.run(&mut loader, &server, start);
        assert!(!loader.just_created().is_empty());
        assert!(host.evicted.is_empty());
    }

    #[test]
    fn page_blob_holds_the_article_under_its_key() {
        crate::init_test_logging();
        let server = MockServer::example();
        let a = block_on(server.fetch_article(&id("0xAAA"))).unwrap();
        let json = serde_json::json!({ "article": a }).to_string();
        let parsed = JustCreated::from_page_blob(&json).unwrap();
        assert_eq!(parsed.sid, id("0xAAA"));
        assert_eq!(parsed.card.title, a.card.title);

        assert!(JustCreated::from_page_blob(r#"{ "article": null }"#).is_none());
        assert!(JustCreated::from_page_blob("{}").is_none());
        assert!(JustCreated::from_page_blob("not json").is_none());
    }

    #[test]
    fn last_issued_load_wins() {
        let server = MockServer::example();
        let mut loader = ArticleLoader::new();
        let first = loader.load(id("0xAAA"), "/");
        let second = loader.route_changed(id("0xBBB"), "/").unwrap();

        let second_res = block_on(server.fetch_article(&second.request.id));
        let first_res = block_on(server.fetch_article(&first.request.id));
        assert!(loader
            .finish(second.request.token, second_res, "/")
            .unwrap()
            .is_ok());
        assert!(loader.finish(first.request.token, first_res, "/").is_none());
        assert_eq!(loader.current().unwrap().id, id("0xBBB"));
    }

    #[test]
    fn route_change_resets_history_toggle() {
        let mut loader = ArticleLoader::new();
        loader.load(id("0xAAA"), "/");
        assert!(loader.toggle_history());
        assert!(loader.show_history());
        assert!(loader.route_changed(id("0xAAA"), "/").is_none());
        assert!(loader.show_history());
        loader.route_changed(id("0xBBB"), "/");
        assert!(!loader.show_history());
    }

    #[test]
    fn failure_is_kept_for_the_view() {
        let server = MockServer::example();
        let mut loader = ArticleLoader::new();
        let start = loader.load(id("0xDOESNOTEXIST"), "/");
        let res = block_on(server.fetch_article(&start.request.id));
        let out = loader.finish(start.request.token, res, "/").unwrap();
        assert!(matches!(out, Err(Error::NotFound(_))));
        assert!(matches!(loader.error(), Some(Error::NotFound(_))));
        assert!(loader.current().is_none());
    }

    #[test]
    fn unmount_drops_article_and_pending_answer() {
        let server = MockServer::example();
        let mut loader = ArticleLoader::new();
        let start = loader.load(id("0xAAA"), "/");
        loader.toggle_history();
        loader.unmount();
        assert!(loader.current().is_none());
        assert!(!loader.show_history());
        let res = block_on(server.fetch_article(&start.request.id));
        assert!(loader.finish(start.request.token, res, "/").is_none());
        assert!(loader.current().is_none());
    }

    #[test]
    fn cache_keeps_lazily_loaded_parts() {
        let server = MockServer::example();
        let full = block_on(server.fetch_article(&id("0xAAA"))).unwrap();
        let mut cache = ArticleCache::default();
        cache.update(full.clone());
        let mut light = full.clone();
        light.comments = None;
        light.card.title = String::from("new title");
        let merged = cache.update(light);
        assert_eq!(merged.card.title, "new title");
        assert_eq!(merged.comments, full.comments);
        assert_eq!(cache.get(&full.sid).unwrap().card.title, "new title");
        assert_eq!(cache.len(), 1);
    }
}
