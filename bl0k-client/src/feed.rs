use std::rc::Rc;

use crate::{
    api::{ChainId, Error, FeedArticle, FeedDataset, FeedQuery},
    RequestToken, Sequencer,
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeedOptions {
    pub chain: Option<ChainId>,
}

impl FeedOptions {
    pub fn query(&self) -> FeedQuery {
        match &self.chain {
            None => FeedQuery::all(),
            Some(c) => FeedQuery::for_chain(c.clone()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedRequest {
    pub token: RequestToken,
    pub query: FeedQuery,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, PartialEq)]
pub enum FeedStatus<'a> {
    Loading,
    Failed(&'a Error),
    Empty,
    Items(&'a [FeedArticle]),
}

/// Last fetched feed, along with the state of the fetch
///
/// Every method returning `bool` returns whether the views need re-rendering.
#[derive(Clone, Debug)]
pub struct DataStore {
    data: Rc<FeedDataset>,
    loading: bool,
    error: Option<Error>,
    options: FeedOptions,
    requests: Sequencer,
    embeds_pending: bool,
}

impl DataStore {
    pub fn new(options: FeedOptions) -> DataStore {
        DataStore {
            data: Rc::new(FeedDataset::default()),
            loading: false,
            error: None,
            options,
            requests: Sequencer::new(),
            embeds_pending: false,
        }
    }

    pub fn data(&self) -> Rc<FeedDataset> {
        self.data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true iff the options actually changed, in which case the feed must be reloaded
    pub fn set_options(&mut self, options: FeedOptions) -> bool {
        if self.options == options {
            return false;
        }
        tracing::debug!(?options, "feed options changed");
        self.options = options;
        true
    }

    /// Starts a fetch of the feed for the current options
    ///
    /// With `refresh`, the displayed lists are emptied right away, before the answer comes.
    /// The caller must re-render after this in any case, as the loading flag changed.
    pub fn begin_load(&mut self, refresh: bool) -> FeedRequest {
        self.loading = true;
        self.error = None;
        if refresh {
            let data = Rc::make_mut(&mut self.data);
            data.articles.clear();
            data.important.clear();
        }
        let token = self.requests.issue();
        tracing::debug!(?token, refresh, "loading feed");
        FeedRequest {
            token,
            query: self.options.query(),
        }
    }

    /// Applies the answer to request `token`, dropping it if a newer request was issued since
    pub fn finish_load(&mut self, token: RequestToken, res: Result<FeedDataset, Error>) -> bool {
        if !self.requests.complete(token) {
            tracing::debug!(?token, "dropping stale feed answer");
            return false;
        }
        self.loading = false;
        match res {
            Ok(data) => {
                self.data = Rc::new(data);
                self.embeds_pending = true;
            }
            Err(err) => {
                tracing::error!(?err, "failed loading feed");
                self.error = Some(err);
            }
        }
        true
    }

    /// Returns true once per applied dataset, when the embed widget needs to bind new content
    pub fn take_embed_request(&mut self) -> bool {
        std::mem::replace(&mut self.embeds_pending, false)
    }

    fn status<'a>(&'a self, items: &'a [FeedArticle]) -> FeedStatus<'a> {
        if self.loading {
            return FeedStatus::Loading;
        }
        if let Some(e) = &self.error {
            return FeedStatus::Failed(e);
        }
        match items.is_empty() {
            true => FeedStatus::Empty,
            false => FeedStatus::Items(items),
        }
    }

    pub fn articles_status(&self) -> FeedStatus<'_> {
        self.status(&self.data.articles)
    }

    pub fn important_status(&self) -> FeedStatus<'_> {
        self.status(&self.data.important)
    }

    /// Header navigation: everything, then one entry per known chain
    pub fn menu(&self) -> Vec<MenuEntry> {
        std::iter::once(MenuEntry {
            label: String::from("Vše"),
            href: String::from("/"),
            active: self.options.chain.is_none(),
        })
        .chain(self.data.chains.iter().map(|(id, c)| MenuEntry {
            label: c.name.clone(),
            href: format!("/chain/{id}"),
            active: self.options.chain.as_ref() == Some(id),
        }))
        .collect()
    }
}
