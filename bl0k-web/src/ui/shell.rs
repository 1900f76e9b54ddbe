use std::rc::Rc;

use bl0k_client::{
    api::{Backend, Error, FeedDataset, User},
    DataStore, FeedOptions, RequestToken,
};
use yew::prelude::*;

use crate::{
    api::HttpBackend,
    config::Config,
    ui::{self, FeedState, Route, View},
    util,
};

#[derive(Clone, PartialEq, Properties)]
pub struct ShellProps {
    pub route: Route,
}

pub enum ShellMsg {
    Reload,
    FeedLoaded(RequestToken, Result<FeedDataset, Error>),
}

/// Page frame: header, feeds and the article detail, driven by the route
pub struct Shell {
    backend: Rc<HttpBackend>,
    viewer: Option<User>,
    store: DataStore,
}

impl Shell {
    fn load(&mut self, ctx: &Context<Self>, refresh: bool) {
        let req = self.store.begin_load(refresh);
        let backend = self.backend.clone();
        ctx.link().send_future(async move {
            let res = backend.fetch_feed(&req.query).await;
            ShellMsg::FeedLoaded(req.token, res)
        });
    }
}

impl Component for Shell {
    type Message = ShellMsg;
    type Properties = ShellProps;

    fn create(ctx: &Context<Self>) -> Self {
        let options = match ctx.props().route.view() {
            View::Feed(o) => o,
            _ => FeedOptions::default(),
        };
        let viewer = util::viewer();
        tracing::info!(viewer = ?viewer.as_ref().map(|u| &u.username), "starting up");
        let mut this = Shell {
            backend: Rc::new(HttpBackend::new(Config::load())),
            viewer,
            store: DataStore::new(options),
        };
        this.load(ctx, false);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ShellMsg::Reload => {
                self.load(ctx, true);
                true
            }
            ShellMsg::FeedLoaded(token, res) => self.store.finish_load(token, res),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        if let View::Feed(options) = ctx.props().route.view() {
            if self.store.set_options(options) {
                self.load(ctx, true);
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.store.take_embed_request() {
            tracing::trace!("binding embeds");
            util::load_embeds();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let important = FeedState::from(self.store.important_status());
        let main = match ctx.props().route.view() {
            View::Feed(_) => html! {
                <ui::FeedBig state={ FeedState::from(self.store.articles_status()) } />
            },
            View::Article(id) => html! {
                <ui::ArticleView
                    { id }
                    backend={ self.backend.clone() }
                    viewer={ self.viewer.clone() }
                />
            },
            View::NotFound => html! {
                <div class="p-4">{ "Stránka nenalezena." }</div>
            },
        };
        html! {
            <>
                <ui::Header
                    menu={ self.store.menu() }
                    on_reload={ ctx.link().callback(|_| ShellMsg::Reload) }
                />
                <div class="flex">
                    <main class="w-2/3 p-4">{ main }</main>
                    <div class="w-1/3 p-4">
                        <ui::Feed state={ important } />
                    </div>
                </div>
            </>
        }
    }
}
