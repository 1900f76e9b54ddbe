use std::rc::Rc;

use bl0k_client::{
    api::{Article, ArticleId, Backend, Comment, CommentId, Error, User},
    comments_heading, comments_section_visible, submit_comment, ArticleLoader, CommentDraft,
    LoadStart, Loaded, PendingDelete, RequestToken,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::HttpBackend,
    ui::{self, Route},
    util,
};

#[derive(Clone, PartialEq, Properties)]
pub struct ArticleViewProps {
    pub id: ArticleId,
    pub backend: Rc<HttpBackend>,
    pub viewer: Option<User>,
}

pub enum ArticleMsg {
    Loaded(RequestToken, Result<Article, Error>),
    ToggleHistory,
    DraftChanged(String),
    Submit,
    Submitted(Result<Comment, Error>),
    Delete(CommentId),
    Deleted(Result<(), Error>),
}

pub struct ArticleView {
    loader: ArticleLoader,
    draft: CommentDraft,

    /// Last failed comment submission or deletion
    action_error: Option<Error>,
}

fn current_route(ctx: &Context<ArticleView>) -> String {
    ctx.link()
        .location()
        .map(|l| String::from(l.path()))
        .unwrap_or_default()
}

fn apply(ctx: &Context<ArticleView>, l: Loaded) {
    util::set_page_detail(&l.page);
    if let Some(sid) = &l.evicted_just_created {
        util::forget_just_created(sid);
    }
    if let Some(url) = l.replace_route {
        match (Route::from_url(&url), ctx.link().navigator()) {
            (Some(route), Some(nav)) => {
                tracing::debug!(%url, "replacing route with canonical url");
                nav.replace(&route);
            }
            _ => tracing::warn!(%url, "cannot route to canonical url"),
        }
    }
}

impl ArticleView {
    fn start(&mut self, ctx: &Context<Self>, start: LoadStart) {
        if let Some(l) = start.immediate {
            apply(ctx, l);
        }
        let req = start.request;
        let backend = ctx.props().backend.clone();
        ctx.link().send_future(async move {
            let res = backend.fetch_article(&req.id).await;
            ArticleMsg::Loaded(req.token, res)
        });
    }

    fn reload(&mut self, ctx: &Context<Self>) {
        if let Some(s) = self.loader.reload(&current_route(ctx)) {
            self.start(ctx, s);
        }
    }

    fn current_id(&self) -> Option<ArticleId> {
        self.loader.current().map(|a| a.id.clone())
    }
}

impl Component for ArticleView {
    type Message = ArticleMsg;
    type Properties = ArticleViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = ArticleView {
            loader: ArticleLoader::new(),
            draft: CommentDraft::default(),
            action_error: None,
        };
        if let Some(a) = util::just_created() {
            this.loader.hold_just_created(a);
        }
        let start = this
            .loader
            .load(ctx.props().id.clone(), &current_route(ctx));
        this.start(ctx, start);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ArticleMsg::Loaded(token, res) => {
                match self.loader.finish(token, res, &current_route(ctx)) {
                    None => return false,
                    Some(Ok(l)) => apply(ctx, l),
                    Some(Err(_)) => (),
                }
                true
            }
            ArticleMsg::ToggleHistory => self.loader.toggle_history(),
            ArticleMsg::DraftChanged(text) => self.draft.set_text(text),
            ArticleMsg::Submit => {
                let (id, comment) = match (self.current_id(), self.draft.prepare()) {
                    (Some(id), Ok(c)) => (id, c),
                    (_, Err(err)) => {
                        tracing::debug!(?err, "not sending comment");
                        return false;
                    }
                    (None, _) => return false,
                };
                let backend = ctx.props().backend.clone();
                ctx.link().send_future(async move {
                    ArticleMsg::Submitted(submit_comment(&*backend, &id, comment).await)
                });
                false
            }
            ArticleMsg::Submitted(Ok(c)) => {
                tracing::info!(comment = %c.id, "comment posted");
                self.action_error = None;
                self.draft.submitted();
                self.reload(ctx);
                true
            }
            ArticleMsg::Delete(comment) => {
                let id = match self.current_id() {
                    Some(id) => id,
                    None => return false,
                };
                let pending = match PendingDelete::confirm(&util::BrowserConfirm, id, comment) {
                    Some(p) => p,
                    None => return false,
                };
                let backend = ctx.props().backend.clone();
                ctx.link()
                    .send_future(async move { ArticleMsg::Deleted(pending.send(&*backend).await) });
                false
            }
            ArticleMsg::Deleted(Ok(())) => {
                self.action_error = None;
                self.reload(ctx);
                true
            }
            ArticleMsg::Submitted(Err(err)) | ArticleMsg::Deleted(Err(err)) => {
                tracing::error!(?err, "comment action failed");
                self.action_error = Some(err);
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        if let Some(s) = self
            .loader
            .route_changed(ctx.props().id.clone(), &current_route(ctx))
        {
            self.draft = CommentDraft::default();
            self.action_error = None;
            self.start(ctx, s);
        }
        true
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.loader.unmount();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let a = match (self.loader.current(), self.loader.error()) {
            (Some(a), _) => a,
            (None, Some(e)) => {
                return html! {
                    <div class="text-red-700">{ format!("Zprávu se nepodařilo načíst: {e}") }</div>
                }
            }
            (None, None) => return html! { <div>{ "Načítám zprávu ..." }</div> },
        };
        let viewer = ctx.props().viewer.clone();
        let chains = a
            .chains
            .iter()
            .map(|c| &c.name as &str)
            .collect::<Vec<_>>()
            .join(", ");
        html! {
            <article class="article-detail">
                <div class="text-sm text-gray-500">
                    <ui::DateTime t={ a.date } />
                    <span class="ml-2 font-bold">{ chains }</span>
                </div>
                <div class="article-text">{ util::trusted_html(&a.card.html) }</div>
                if let Some(e) = self.loader.error() {
                    <div class="text-red-700">{ format!("Zprávu se nepodařilo obnovit: {e}") }</div>
                }
                <ui::History
                    article={ a.clone() }
                    viewer={ viewer.clone() }
                    shown={ self.loader.show_history() }
                    on_toggle={ ctx.link().callback(|_| ArticleMsg::ToggleHistory) }
                />
                <ui::Introspection article={ a.clone() } viewer={ viewer.clone() } />
                if comments_section_visible(&a, viewer.as_ref()) {
                    <h2 class="text-lg mt-4">{ comments_heading(&a) }</h2>
                    <ui::Comments
                        article={ a.clone() }
                        { viewer }
                        draft={ String::from(self.draft.text()) }
                        rows={ self.draft.rows() }
                        error={ self.action_error.clone() }
                        on_input={ ctx.link().callback(ArticleMsg::DraftChanged) }
                        on_submit={ ctx.link().callback(|_| ArticleMsg::Submit) }
                        on_delete={ ctx.link().callback(ArticleMsg::Delete) }
                    />
                }
            </article>
        }
    }
}
