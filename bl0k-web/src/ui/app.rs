use bl0k_client::{
    api::{ArticleId, ChainId},
    FeedOptions,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::ui;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/chain/:chain")]
    Chain { chain: String },
    #[at("/zpravy/:id/:slug")]
    Article { id: String, slug: String },
    #[at("/zpravy/:id")]
    ArticleNoSlug { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
    #[at("/:sid")]
    Short { sid: String },
}

/// What the main area shows for a route
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Feed(FeedOptions),
    Article(ArticleId),
    NotFound,
}

impl Route {
    pub fn view(&self) -> View {
        match self {
            Route::Home => View::Feed(FeedOptions::default()),
            Route::Chain { chain } => View::Feed(FeedOptions {
                chain: Some(ChainId(chain.clone())),
            }),
            Route::Article { id, .. } | Route::ArticleNoSlug { id } => {
                View::Article(ArticleId::from_route_param(id))
            }
            Route::Short { sid } => View::Article(ArticleId::from_route_param(sid)),
            Route::NotFound => View::NotFound,
        }
    }

    /// Route for an in-app url, None for anything the router does not know
    pub fn from_url(url: &str) -> Option<Route> {
        Route::recognize(url).filter(|r| *r != Route::NotFound)
    }
}

fn switch(route: Route) -> Html {
    html! { <ui::Shell { route } /> }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={ switch } />
        </BrowserRouter>
    }
}
