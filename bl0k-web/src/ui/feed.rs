use bl0k_client::{api::FeedArticle, FeedStatus};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    ui::{self, Route},
    util,
};

/// Owned snapshot of a feed list, for passing down as a property
#[derive(Clone, Debug, PartialEq)]
pub enum FeedState {
    Loading,
    Failed(String),
    Empty,
    Items(Vec<FeedArticle>),
}

impl From<FeedStatus<'_>> for FeedState {
    fn from(s: FeedStatus<'_>) -> FeedState {
        match s {
            FeedStatus::Loading => FeedState::Loading,
            FeedStatus::Failed(e) => FeedState::Failed(format!("{e}")),
            FeedStatus::Empty => FeedState::Empty,
            FeedStatus::Items(items) => FeedState::Items(items.to_vec()),
        }
    }
}

impl FeedState {
    /// Renders the list, or the placeholder standing in for it
    pub fn render(&self, item: impl Fn(&FeedArticle) -> Html) -> Html {
        match self {
            FeedState::Loading => html! { <div class="feed-status">{ "Načítám obsah ..." }</div> },
            FeedState::Failed(e) => html! {
                <div class="feed-status text-red-700">{ format!("Obsah se nepodařilo načíst: {e}") }</div>
            },
            FeedState::Empty => {
                html! { <div class="feed-status">{ "Nenalezeny žádné zprávy." }</div> }
            }
            FeedState::Items(items) => items.iter().map(item).collect(),
        }
    }
}

pub fn feed_item(a: &FeedArticle, tweet: Option<&str>) -> Html {
    html! {
        <div class="feed-item mb-4" key={ a.id.0.clone() }>
            <div class="text-sm text-gray-500">
                <Link<Route> to={ Route::Article { id: a.id.0.clone(), slug: a.slug.clone() } }>
                    <ui::DateTime t={ a.date } />
                </Link<Route>>
                if let Some(topic) = &a.topic {
                    <span class="ml-2 font-bold">{ topic }</span>
                }
            </div>
            <div class="feed-text">{ util::trusted_html(&a.html) }</div>
            if let Some(t) = tweet {
                <div class="tweet-embed">{ util::trusted_html(t) }</div>
            }
        </div>
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct FeedProps {
    pub state: FeedState,
}

/// Sidebar list of important articles
#[function_component(Feed)]
pub fn feed(p: &FeedProps) -> Html {
    html! {
        <aside class="feed-important">
            <h2 class="font-bold mb-2">{ "Důležité" }</h2>
            { p.state.render(|a| feed_item(a, a.important_tweet())) }
        </aside>
    }
}
