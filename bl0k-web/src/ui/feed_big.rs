use yew::prelude::*;

use crate::ui::{feed_item, FeedState};

#[derive(Clone, PartialEq, Properties)]
pub struct FeedBigProps {
    pub state: FeedState,
}

/// Main column of the feed
#[function_component(FeedBig)]
pub fn feed_big(p: &FeedBigProps) -> Html {
    html! {
        <section class="feed-big">
            { p.state.render(|a| feed_item(a, a.tweet())) }
        </section>
    }
}
