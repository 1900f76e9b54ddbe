use std::rc::Rc;

use bl0k_client::{
    api::{Article, HistoryEntry, User},
    history::{action_label, history_heading, toggle_label, visible_history},
};
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct HistoryProps {
    pub article: Rc<Article>,
    pub viewer: Option<User>,
    pub shown: bool,
    pub on_toggle: Callback<()>,
}

fn entry(e: &HistoryEntry) -> Html {
    html! {
        <div class="history-entry mb-2">
            <div class="flex items-center text-sm">
                <ui::DateTime t={ e.created } />
                <img class="w-6 h-6 rounded-full mx-2" src={ e.author.avatar.clone() } alt="" />
                <span class="font-bold mr-1">{ &e.author.username }</span>
                { for action_label(&e.action).into_iter().map(|part| html! {
                    <span class={ classes!(part.emphasis.map(|e| e.css_class())) }>{ part.text }</span>
                }) }
            </div>
            if let Some(diff) = util::history_diff(e) {
                <div class="history-diff">{ diff }</div>
            }
        </div>
    }
}

#[function_component(History)]
pub fn history(p: &HistoryProps) -> Html {
    let entries = match visible_history(&p.article, p.viewer.as_ref()) {
        Some(e) => e,
        None => return html! {},
    };
    html! {
        <div class="history mt-4">
            <h2 class="text-lg flex items-center">
                { history_heading(entries.len()) }
                <button type="button" class="text-sm ml-5 underline" onclick={ p.on_toggle.reform(|_| ()) }>
                    { toggle_label(p.shown) }
                </button>
            </h2>
            if p.shown {
                { for entries.into_iter().map(entry) }
            }
        </div>
    }
}
