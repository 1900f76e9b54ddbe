use std::rc::Rc;

use bl0k_client::{
    api::{Article, User},
    introspection::{introspection_rows, introspection_visible},
};
use chrono::Utc;
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct IntrospectionProps {
    pub article: Rc<Article>,
    pub viewer: Option<User>,
}

#[function_component(Introspection)]
pub fn introspection(p: &IntrospectionProps) -> Html {
    if !introspection_visible(&p.article, p.viewer.as_ref()) {
        return html! {};
    }
    let rows = introspection_rows(&p.article, Utc::now(), util::local_tz());
    html! {
        <div class="introspection mt-8">
            <h2 class="font-bold mb-2">{ "Introspekce" }</h2>
            <ui::ITable { rows } />
        </div>
    }
}
