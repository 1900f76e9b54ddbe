use bl0k_client::{api::Time, datetime};
use chrono::Utc;
use yew::prelude::*;

use crate::util;

#[derive(Clone, PartialEq, Properties)]
pub struct DateTimeProps {
    pub t: Time,
}

#[function_component(DateTime)]
pub fn date_time(p: &DateTimeProps) -> Html {
    let d = datetime::format_date(p.t, Utc::now(), util::local_tz());
    html! {
        <span class="date" title={ d.title }>{ d.text }</span>
    }
}
