use bl0k_client::{
    api::{Article, ArticleId, HistoryEntry, User},
    Confirm, JustCreated, PageDetail,
};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

#[wasm_bindgen(inline_js = "
    export function get_timezone() {
        return Intl.DateTimeFormat().resolvedOptions().timeZone;
    }
    export function tooltip_process(html) {
        const b = window.$bl0k;
        if (b && typeof b.tooltipProcess === 'function') {
            return b.tooltipProcess(html);
        }
        return undefined;
    }
    export function diff_html(delta, left) {
        const j = window.jsondiffpatch;
        if (!j || !j.formatters || !j.formatters.html) {
            return undefined;
        }
        return j.formatters.html.format(JSON.parse(delta), JSON.parse(left));
    }
    export function load_embeds() {
        if (window.twttr && window.twttr.widgets) {
            window.twttr.widgets.load();
        }
    }
    export function current_user() {
        const b = window.$bl0k;
        if (b && b.auth && b.auth.user) {
            return JSON.stringify(b.auth.user);
        }
        return undefined;
    }
    export function page_blob() {
        const b = window.$bl0k;
        if (!b || !b.store || !b.store.blob) {
            return undefined;
        }
        return JSON.stringify(b.store.blob);
    }
    export function clear_page_blob(sid) {
        const b = window.$bl0k;
        const blob = b && b.store && b.store.blob;
        if (blob && blob.article && blob.article.sid === sid) {
            b.store.blob = null;
        }
    }
")]
extern "C" {
    fn get_timezone() -> String;
    fn tooltip_process(html: &str) -> Option<String>;
    fn diff_html(delta: &str, left: &str) -> Option<String>;
    pub fn load_embeds();
    fn current_user() -> Option<String>;
    fn page_blob() -> Option<String>;
    fn clear_page_blob(sid: &str);
}

lazy_static::lazy_static! {
    static ref LOCAL_TZ: chrono_tz::Tz = {
        let name = get_timezone();
        match name.parse() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(%name, "host timezone unknown to chrono-tz, falling back to Prague");
                chrono_tz::Europe::Prague
            }
        }
    };
}

pub fn local_tz() -> chrono_tz::Tz {
    *LOCAL_TZ
}

fn parse_js<T>(what: &str, json: Option<String>) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    match serde_json::from_str(&json?) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::error!(what, ?err, "failed parsing object handed over by the page");
            None
        }
    }
}

/// User logged in on the page, if any
pub fn viewer() -> Option<User> {
    parse_js("viewer", current_user())
}

/// Article the editor just created, left on the page until the server knows it
pub fn just_created() -> Option<Article> {
    JustCreated::from_page_blob(&page_blob()?)
}

pub fn forget_just_created(sid: &ArticleId) {
    clear_page_blob(sid.as_str());
}

pub fn trusted_html(html: &str) -> Html {
    Html::from_html_unchecked(AttrValue::from(String::from(html)))
}

/// User-provided html, displayed as plain text if the page has no sanitizer
pub fn sanitized_html(html: &str) -> Html {
    match tooltip_process(html) {
        Some(clean) => trusted_html(&clean),
        None => html! { { html } },
    }
}

pub fn history_diff(e: &HistoryEntry) -> Option<Html> {
    let delta = e.diff.as_ref()?;
    let left = e.data.clone().unwrap_or(serde_json::Value::Null);
    diff_html(&delta.to_string(), &left.to_string()).map(|d| trusted_html(&d))
}

pub fn set_page_detail(p: &PageDetail) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    document.set_title(&p.title);
    match document.query_selector("meta[name=description]") {
        Ok(Some(meta)) => {
            if meta.set_attribute("content", &p.description).is_err() {
                tracing::warn!("failed setting page description");
            }
        }
        _ => tracing::debug!("page has no description meta tag"),
    }
}

/// Native browser confirmation dialog
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
