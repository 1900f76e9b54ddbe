use std::rc::Rc;

use bl0k_client::{
    api::{Article, CommentId, Error, User},
    comments_view, key_action, CommentRow, CommentsView, KeyAction,
};
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentsProps {
    pub article: Rc<Article>,
    pub viewer: Option<User>,
    pub draft: String,
    pub rows: usize,
    pub error: Option<Error>,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_delete: Callback<CommentId>,
}

fn comment_row(r: &CommentRow, on_delete: &Callback<CommentId>) -> Html {
    let c = r.comment;
    let on_delete = {
        let id = c.id.clone();
        on_delete.reform(move |_| id.clone())
    };
    html! {
        <div class="comment flex mb-4" key={ c.id.0.clone() }>
            <img class="w-8 h-8 rounded-full mr-2" src={ c.author.avatar.clone() } alt="" />
            <div class="grow">
                <div class="text-sm">
                    <a class="font-bold" href={ c.author.profile_url() }>{ &c.author.username }</a>
                    <span class="ml-2 text-gray-500"><ui::DateTime t={ c.created } /></span>
                    if r.can_delete {
                        <button type="button" class="ml-2 text-red-700" title="Smazat" onclick={ on_delete }>
                            { "smazat" }
                        </button>
                    }
                </div>
                <div class="comment-text">{ util::sanitized_html(&c.html) }</div>
            </div>
        </div>
    }
}

#[function_component(Comments)]
pub fn comments(p: &CommentsProps) -> Html {
    let (rows, login_hint, form) = match comments_view(&p.article, p.viewer.as_ref()) {
        CommentsView::Loading => {
            return html! { <div class="comments">{ "Načítám komentáře .." }</div> }
        }
        CommentsView::Nothing => return html! {},
        CommentsView::Thread {
            rows,
            login_hint,
            form,
        } => (rows, login_hint, form),
    };
    let onkeydown = {
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if key_action(&e.key(), e.shift_key()) == KeyAction::Submit {
                e.prevent_default();
                on_submit.emit(());
            }
        })
    };
    let oninput = p
        .on_input
        .reform(|e: InputEvent| e.target_unchecked_into::<web_sys::HtmlTextAreaElement>().value());
    html! {
        <div class="comments mt-8">
            { for rows.iter().map(|r| comment_row(r, &p.on_delete)) }
            if login_hint {
                <div class="text-sm text-gray-500">
                    { "Nové komentáře mohou psát jen přihlášení uživatelé." }
                </div>
            }
            if form {
                <div class="comment-form mt-4">
                    <textarea
                        class="w-full border p-2"
                        rows={ p.rows.to_string() }
                        placeholder="Napište komentář ..."
                        value={ p.draft.clone() }
                        { oninput }
                        { onkeydown }
                    />
                    <button type="button" class="mt-2" onclick={ p.on_submit.reform(|_| ()) }>
                        { "Odeslat" }
                    </button>
                </div>
            }
            if let Some(e) = &p.error {
                <div class="text-red-700">{ format!("Akce se nezdařila: {e}") }</div>
            }
        </div>
    }
}
