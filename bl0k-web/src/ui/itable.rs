use bl0k_client::introspection::{Cell, LinkTarget, Row};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::ui::Route;

#[derive(Clone, PartialEq, Properties)]
pub struct ITableProps {
    pub rows: Vec<Row>,
}

fn link(l: &LinkTarget) -> Html {
    let class = classes!("underline", l.mono.then(|| "font-mono"));
    if l.opens_new_tab() {
        return html! {
            <a href={ l.href.clone() } {class} target="_blank" rel="noopener">{ &l.text }</a>
        };
    }
    match Route::from_url(&l.href) {
        Some(to) => html! {
            <Link<Route> { to } classes={ class }>{ &l.text }</Link<Route>>
        },
        None => html! { <a href={ l.href.clone() } {class}>{ &l.text }</a> },
    }
}

fn cell(c: &Cell) -> Html {
    match c {
        Cell::Code(s) => html! { <span class="font-mono font-bold text-lg">{ s }</span> },
        Cell::Link(l) => link(l),
        Cell::Author { profile, id } => html! {
            <>
                { link(profile) }
                <span class="ml-2 font-mono text-xs">{ id }</span>
            </>
        },
        Cell::Text(s) => html! { { s } },
        Cell::Bold(s) => html! { <b>{ s }</b> },
        Cell::Block(s) => html! { <pre class="whitespace-pre-wrap font-mono text-sm">{ s }</pre> },
        Cell::Tables(tables) => tables
            .iter()
            .map(|rows| html! { <ITable rows={ rows.clone() } /> })
            .collect(),
    }
}

/// Two-column table of titled values
#[function_component(ITable)]
pub fn itable(p: &ITableProps) -> Html {
    html! {
        <table class="itable w-full text-sm">
            { for p.rows.iter().map(|r| html! {
                <tr>
                    <td class="font-bold pr-4 align-top whitespace-nowrap">{ r.title }</td>
                    <td>{ cell(&r.value) }</td>
                </tr>
            }) }
        </table>
    }
}
