use bl0k_client::MenuEntry;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::ui::Route;

#[derive(Clone, PartialEq, Properties)]
pub struct HeaderProps {
    pub menu: Vec<MenuEntry>,
    pub on_reload: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &HeaderProps) -> Html {
    let navigator = use_navigator();
    let on_title_click = {
        let on_reload = p.on_reload.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(nav) = &navigator {
                nav.push(&Route::Home);
            }
            on_reload.emit(());
        })
    };
    html! {
        <header class="flex items-center p-4">
            <a href="/" class="text-2xl font-bold mr-8" onclick={ on_title_click }>{ "bl0k.cz" }</a>
            <nav class="flex">
                { for p.menu.iter().map(|m| {
                    let route = Route::from_url(&m.href).unwrap_or(Route::Home);
                    html! {
                        <Link<Route>
                            to={ route }
                            classes={ classes!("mr-4", m.active.then(|| "underline")) }
                        >
                            { &m.label }
                        </Link<Route>>
                    }
                }) }
            </nav>
        </header>
    }
}
