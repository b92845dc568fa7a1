//! Shell for restricted pages: sidebar plus content area.

use leptos::prelude::*;

use crate::components::sidebar::Sidebar;

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Sidebar/>
            <main class="app-layout__content">{children()}</main>
        </div>
    }
}
