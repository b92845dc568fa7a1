//! Change the signed-in user's password.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::Flow;

use crate::pages::{apply_outcome, report_failure};
use crate::state::auth::use_auth;
use crate::state::notice::use_notice;

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let auth = use_auth();
    let notices = use_notice();
    let navigate = use_navigate();
    let current = RwSignal::new(String::new());
    let next = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let flows = auth.flows.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (current_value, next_value) = (current.get_untracked(), next.get_untracked());
        busy.set(true);
        let flows = flows.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flows.change_password(&current_value, &next_value).await {
                Ok(outcome) => {
                    current.set(String::new());
                    next.set(String::new());
                    apply_outcome(outcome, notices, &navigate);
                }
                Err(err) => report_failure(Flow::ChangePassword, &err, notices),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="card change-password">
            <h1>"Change password"</h1>
            <form class="login-form" on:submit=on_submit>
                <label class="field">
                    "Current password"
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || current.get()
                        on:input=move |ev| current.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    "New password"
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || next.get()
                        on:input=move |ev| next.set(event_target_value(&ev))
                    />
                </label>
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Update password"
                </button>
            </form>
        </section>
    }
}
