//! Set a new password from an emailed reset link (`/reset-password/:uid/:token`).

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use session::Flow;

use crate::pages::{apply_outcome, report_failure};
use crate::state::auth::use_auth;
use crate::state::notice::use_notice;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let notices = use_notice();
    let navigate = use_navigate();
    let params = use_params_map();
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let flows = auth.flows.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (uid, token) = params.with_untracked(|p| (p.get("uid").unwrap_or_default(), p.get("token").unwrap_or_default()));
        let new_password = password.get_untracked();
        busy.set(true);
        let flows = flows.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flows.reset_password(&uid, &token, &new_password).await {
                Ok(outcome) => apply_outcome(outcome, notices, &navigate),
                Err(err) => report_failure(Flow::ResetPassword, &err, notices),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="New password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Resetting..." } else { "Reset password" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
