//! Request a password reset email.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{Flow, Route};

use crate::pages::{apply_outcome, report_failure};
use crate::state::auth::use_auth;
use crate::state::notice::use_notice;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let notices = use_notice();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let flows = auth.flows.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let address = email.get_untracked();
        let flows = flows.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flows.forgot_password(&address).await {
                Ok(outcome) => {
                    email.set(String::new());
                    apply_outcome(outcome, notices, &navigate);
                }
                Err(err) => report_failure(Flow::ForgotPassword, &err, notices),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Forgot password"</h1>
                <p class="login-card__subtitle">"We'll email you a link to reset it."</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Sending..." } else { "Send reset link" }}
                    </button>
                </form>
                <a class="login-link" href=Route::Login.path()>"Back to login"</a>
            </div>
        </div>
    }
}
