//! Login page: username/email + password, or Google Sign-In.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{Flow, LoginForm, Route};

use crate::components::google_button::GoogleButton;
use crate::pages::{apply_outcome, report_failure};
use crate::state::auth::use_auth;
use crate::state::notice::use_notice;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let notices = use_notice();
    let navigate = use_navigate();

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let accepted_terms = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let google_credential = RwSignal::new(None::<String>);

    // A visitor who is already signed in never sees the form.
    let signed_in_on_arrival = auth.store().is_authenticated();
    let navigate_away = navigate.clone();
    Effect::new(move |_| {
        if signed_in_on_arrival {
            navigate_away(&Route::Dashboard.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let flows = auth.flows.clone();
    let navigate_submit = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = LoginForm {
            identifier: identifier.get_untracked(),
            password: password.get_untracked(),
            accepted_terms: accepted_terms.get_untracked(),
        };
        busy.set(true);
        let flows = flows.clone();
        let navigate = navigate_submit.clone();
        leptos::task::spawn_local(async move {
            match flows.login(&form).await {
                Ok(outcome) => apply_outcome(outcome, notices, &navigate),
                Err(err) => report_failure(Flow::Login, &err, notices),
            }
            busy.set(false);
        });
    };

    let flows = auth.flows.clone();
    Effect::new(move |_| {
        let Some(credential) = google_credential.get() else {
            return;
        };
        google_credential.set(None);
        busy.set(true);
        let flows = flows.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flows.google_login(&credential).await {
                Ok(outcome) => apply_outcome(outcome, notices, &navigate),
                Err(err) => report_failure(Flow::GoogleLogin, &err, notices),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"IT Management"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username or email"
                        autocomplete="username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="login-terms">
                        <input
                            type="checkbox"
                            prop:checked=move || accepted_terms.get()
                            on:change=move |ev| accepted_terms.set(event_target_checked(&ev))
                        />
                        " I accept the terms and conditions"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <a class="login-link" href=Route::ForgotPassword.path()>"Forgot password?"</a>
                <div class="login-divider"></div>
                <GoogleButton on_credential=move |credential: String| google_credential.set(Some(credential))/>
            </div>
        </div>
    }
}
