//! Banner for the app-wide success/error notice.
//!
//! Success notices dismiss themselves after a short delay; errors stay until
//! closed or replaced.

use leptos::prelude::*;
use session::NoticeLevel;

use crate::state::notice::use_notice;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = use_notice();

    Effect::new(move |_| {
        let Some(shown) = notices.current() else {
            return;
        };
        if shown.notice.is_error() {
            return;
        }
        #[cfg(feature = "csr")]
        {
            let id = shown.id;
            gloo_timers::callback::Timeout::new(crate::state::notice::SUCCESS_DISMISS_MS, move || {
                notices.dismiss(id);
            })
            .forget();
        }
    });

    move || {
        notices.current().map(|shown| {
            let class = match shown.notice.level {
                NoticeLevel::Success => "notice notice--success",
                NoticeLevel::Error => "notice notice--error",
            };
            let id = shown.id;
            view! {
                <div class=class role="status">
                    <span class="notice__message">{shown.notice.message}</span>
                    <button class="notice__close" title="Dismiss" on:click=move |_| notices.dismiss(id)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
