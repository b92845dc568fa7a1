//! Landing pages after login: the general dashboard and the admin variant.
//!
//! Both render the same overview; the admin variant only changes the title.
//! Figures are placeholders until the backend exposes reporting endpoints.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::state::auth::use_auth;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

impl Stat {
    /// Whether the change figure is a decrease.
    pub fn is_negative(&self) -> bool {
        self.change.starts_with('-')
    }
}

pub fn sample_stats() -> Vec<Stat> {
    vec![
        Stat { title: "Total Users", value: "2,543", change: "+12%" },
        Stat { title: "Revenue", value: "$45,231", change: "+8%" },
        Stat { title: "Projects", value: "127", change: "+23%" },
        Stat { title: "Tasks", value: "1,429", change: "-2%" },
    ]
}

pub fn recent_activity() -> Vec<(&'static str, &'static str)> {
    vec![
        ("User John Doe registered", "2 minutes ago"),
        ("Project Alpha completed", "1 hour ago"),
        ("New task assigned to team", "3 hours ago"),
        ("Monthly report generated", "1 day ago"),
        ("System backup completed", "2 days ago"),
    ]
}

pub fn dashboard_title(admin: bool) -> &'static str {
    if admin { "Admin Dashboard" } else { "Dashboard" }
}

#[component]
pub fn DashboardPage(admin: bool) -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.session
            .with(|s| s.user.as_ref().map(session::UserProfile::display_name))
            .map_or_else(|| "Welcome back".to_owned(), |name| format!("Welcome back, {name}"))
    };

    view! {
        <section class="dashboard">
            <header class="dashboard__header">
                <h1>{dashboard_title(admin)}</h1>
                <p class="dashboard__greeting">{greeting}</p>
            </header>
            <div class="dashboard__stats">
                {sample_stats()
                    .into_iter()
                    .map(|stat| {
                        let change_class = if stat.is_negative() { "stat__change stat__change--down" } else { "stat__change stat__change--up" };
                        view! {
                            <div class="card stat">
                                <span class="stat__title">{stat.title}</span>
                                <span class="stat__value">{stat.value}</span>
                                <span class=change_class>{stat.change}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="card dashboard__activity">
                <h2>"Recent activity"</h2>
                <ul>
                    {recent_activity()
                        .into_iter()
                        .map(|(action, time)| view! {
                            <li>
                                <span>{action}</span>
                                <span class="dashboard__time">{time}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </section>
    }
}
