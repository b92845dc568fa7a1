//! Projects overview with search and status filter.
//!
//! SYSTEM CONTEXT
//! ==============
//! Placeholder data until a projects endpoint is wired through the gateway.
//! Filtering is pure so it can be tested without a browser.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Completed,
    Pending,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

/// Status filter selected in the toolbar. `None` means all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusFilter(pub Option<ProjectStatus>);

impl StatusFilter {
    pub const OPTIONS: [&'static str; 4] = ["all", "active", "completed", "pending"];

    /// Parse a `<select>` value; anything unrecognized shows all.
    pub fn parse(value: &str) -> Self {
        Self(match value {
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "pending" => Some(ProjectStatus::Pending),
            _ => None,
        })
    }

    pub fn matches(self, status: ProjectStatus) -> bool {
        self.0.is_none_or(|wanted| wanted == status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub status: ProjectStatus,
    pub progress: u8,
    pub due_date: &'static str,
    pub team: Vec<&'static str>,
}

pub fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "E-commerce Platform",
            description: "Building a modern e-commerce platform with React and Node.js",
            status: ProjectStatus::Active,
            progress: 75,
            due_date: "2024-03-15",
            team: vec!["John Doe", "Jane Smith", "Mike Johnson"],
        },
        Project {
            id: 2,
            name: "Mobile App Redesign",
            description: "Redesigning the mobile app with new UI/UX standards",
            status: ProjectStatus::Completed,
            progress: 100,
            due_date: "2024-02-28",
            team: vec!["Sarah Wilson", "Tom Brown"],
        },
        Project {
            id: 3,
            name: "Dashboard Analytics",
            description: "Implementing advanced analytics dashboard with real-time data",
            status: ProjectStatus::Active,
            progress: 45,
            due_date: "2024-04-10",
            team: vec!["Alex Chen", "Emma Davis", "Ryan Lee"],
        },
        Project {
            id: 4,
            name: "API Integration",
            description: "Integrating third-party APIs for enhanced functionality",
            status: ProjectStatus::Pending,
            progress: 20,
            due_date: "2024-03-30",
            team: vec!["Chris Taylor", "Lisa Wang"],
        },
    ]
}

/// Projects whose name or description contains `search` (case-insensitive)
/// and whose status passes `filter`.
pub fn filter_projects(projects: &[Project], search: &str, filter: StatusFilter) -> Vec<Project> {
    let needle = search.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| filter.matches(p.status))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = sample_projects();
    let search = RwSignal::new(String::new());
    let filter = RwSignal::new(StatusFilter::default());

    let visible = move || search.with(|term| filter_projects(&projects, term, filter.get()));

    view! {
        <section class="projects">
            <header class="projects__header">
                <h1>"Projects"</h1>
                <input
                    class="projects__search"
                    type="search"
                    placeholder="Search projects..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select class="projects__filter" on:change=move |ev| filter.set(StatusFilter::parse(&event_target_value(&ev)))>
                    {StatusFilter::OPTIONS
                        .into_iter()
                        .map(|option| view! { <option value=option>{option}</option> })
                        .collect_view()}
                </select>
            </header>
            <div class="projects__grid">
                {move || {
                    let rows = visible();
                    if rows.is_empty() {
                        return view! { <p class="projects__empty">"No projects match."</p> }.into_any();
                    }
                    rows.into_iter()
                        .map(|project| {
                            let status = project.status.as_str();
                            view! {
                                <article class="card project">
                                    <h2>{project.name}</h2>
                                    <span class=format!("project__status project__status--{status}")>{status}</span>
                                    <p>{project.description}</p>
                                    <progress max="100" value=project.progress.to_string()></progress>
                                    <footer class="project__meta">
                                        <span>"Due " {project.due_date}</span>
                                        <span>{project.team.join(", ")}</span>
                                    </footer>
                                </article>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </section>
    }
}
