//=============================================================================
// File: src/screens/jobs.rs
//=============================================================================
use std::time::Duration;

use api::job::JobDescriptor;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::compat;
use crate::components::milestone_dialog::MilestoneDialog;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Input;
use crate::hooks::use_escrow_action::use_escrow_action;
use crate::AppState;

/// Form for opening a new job with a fixed number of milestones.
#[component]
fn CreateJobCard(on_created: EventHandler<JobDescriptor>) -> Element {
    let mut title = use_signal(String::new);
    let mut count_str = use_signal(|| "1".to_string());
    let mut error = use_signal::<Option<String>>(|| None);
    let action = use_escrow_action();

    let pending = action.is_pending();

    rsx! {
        Card {
            h3 { "Create Job" }
            Grid {
                Input {
                    label: "Title".to_string(),
                    name: "job_title",
                    value: title(),
                    on_input: move |event: FormEvent| title.set(event.value()),
                }
                Input {
                    label: "Milestones".to_string(),
                    name: "job_milestone_count",
                    input_type: "number".to_string(),
                    value: count_str(),
                    on_input: move |event: FormEvent| count_str.set(event.value()),
                }
            }
            if let Some(err) = error() {
                small { style: "display: block; color: var(--pico-color-red-500);", "{err}" }
            }
            Button {
                disabled: pending || title.read().trim().is_empty(),
                busy: pending,
                on_click: move |_| {
                    let Ok(count) = count_str.read().trim().parse::<u32>() else {
                        error.set(Some("Milestone count must be a whole number.".to_string()));
                        return;
                    };
                    error.set(None);
                    let job_title = title();
                    spawn(async move {
                        match action.run(api::create_job(job_title, count)).await {
                            Ok(job) => {
                                title.set(String::new());
                                on_created.call(job);
                            }
                            Err(e) => {
                                tracing::warn!("Failed to create job: {}", e);
                                error.set(Some(e.to_string()));
                            }
                        }
                    });
                },
                if pending { "Creating..." } else { "Create Job" }
            }
        }
    }
}

#[component]
pub fn JobsScreen() -> Element {
    let refresh_secs = use_context::<AppState>().prefs.escrow().refresh_secs;

    let jobs_resource = use_resource(move || async move { api::jobs().await });

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let mut res = jobs_resource;
        async move {
            loop {
                compat::sleep(Duration::from_secs(refresh_secs)).await;
                res.restart();
            }
        }
    });

    let mut selected_job = use_signal::<Option<JobDescriptor>>(|| None);
    let mut is_dialog_open = use_signal(|| false);

    let mut open_dialog = move |job: JobDescriptor| {
        selected_job.set(Some(job));
        is_dialog_open.set(true);
    };

    rsx! {
        div {
            CreateJobCard {
                on_created: move |job: JobDescriptor| {
                    let mut res = jobs_resource;
                    res.restart();
                    open_dialog(job);
                }
            }
            Card {
                h3 { "Jobs" }
                match &*jobs_resource.read() {
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { style: "color: var(--pico-muted-color);", "No jobs yet. Create one above." }
                    },
                    Some(Ok(list)) => rsx! {
                        table {
                            role: "grid",
                            thead {
                                tr {
                                    th { "Title" }
                                    th { "Address" }
                                    th { "Milestones" }
                                    th { "Worker" }
                                    th {}
                                }
                            }
                            tbody {
                                {list.iter().map(|summary| {
                                    let job = summary.job;
                                    let milestones = match (summary.milestones_set(), job.milestone_count) {
                                        (true, Some(n)) => format!("{n} set"),
                                        (false, Some(n)) => format!("{n} pending"),
                                        (_, None) => "-".to_string(),
                                    };
                                    let worker = summary
                                        .worker
                                        .map(|w| w.to_abbreviated())
                                        .unwrap_or_else(|| "unassigned".to_string());
                                    rsx! {
                                        tr {
                                            key: "{job.address}",
                                            td { "{summary.title}" }
                                            td { code { title: "{job.address}", "{job.address.to_abbreviated()}" } }
                                            td { "{milestones}" }
                                            td { "{worker}" }
                                            td {
                                                Button {
                                                    button_type: ButtonType::Secondary,
                                                    outline: true,
                                                    on_click: move |_| open_dialog(job),
                                                    "Manage"
                                                }
                                            }
                                        }
                                    }
                                })}
                            }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        div {
                            style: "color: var(--pico-color-red-500);",
                            p { "Error loading jobs:" }
                            pre { "{e}" }
                        }
                    },
                    None => rsx! {
                        div {
                            style: "text-align: center;",
                            p { "Loading jobs..." }
                            progress {}
                        }
                    },
                }
            }
            MilestoneDialog {
                is_open: is_dialog_open(),
                job: selected_job(),
                on_close: move |_| is_dialog_open.set(false),
                on_success: move |_| {
                    tracing::info!("job updated, refreshing list");
                    let mut res = jobs_resource;
                    res.restart();
                },
            }
        }
    }
}
