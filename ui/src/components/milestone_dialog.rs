//=============================================================================
// File: src/components/milestone_dialog.rs
//=============================================================================
use api::job::JobDescriptor;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::app_state::AppState;
use crate::compat;
use crate::components::milestone_editor::MilestoneEditor;
use crate::components::pico::Modal;
use crate::components::worker_assignment::WorkerAssignment;
use crate::hooks::use_escrow_action::use_escrow_action;
use crate::hooks::use_escrow_action::EscrowAction;
use crate::milestone_dialog::default_deadline;
use crate::milestone_dialog::DialogState;
use crate::milestone_dialog::DialogTab;
use crate::milestone_dialog::MilestoneEdit;
use crate::milestone_dialog::SubmitKind;
use crate::milestone_dialog::Submission;
use crate::milestone_dialog::ALL_TABS;

/// The "Manage Job" dialog: milestone editor and worker assignment.
///
/// Renders nothing unless `is_open` and `job` are both set. `on_success`
/// fires once per successful submission, always before `on_close`.
#[component]
pub fn MilestoneDialog(
    is_open: bool,
    job: Option<JobDescriptor>,
    on_close: EventHandler<()>,
    on_success: EventHandler<()>,
) -> Element {
    let deadline_days = use_context::<AppState>().prefs.escrow().deadline_days;
    let amount_unit = use_context::<AppState>().prefs.escrow().amount_unit.clone();

    let mut dialog = use_signal(DialogState::default);
    let milestones_action = use_escrow_action();
    let worker_action = use_escrow_action();

    // Explicit reset transition whenever the inputs change.
    use_effect(use_reactive!(|(is_open, job)| {
        let first_deadline = default_deadline(compat::today(), deadline_days);
        dialog.with_mut(|d| d.sync(is_open, job, first_deadline));
    }));

    let mut submit = move |kind: SubmitKind, action: EscrowAction| {
        let pending = action.is_pending();
        let Some(submission) = dialog.with_mut(|d| {
            d.open_mut()
                .filter(|o| o.can_submit(kind, pending))
                .map(|o| o.begin_submission(kind))
        }) else {
            return;
        };

        let target = submission.job();
        spawn(async move {
            let result = match submission {
                Submission::Milestones { job, batch } => {
                    action.run(api::set_milestones(job, batch)).await
                }
                Submission::AssignWorker { job, worker } => {
                    action.run(api::assign_worker(job, worker)).await
                }
            };

            let result = result.map_err(|e| {
                tracing::error!("{}: {}", kind.failure_prefix(), e);
                e.to_string()
            });

            dialog
                .with_mut(|d| d.finish_submission(target, kind, result))
                .notify(|| on_success.call(()), || on_close.call(()));
        });
    };

    let state = dialog.read();
    let Some(open) = state.open() else {
        return rsx! {};
    };

    let tab = open.tab();
    let error = open.last_error().cloned();
    let milestones_pending = milestones_action.is_pending();
    let worker_pending = worker_action.is_pending();

    rsx! {
        Modal {
            title: "Manage Job".to_string(),
            on_close: move |_| {
                dialog.with_mut(|d| d.close());
                on_close.call(());
            },

            small { code { "{open.job().address}" } }

            nav {
                ul {
                    for t in ALL_TABS {
                        li {
                            a {
                                href: "#",
                                class: if t == tab { "active-tab" } else { "" },
                                "aria-current": if t == tab { "page" } else { "false" },
                                onclick: move |event| {
                                    event.prevent_default();
                                    if let Some(d) = dialog.write().open_mut() {
                                        d.select_tab(t);
                                    }
                                },
                                "{t.label()}"
                            }
                        }
                    }
                }
            }

            match tab {
                DialogTab::Milestones => rsx! {
                    MilestoneEditor {
                        drafts: open.drafts().to_vec(),
                        amount_unit: amount_unit.clone(),
                        can_submit: open.can_submit_milestones(milestones_pending),
                        pending: milestones_pending,
                        on_edit: move |(index, edit): (usize, MilestoneEdit)| {
                            if let Some(d) = dialog.write().open_mut() {
                                d.edit_milestone(index, edit);
                            }
                        },
                        on_submit: move |_| submit(SubmitKind::Milestones, milestones_action),
                    }
                },
                DialogTab::AssignWorker => rsx! {
                    WorkerAssignment {
                        worker_address: open.worker_address().to_string(),
                        can_submit: open.can_assign_worker(worker_pending),
                        pending: worker_pending,
                        on_change: move |text: String| {
                            if let Some(d) = dialog.write().open_mut() {
                                d.set_worker_address(text);
                            }
                        },
                        on_submit: move |_| submit(SubmitKind::AssignWorker, worker_action),
                    }
                },
            }

            if let Some(err) = error {
                small {
                    style: "display: block; margin-top: 1rem; color: var(--pico-color-red-500);",
                    "{err.kind.failure_prefix()}: {err.message}"
                }
            }
        }
    }
}
