//=============================================================================
// File: src/components/milestone_editor.rs
//=============================================================================
use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::pico::Button;
use crate::components::pico::Grid;
use crate::components::pico::Input;
use crate::components::pico::TextArea;
use crate::milestone_dialog::MilestoneDraft;
use crate::milestone_dialog::MilestoneEdit;

/// The editable fields of one milestone slot.
#[component]
fn MilestoneCard(
    index: usize,
    draft: Rc<MilestoneDraft>,
    amount_unit: String,
    on_edit: EventHandler<(usize, MilestoneEdit)>,
) -> Element {
    rsx! {
        div {
            class: "milestone-card",
            style: "border: 1px solid var(--pico-form-element-border-color); border-radius: var(--pico-border-radius); padding: 1rem; margin-bottom: 1rem;",
            h5 { "Milestone {index + 1}" }
            Grid {
                Input {
                    label: "Title".to_string(),
                    name: "title_{index}",
                    value: draft.title.clone(),
                    on_input: move |event: FormEvent| {
                        on_edit.call((index, MilestoneEdit::Title(event.value())));
                    },
                }
                Input {
                    label: format!("Amount ({amount_unit})"),
                    name: "amount_{index}",
                    value: draft.amount.clone(),
                    on_input: move |event: FormEvent| {
                        on_edit.call((index, MilestoneEdit::Amount(event.value())));
                    },
                }
            }
            TextArea {
                label: "Description".to_string(),
                name: "description_{index}",
                value: draft.description.clone(),
                on_input: move |event: FormEvent| {
                    on_edit.call((index, MilestoneEdit::Description(event.value())));
                },
            }
            Input {
                label: "Deadline".to_string(),
                name: "deadline_{index}",
                input_type: "date".to_string(),
                value: draft.deadline_input_value(),
                on_input: move |event: FormEvent| {
                    // A cleared or half-typed date keeps the previous deadline.
                    if let Some(edit) = MilestoneEdit::deadline_from_input(&event.value()) {
                        on_edit.call((index, edit));
                    }
                },
            }
        }
    }
}

/// One card per milestone draft plus the save button.
#[component]
pub fn MilestoneEditor(
    drafts: Vec<Rc<MilestoneDraft>>,
    amount_unit: String,
    can_submit: bool,
    pending: bool,
    on_edit: EventHandler<(usize, MilestoneEdit)>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            for (i, draft) in drafts.into_iter().enumerate() {
                MilestoneCard {
                    key: "{i}",
                    index: i,
                    draft,
                    amount_unit: amount_unit.clone(),
                    on_edit,
                }
            }
            Button {
                disabled: !can_submit,
                busy: pending,
                on_click: move |_| on_submit.call(()),
                if pending { "Saving..." } else { "Save Milestones" }
            }
        }
    }
}
