//=============================================================================
// File: src/components/worker_assignment.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::Button;
use crate::components::pico::Input;

/// Free-text worker address bound to the assign operation.
///
/// The text is passed on verbatim; the escrow parses and validates it.
#[component]
pub fn WorkerAssignment(
    worker_address: String,
    can_submit: bool,
    pending: bool,
    on_change: EventHandler<String>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            Input {
                label: "Worker Address".to_string(),
                name: "worker_address",
                placeholder: "0x...",
                value: worker_address,
                on_input: move |event: FormEvent| on_change.call(event.value()),
            }
            Button {
                disabled: !can_submit,
                busy: pending,
                on_click: move |_| on_submit.call(()),
                if pending { "Assigning..." } else { "Assign Worker" }
            }
        }
    }
}
