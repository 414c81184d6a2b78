//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to defined common UI elements like buttons, forms, and modals.
pub mod header;
pub mod milestone_dialog;
pub mod milestone_editor;
pub mod pico;
pub mod worker_assignment;
