// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
pub mod milestone_dialog;
mod screens;

use app_state::AppState;
use app_state_mut::AppStateMut;
use components::header::Header;
use components::pico::Container;
use screens::jobs::JobsScreen;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    /* --- RESET --- */
    * { box-sizing: border-box; }

    html, body {
        height: 100%;
        width: 100%;
        margin: 0;
        padding: 0;
    }

    /* --- APP FRAME --- */
    .app-main-container {
        padding: 10px;
        display: flex;
        flex-direction: column;
        min-height: 100vh;
        background-color: var(--pico-background-color);
    }

    .app-main-container header {
        flex-shrink: 0;
        padding: 0 1rem;
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    .brand { font-size: 1.5rem; }

    /* --- DIALOG TABS --- */
    dialog nav a.active-tab {
        color: var(--pico-primary) !important;
        border-bottom: 3px solid var(--pico-primary);
        text-decoration: none;
    }

    dialog nav a:not(.active-tab) {
        color: var(--pico-muted-color);
        border-bottom: 3px solid transparent;
    }

    dialog article { max-width: 48rem; width: 100%; }

    /* --- CONTENT AREA --- */
    .app-main-container .content {
        flex: 1;
        padding: 0 1rem;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let prefs_future = use_server_future(move || async move { api::get_user_prefs().await })?;

    let body = match &*prefs_future.read() {
        Some(Ok(prefs)) => {
            dioxus_logger::tracing::info!("prefs: {:#?}", prefs);
            rsx! {
                LoadedApp {
                    app_state: AppState::new(prefs.clone()),
                }
            }
        }
        Some(Err(e)) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
        _ => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    // Provide the stable, non-reactive AppState.
    use_context_provider(|| app_state.clone());

    let account_signal = use_signal(|| None);
    use_context_provider(|| AppStateMut {
        account: account_signal,
    });

    rsx! {
        div {
            class: "app-main-container",
            Container {
                Header {}
                div {
                    class: "content",
                    JobsScreen {}
                }
            }
        }
    }
}
