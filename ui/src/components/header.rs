//=============================================================================
// File: src/components/header.rs
//=============================================================================
use api::address::ChainAddress;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Input;
use crate::components::pico::Modal;

/// Brand plus either the connected account or a "Get Started" button.
#[component]
pub fn Header() -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut is_connect_open = use_signal(|| false);

    // The connect modal closes itself once an account is known.
    use_effect(move || {
        if app_state_mut.account.read().is_some() {
            is_connect_open.set(false);
        }
    });

    let account = *app_state_mut.account.read();

    rsx! {
        header {
            nav {
                ul {
                    li {
                        strong {
                            class: "brand",
                            "Fair"
                            span { style: "color: var(--pico-primary);", "Pay" }
                        }
                    }
                }
                ul {
                    li {
                        match account {
                            Some(address) => rsx! {
                                code { title: "{address}", "{address.to_abbreviated()}" }
                                " "
                                Button {
                                    button_type: ButtonType::Secondary,
                                    outline: true,
                                    on_click: move |_| {
                                        tracing::info!("disconnected {}", address);
                                        app_state_mut.account.set(None);
                                    },
                                    "Disconnect"
                                }
                            },
                            None => rsx! {
                                Button {
                                    on_click: move |_| is_connect_open.set(true),
                                    "Get Started"
                                }
                            },
                        }
                    }
                }
            }
        }
        if is_connect_open() {
            ConnectModal { on_close: move |_| is_connect_open.set(false) }
        }
    }
}

/// Asks for the client's account address. Nothing is signed.
#[component]
fn ConnectModal(on_close: EventHandler<()>) -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut address_str = use_signal(String::new);
    let mut error = use_signal::<Option<String>>(|| None);

    rsx! {
        Modal {
            title: "Connect Wallet".to_string(),
            on_close,
            p { "Enter the address of the account you will fund jobs from." }
            Input {
                label: "Account Address".to_string(),
                name: "account_address",
                placeholder: "0x...",
                value: address_str(),
                on_input: move |event: FormEvent| {
                    address_str.set(event.value());
                    error.set(None);
                },
            }
            if let Some(err) = error() {
                small { style: "color: var(--pico-color-red-500);", "{err}" }
            }
            footer {
                Button {
                    disabled: address_str.read().is_empty(),
                    on_click: move |_| match address_str.read().parse::<ChainAddress>() {
                        Ok(address) => {
                            tracing::info!("connected {}", address);
                            app_state_mut.account.set(Some(address));
                        }
                        Err(e) => error.set(Some(format!("Invalid address: {e}"))),
                    },
                    "Connect"
                }
            }
        }
    }
}
