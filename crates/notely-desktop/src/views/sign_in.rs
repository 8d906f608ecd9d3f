//! Email/password sign-in form shown when there is no session

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::state::SignInStatus;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[component]
pub fn SignIn(
    theme: Theme,
    status: SignInStatus,
    on_sign_in: EventHandler<Credentials>,
    on_sign_up: EventHandler<Credentials>,
) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let colors = theme.palette();
    let credentials = move || Credentials {
        email: email(),
        password: password(),
    };

    let input_style = format!(
        "padding: 8px 12px; border: 1px solid {}; border-radius: 6px; \
         font-size: 14px; background: {}; color: {}; outline: none;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "sign-in",
            style: "
                display: flex;
                align-items: center;
                justify-content: center;
                min-height: 100vh;
                background: {colors.bg_secondary};
            ",

            div {
                style: "
                    display: flex;
                    flex-direction: column;
                    gap: 10px;
                    width: 100%;
                    max-width: 340px;
                    padding: 24px;
                    border: 1px solid {colors.border};
                    border-radius: 12px;
                    background: {colors.bg_primary};
                ",

                h1 {
                    style: "margin: 0 0 8px 0; font-size: 20px; color: {colors.text_primary};",
                    "Sign in to Notely"
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    disabled: status.working,
                    oninput: move |evt| email.set(evt.value()),
                    style: "{input_style}",
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    disabled: status.working,
                    oninput: move |evt| password.set(evt.value()),
                    style: "{input_style}",
                }

                div {
                    style: "display: flex; gap: 8px;",

                    Button {
                        theme,
                        variant: ButtonVariant::Primary,
                        disabled: status.working,
                        onclick: move |_| on_sign_in.call(credentials()),
                        "Sign In"
                    }

                    Button {
                        theme,
                        variant: ButtonVariant::Secondary,
                        disabled: status.working,
                        onclick: move |_| on_sign_up.call(credentials()),
                        "Sign Up"
                    }
                }

                if status.working {
                    div {
                        style: "font-size: 12px; color: {colors.text_secondary};",
                        "Working..."
                    }
                }

                if let Some(notice) = status.notice {
                    div {
                        style: "font-size: 12px; color: {colors.success};",
                        "{notice}"
                    }
                }

                if let Some(error) = status.error {
                    div {
                        role: "alert",
                        style: "font-size: 12px; color: {colors.error};",
                        "{error}"
                    }
                }
            }
        }
    }
}
