//! Dismissible banner for the last failed note operation

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::theme::Theme;

#[component]
pub fn ErrorBanner(message: String, theme: Theme, on_dismiss: EventHandler) -> Element {
    let colors = theme.palette();

    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 8px 16px;
                border-bottom: 1px solid {colors.border};
                background: {colors.error_bg};
                color: {colors.error};
                font-size: 13px;
            ",

            span { style: "flex: 1;", "{message}" }

            Button {
                theme,
                variant: ButtonVariant::Ghost,
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}
