//! Full-screen status messages (loading, missing configuration)

use dioxus::prelude::*;

use crate::theme::Theme;

#[component]
pub fn StatusScreen(theme: Theme, title: String, #[props(default)] detail: String) -> Element {
    let colors = theme.palette();

    rsx! {
        div {
            class: "status-screen",
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                gap: 8px;
                min-height: 100vh;
                padding: 20px;
                text-align: center;
                background: {colors.bg_secondary};
            ",

            p {
                style: "margin: 0; font-size: 16px; font-weight: 600; color: {colors.text_primary};",
                "{title}"
            }

            if !detail.is_empty() {
                p {
                    style: "margin: 0; max-width: 420px; font-size: 13px; color: {colors.text_secondary};",
                    "{detail}"
                }
            }
        }
    }
}
