//! Header with search, theme toggle, and sign-out

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};
use crate::theme::Theme;

/// Top bar. Every keystroke in the search box is forwarded to `on_search`.
#[component]
pub fn Header(
    theme: Theme,
    user_label: String,
    on_search: EventHandler<String>,
    on_toggle_theme: EventHandler,
    on_sign_out: EventHandler,
) -> Element {
    let mut query = use_signal(String::new);
    let colors = theme.palette();
    let toggle_label = theme.toggle_label();

    rsx! {
        header {
            class: "header",
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_secondary};
            ",

            h1 {
                style: "margin: 0; font-size: 18px; font-weight: 600; color: {colors.text_primary};",
                "Notely"
            }

            input {
                r#type: "search",
                placeholder: "Search notes...",
                value: "{query}",
                oninput: move |evt| {
                    forward_keystroke(&mut query.write(), evt.value(), |value| on_search.call(value));
                },
                style: "
                    flex: 1;
                    padding: 8px 12px;
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    font-size: 14px;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }

            span {
                style: "font-size: 12px; color: {colors.text_muted};",
                "{user_label}"
            }

            Button {
                theme,
                variant: ButtonVariant::Ghost,
                onclick: move |_| on_toggle_theme.call(()),
                "{toggle_label}"
            }

            Button {
                theme,
                variant: ButtonVariant::Secondary,
                onclick: move |_| on_sign_out.call(()),
                "Sign Out"
            }
        }
    }
}

/// Mirror the box's text locally and forward it unchanged, with no debounce.
fn forward_keystroke(query: &mut String, value: String, on_search: impl FnOnce(String)) {
    query.clone_from(&value);
    on_search(value);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_keystroke_is_forwarded() {
        let mut query = String::new();
        let mut forwarded = Vec::new();

        for value in ["m", "mi", "mil", "mi", ""] {
            forward_keystroke(&mut query, value.to_string(), |term| forwarded.push(term));
        }

        assert_eq!(forwarded, vec!["m", "mi", "mil", "mi", ""]);
        assert_eq!(query, "");
    }
}
