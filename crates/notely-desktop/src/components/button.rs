//! Themed button

use dioxus::prelude::*;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Danger,
}

impl ButtonVariant {
    fn style(self, theme: Theme) -> String {
        let colors = theme.palette();
        let (background, color, border) = match self {
            Self::Primary => (colors.accent, colors.accent_text, colors.accent),
            Self::Secondary => (colors.bg_secondary, colors.text_primary, colors.border),
            Self::Ghost => ("transparent", colors.text_secondary, "transparent"),
            Self::Danger => ("transparent", colors.error, colors.border_light),
        };
        format!(
            "padding: 6px 12px; border-radius: 6px; font-size: 13px; cursor: pointer; \
             background: {background}; color: {color}; border: 1px solid {border};"
        )
    }
}

#[component]
pub fn Button(
    theme: Theme,
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] title: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let mut style = variant.style(theme);
    if disabled {
        style.push_str(" opacity: 0.5; cursor: default;");
    }

    rsx! {
        button {
            r#type: "button",
            style: "{style}",
            title: "{title}",
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}
