//! Note editor component

use dioxus::prelude::*;
use notely_core::view::{EditorBuffer, EditorLaunch};
use notely_core::NoteDraft;

use super::button::{Button, ButtonVariant};
use crate::theme::Theme;

/// Title and content fields with back, clear, and save actions.
///
/// The editor only hands the buffer to `on_save`; whether that creates or
/// updates a note is decided by the owner.
#[component]
pub fn NoteEditor(
    launch: EditorLaunch,
    theme: Theme,
    on_back: EventHandler,
    on_save: EventHandler<NoteDraft>,
) -> Element {
    let mut buffer = use_signal(|| EditorBuffer::seeded(launch.initial_draft()));
    let colors = theme.palette();
    let title = buffer.read().title().to_string();
    let content = buffer.read().content().to_string();
    let heading = match &launch {
        EditorLaunch::Create => "New Note",
        EditorLaunch::Edit(_) => "Edit Note",
    };

    let field_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 12px; \
         border: 1px solid {}; border-radius: 6px; \
         background: {}; color: {}; outline: none;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "note-editor",
            style: "
                display: flex;
                flex-direction: column;
                gap: 12px;
                flex: 1;
                padding: 16px;
            ",

            div {
                style: "display: flex; align-items: center; gap: 8px;",

                Button {
                    theme,
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_back.call(()),
                    "Back"
                }

                span {
                    style: "flex: 1; font-weight: 600; color: {colors.text_primary};",
                    "{heading}"
                }

                Button {
                    theme,
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| buffer.write().clear(),
                    "Clear"
                }

                Button {
                    theme,
                    variant: ButtonVariant::Primary,
                    onclick: move |_| on_save.call(buffer.read().to_draft()),
                    "Save"
                }
            }

            input {
                r#type: "text",
                placeholder: "Title",
                value: "{title}",
                oninput: move |evt| buffer.write().set_title(evt.value()),
                style: "{field_style} font-size: 16px; font-weight: 500;",
            }

            textarea {
                placeholder: "Start writing...",
                value: "{content}",
                oninput: move |evt| buffer.write().set_content(evt.value()),
                style: "{field_style} flex: 1; min-height: 240px; resize: none; font-size: 14px; line-height: 1.6;",
            }
        }
    }
}
