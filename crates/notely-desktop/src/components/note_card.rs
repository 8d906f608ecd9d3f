//! Note card component

use chrono::Utc;
use dioxus::prelude::*;
use notely_core::util::format_time_since;
use notely_core::Note;

use super::button::{Button, ButtonVariant};
use crate::theme::Theme;

const PREVIEW_CHARS: usize = 140;

/// A single note in the collection view. Clicking the card opens it.
#[component]
pub fn NoteCard(
    note: Note,
    theme: Theme,
    on_open: EventHandler,
    on_delete: EventHandler,
) -> Element {
    let colors = theme.palette();
    let title = note.display_title().to_string();
    let edited = format_time_since(note.last_modified, Utc::now());
    let preview = note.content_preview(PREVIEW_CHARS);

    rsx! {
        div {
            class: "note-card",
            style: "
                display: flex;
                flex-direction: column;
                gap: 6px;
                padding: 12px 16px;
                border: 1px solid {colors.border_light};
                border-radius: 8px;
                cursor: pointer;
                background: {colors.bg_primary};
            ",
            onclick: move |_| on_open.call(()),

            div {
                style: "display: flex; align-items: center; gap: 8px;",

                div {
                    class: "note-title",
                    style: "
                        flex: 1;
                        font-weight: 500;
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                        color: {colors.text_primary};
                    ",
                    "{title}"
                }

                Button {
                    theme,
                    variant: ButtonVariant::Danger,
                    title: "Delete note",
                    onclick: move |evt: MouseEvent| {
                        delete_clicked(|| evt.stop_propagation(), || on_delete.call(()));
                    },
                    "Delete"
                }
            }

            div {
                style: "font-size: 11px; color: {colors.text_muted};",
                "Edited {edited}"
            }

            if !preview.is_empty() {
                div {
                    class: "note-preview",
                    style: "
                        font-size: 12px;
                        color: {colors.text_secondary};
                        overflow: hidden;
                        text-overflow: ellipsis;
                        white-space: nowrap;
                    ",
                    "{preview}"
                }
            }
        }
    }
}

/// The delete button's click is consumed so it never reaches the card's
/// open handler.
fn delete_clicked(stop_propagation: impl FnOnce(), on_delete: impl FnOnce()) {
    stop_propagation();
    on_delete();
}
