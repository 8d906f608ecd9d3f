//! Notes list: the card collection or the editor, never both

use dioxus::prelude::*;
use notely_core::view::{ListMode, NoteIntent, NotesListState, NotesSnapshot};

use super::button::{Button, ButtonVariant};
use super::{NoteCard, NoteEditor};
use crate::theme::Theme;

#[component]
pub fn NoteList(
    snapshot: NotesSnapshot,
    theme: Theme,
    loading: bool,
    on_intent: EventHandler<NoteIntent>,
) -> Element {
    let mut list = use_signal(NotesListState::default);
    let colors = theme.palette();

    let mode = list.read().mode().clone();
    if let ListMode::Editing(launch) = mode {
        return rsx! {
            NoteEditor {
                launch,
                theme,
                on_back: move |()| list.write().back(),
                on_save: move |draft| {
                    let intent = list.write().save(draft);
                    if let Some(intent) = intent {
                        on_intent.call(intent);
                    }
                },
            }
        };
    }

    let empty_message = if loading {
        "Loading notes..."
    } else if snapshot.is_filtered() {
        "No notes match your search"
    } else {
        "No notes yet"
    };
    let count_label = if snapshot.is_filtered() {
        format!("{} of {} notes", snapshot.notes.len(), snapshot.total)
    } else {
        format!("{} notes", snapshot.total)
    };

    rsx! {
        div {
            class: "note-list",
            style: "
                display: flex;
                flex-direction: column;
                gap: 12px;
                flex: 1;
                padding: 16px;
                overflow-y: auto;
                background: {colors.bg_tertiary};
            ",

            div {
                style: "display: flex; align-items: center; gap: 8px;",

                Button {
                    theme,
                    variant: ButtonVariant::Primary,
                    disabled: loading,
                    onclick: move |_| list.write().open_new(),
                    "+ New Note"
                }

                span {
                    style: "font-size: 12px; color: {colors.text_muted};",
                    "{count_label}"
                }
            }

            if snapshot.notes.is_empty() {
                div {
                    style: "
                        padding: 20px;
                        text-align: center;
                        color: {colors.text_muted};
                    ",
                    "{empty_message}"
                }
            } else {
                for note in snapshot.notes {
                    {
                        let key = note.id.to_string();
                        let open_note = note.clone();
                        let note_id = note.id.clone();

                        rsx! {
                            NoteCard {
                                key: "{key}",
                                note,
                                theme,
                                on_open: move |()| list.write().open_existing(open_note.clone()),
                                on_delete: move |()| {
                                    let intent = list.read().delete(note_id.clone());
                                    on_intent.call(intent);
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
