//! Home view - the signed-in notes screen

use dioxus::prelude::*;
use notely_core::auth::Session;
use notely_core::config::ClientConfig;
use notely_core::store::SupabaseNoteStore;
use notely_core::view::{NoteIntent, NotesController, NotesSnapshot};
use notely_core::{Error, Result};

use crate::components::{ErrorBanner, Header, NoteList};
use crate::services::{AuthService, SessionClient};
use crate::theme::Theme;

type Controller = NotesController<SupabaseNoteStore<SessionClient>>;

/// Owns the notes controller for the signed-in user.
///
/// Notes are loaded once on mount; every mutation goes through the
/// controller and the rendered snapshot is refreshed afterwards.
#[component]
pub fn Home(
    config: ClientConfig,
    session: Session,
    theme: Theme,
    on_toggle_theme: EventHandler,
    on_sign_out: EventHandler,
) -> Element {
    let controller = use_hook(|| {
        build_controller(&config, &session).map_err(|error| {
            tracing::error!("Failed to create note store: {}", error);
            error.to_string()
        })
    });
    let mut snapshot = use_signal(NotesSnapshot::default);
    let mut loading = use_signal(|| true);
    let mut error_message = use_signal(|| None::<String>);

    let loader = controller.clone();
    use_future(move || {
        let controller = loader.clone();
        async move {
            match controller {
                Ok(controller) => {
                    if let Err(error) = controller.load().await {
                        error_message.set(Some(format!("Could not load notes: {error}")));
                    }
                    snapshot.set(controller.snapshot().await);
                }
                Err(error) => error_message.set(Some(error)),
            }
            loading.set(false);
        }
    });

    let searcher = controller.clone();
    let on_search = move |term: String| {
        let Ok(controller) = searcher.clone() else {
            return;
        };
        spawn(async move {
            controller.search(&term).await;
            snapshot.set(controller.snapshot().await);
        });
    };

    // Clear local notes while this view is still mounted, then sign out.
    let resetter = controller.clone();
    let sign_out = move |()| {
        let Ok(controller) = resetter.clone() else {
            on_sign_out.call(());
            return;
        };
        spawn(async move {
            controller.reset().await;
            on_sign_out.call(());
        });
    };

    let dispatcher = controller;
    let on_intent = move |intent: NoteIntent| {
        let Ok(controller) = dispatcher.clone() else {
            return;
        };
        spawn(async move {
            if let Err(error) = apply_intent(&controller, intent).await {
                error_message.set(Some(describe_failure(&error)));
            }
            snapshot.set(controller.snapshot().await);
        });
    };

    let user_label = session.user.display_name().to_string();
    let colors = theme.palette();

    rsx! {
        div {
            class: "home-container",
            style: "display: flex; flex-direction: column; height: 100vh; background: {colors.bg_primary};",

            Header {
                theme,
                user_label,
                on_search,
                on_toggle_theme,
                on_sign_out: sign_out,
            }

            if let Some(message) = error_message() {
                ErrorBanner {
                    message,
                    theme,
                    on_dismiss: move |()| error_message.set(None),
                }
            }

            NoteList {
                snapshot: snapshot(),
                theme,
                loading: loading(),
                on_intent,
            }
        }
    }
}

fn build_controller(config: &ClientConfig, session: &Session) -> Result<Controller> {
    let auth = AuthService::new(config)?;
    let store = SupabaseNoteStore::new(config, auth.live_session(session.clone()))?;
    Ok(NotesController::new(store, session.owner_id()))
}

fn describe_failure(error: &Error) -> String {
    if error.is_busy() {
        "That change is already being saved. Wait for it to finish, then try again.".to_string()
    } else {
        error.to_string()
    }
}

async fn apply_intent(controller: &Controller, intent: NoteIntent) -> Result<()> {
    match intent {
        NoteIntent::Create(draft) => controller.create(draft).await.map(|_| ()),
        NoteIntent::Edit { id, draft } => controller.edit(id, draft).await,
        NoteIntent::Delete(id) => controller.delete(id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_rejection_is_explained_to_the_user() {
        let message = describe_failure(&Error::Busy("create note".to_string()));
        assert!(message.contains("already being saved"));

        let message = describe_failure(&Error::NotFound("n1".to_string()));
        assert_eq!(message, "Note not found: n1");
    }
}
