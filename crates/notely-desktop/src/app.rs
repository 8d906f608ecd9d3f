//! Main application component

use dioxus::prelude::*;
use notely_core::auth::{AuthState, SignUpOutcome};

use crate::services::Preferences;
use crate::state::{Backend, SignInStatus};
use crate::theme::Theme;
use crate::views::{Credentials, Home, SignIn, StatusScreen};

const CONFIRMATION_NOTICE: &str = "Check your email to confirm your account, then sign in.";

/// Root application component
#[component]
pub fn App() -> Element {
    let backend = use_hook(Backend::from_env);
    let mut auth_state = use_signal(AuthState::default);
    let mut theme = use_signal(|| Preferences::load_or_default().theme);
    let mut sign_in_status = use_signal(SignInStatus::default);

    let auth = match &backend {
        Backend::Ready { auth, .. } => Some(auth.clone()),
        Backend::Unconfigured | Backend::Invalid(_) => None,
    };

    // Restore the persisted session once
    let restorer = auth.clone();
    use_future(move || {
        let auth = restorer.clone();
        async move {
            let Some(auth) = auth else {
                auth_state.set(AuthState::SignedOut);
                return;
            };
            match auth.restore_session().await {
                Ok(session) => auth_state.set(AuthState::from(session)),
                Err(error) => {
                    tracing::error!("Failed to restore session: {}", error);
                    auth_state.set(AuthState::SignedOut);
                }
            }
        }
    });

    let toggle_theme = move |()| {
        let next: Theme = theme().toggled();
        theme.set(next);
        if let Err(error) = (Preferences { theme: next }).save() {
            tracing::warn!("Failed to save theme preference: {}", error);
        }
    };

    let sign_in_auth = auth.clone();
    let sign_in = move |credentials: Credentials| {
        let Some(auth) = sign_in_auth.clone() else {
            return;
        };
        sign_in_status.set(SignInStatus::working());
        spawn(async move {
            match auth.sign_in(&credentials.email, &credentials.password).await {
                Ok(session) => {
                    sign_in_status.set(SignInStatus::default());
                    auth_state.set(AuthState::SignedIn(session));
                }
                Err(error) => {
                    tracing::error!("Sign-in failed: {}", error);
                    sign_in_status.set(SignInStatus::failed(error));
                }
            }
        });
    };

    let sign_up_auth = auth.clone();
    let sign_up = move |credentials: Credentials| {
        let Some(auth) = sign_up_auth.clone() else {
            return;
        };
        sign_in_status.set(SignInStatus::working());
        spawn(async move {
            match auth.sign_up(&credentials.email, &credentials.password).await {
                Ok(SignUpOutcome::SignedIn(session)) => {
                    sign_in_status.set(SignInStatus::default());
                    auth_state.set(AuthState::SignedIn(session));
                }
                Ok(SignUpOutcome::ConfirmationRequired) => {
                    tracing::info!("Sign-up requires email confirmation");
                    sign_in_status.set(SignInStatus::notice(CONFIRMATION_NOTICE));
                }
                Err(error) => {
                    tracing::error!("Sign-up failed: {}", error);
                    sign_in_status.set(SignInStatus::failed(error));
                }
            }
        });
    };

    let sign_out = move |()| {
        let Some(session) = auth_state.read().session().cloned() else {
            return;
        };
        auth_state.set(AuthState::SignedOut);
        let Some(auth) = auth.clone() else {
            return;
        };
        spawn(async move {
            if let Err(error) = auth.sign_out(&session).await {
                tracing::warn!("Sign-out did not reach the server: {}", error);
            }
        });
    };

    let current_theme = theme();
    let colors = current_theme.palette();
    let theme_attr = if current_theme.is_dark() { "dark" } else { "light" };

    let body = match (&backend, auth_state()) {
        (Backend::Unconfigured, _) => rsx! {
            StatusScreen {
                theme: current_theme,
                title: "Notely is not configured",
                detail: "Set SUPABASE_URL and SUPABASE_ANON_KEY (a .env file works) and restart.",
            }
        },
        (Backend::Invalid(reason), _) => rsx! {
            StatusScreen {
                theme: current_theme,
                title: "Invalid configuration",
                detail: reason.clone(),
            }
        },
        (Backend::Ready { .. }, AuthState::Loading) => rsx! {
            StatusScreen { theme: current_theme, title: "Loading..." }
        },
        (Backend::Ready { .. }, AuthState::SignedOut) => rsx! {
            SignIn {
                theme: current_theme,
                status: sign_in_status(),
                on_sign_in: sign_in,
                on_sign_up: sign_up,
            }
        },
        (Backend::Ready { config, .. }, AuthState::SignedIn(session)) => {
            let owner = session.owner_id().to_string();
            rsx! {
                Home {
                    key: "{owner}",
                    config: config.clone(),
                    session,
                    theme: current_theme,
                    on_toggle_theme: toggle_theme,
                    on_sign_out: sign_out,
                }
            }
        }
    };

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            {body}
        }
    }
}

