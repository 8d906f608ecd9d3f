//! Notely Desktop Application
//!
//! Signs in against Supabase and lets the user browse, search, and edit notes.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, WindowBuilder};

fn main() {
    // Supabase settings may come from a local .env file
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "notely=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Notely...");

    let config =
        Config::new().with_window(WindowBuilder::new().with_title("Notely").with_resizable(true));

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
