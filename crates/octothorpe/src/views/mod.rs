// File: src/views/mod.rs
// Purpose: Pure view templates shared across routes

//! View templates
//!
//! Every function here maps state to [`Markup`] and nothing else. No
//! template reads session or catalog state on its own; callers pass in
//! everything a screen needs.

use maud::{html, Markup};

pub mod admin;
pub mod auth;
pub mod events;
pub mod layout;

pub use admin::{event_form, FormMode};
pub use auth::{login, register};
pub use events::{detail, list};
pub use layout::layout;

/// Visual register of a notice paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "error",
        }
    }
}

/// An inline notice shown inside a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

/// Full-screen notice with a way back home
pub fn message(tone: Tone, title: &str, body: &str) -> Markup {
    html! {
        h3 style="margin-top:0;" { (title) }
        p class=(tone.class()) { (body) }
        a href="#/" { "Go Home" }
    }
}

/// Interstitial shown while a route handler runs
pub fn loading() -> Markup {
    html! {
        h3 style="margin-top:0;" { "Loading..." }
        p class="small" { "Please wait." }
    }
}

pub fn home() -> Markup {
    html! {
        h3 style="margin-top:0;" { "Home" }
        p { "Welcome to the Event Management System." }
        p class="small" style="margin:0;" { "SPA with hash routing (no page reload)." }
    }
}

pub fn not_found() -> Markup {
    html! {
        h3 style="margin-top:0;" { "Not Found" }
        p class="error" { "This route does not exist." }
        a href="#/" { "Go Home" }
    }
}
