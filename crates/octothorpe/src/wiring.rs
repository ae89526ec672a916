// File: src/wiring.rs
// Purpose: Interaction bindings rebuilt on every commit, and what each
//          one does when dispatched

use anyhow::{anyhow, Result};
use std::sync::atomic::Ordering;
use tracing::debug;

use octothorpe_router::{Params, Role, MEMBER_HOME_PATH, SIGN_IN_PATH};

use crate::error::{error_text, UNKNOWN_ERROR};
use crate::events::EventDraft;
use crate::fields;
use crate::forms::FormSnapshot;
use crate::handlers::event_id_from;
use crate::pipeline::commit_page;
use crate::session::{NewUser, SessionView};
use crate::spa::Spa;
use crate::validation;
use crate::views::{self, FormMode, Notice, Tone};

/// One wired interaction on the committed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The hamburger button in the header
    NavToggle,
    /// The sign-in form
    LoginForm,
    /// The account-creation form
    RegisterForm,
    /// The register button on an event detail page
    EventRegister { raw_id: String },
    /// The admin event form
    EventForm { mode: FormMode, raw_id: Option<String> },
    /// The delete button on the admin edit form
    EventDelete { raw_id: String },
}

impl Binding {
    fn submit_target(&self) -> Option<&'static str> {
        match self {
            Binding::LoginForm => Some(fields::LOGIN_FORM),
            Binding::RegisterForm => Some(fields::REGISTER_FORM),
            Binding::EventForm { .. } => Some(fields::EVENT_FORM),
            _ => None,
        }
    }

    fn activate_target(&self) -> Option<&'static str> {
        match self {
            Binding::NavToggle => Some(fields::NAV_TOGGLE),
            Binding::EventRegister { .. } => Some(fields::REGISTER_BTN),
            Binding::EventDelete { .. } => Some(fields::DELETE_BTN),
            _ => None,
        }
    }
}

/// The interactions live on the committed page
///
/// Each commit replaces the whole table, so wiring the same screen
/// twice can never stack handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    /// No interactions at all, as on the loading screen
    pub fn none() -> Self {
        Self::default()
    }

    /// Just the header hamburger
    pub fn header() -> Self {
        Self {
            entries: vec![Binding::NavToggle],
        }
    }

    fn with(mut self, binding: Binding) -> Self {
        self.entries.push(binding);
        self
    }

    /// The binding handling a submit of `form_id`, if wired
    pub fn submit_binding(&self, form_id: &str) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|binding| binding.submit_target() == Some(form_id))
    }

    /// The binding handling an activation of `control_id`, if wired
    pub fn activate_binding(&self, control_id: &str) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|binding| binding.activate_target() == Some(control_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn login_bindings() -> Bindings {
    Bindings::header().with(Binding::LoginForm)
}

fn register_bindings() -> Bindings {
    Bindings::header().with(Binding::RegisterForm)
}

fn detail_bindings(raw_id: &str, session: &SessionView) -> Bindings {
    let bindings = Bindings::header();
    if session.can_register() {
        bindings.with(Binding::EventRegister {
            raw_id: raw_id.to_string(),
        })
    } else {
        bindings
    }
}

fn admin_form_bindings(mode: FormMode, raw_id: Option<&str>) -> Bindings {
    let mut bindings = Bindings::header().with(Binding::EventForm {
        mode,
        raw_id: raw_id.map(str::to_string),
    });
    if mode == FormMode::Edit {
        if let Some(raw_id) = raw_id {
            bindings = bindings.with(Binding::EventDelete {
                raw_id: raw_id.to_string(),
            });
        }
    }
    bindings
}

/// Derives the bindings for a freshly committed route view
///
/// Keyed on the path, so re-rendering a screen derives the identical
/// table. The register button is only wired when the viewer could see
/// it.
pub(crate) fn bindings_for(pathname: &str, params: &Params, session: &SessionView) -> Bindings {
    if pathname == SIGN_IN_PATH {
        return login_bindings();
    }
    if pathname == "/register" {
        return register_bindings();
    }
    if let Some(raw_id) = params.get("id") {
        if pathname.starts_with("/events/") {
            return detail_bindings(raw_id, session);
        }
    }
    if pathname == "/admin/events/new" {
        return admin_form_bindings(FormMode::Create, None);
    }
    if pathname.starts_with("/admin/events/") {
        return admin_form_bindings(FormMode::Edit, params.get("id"));
    }
    Bindings::header()
}

/// Side effects that run once a route view has been committed
///
/// Landing on the sign-out route is itself the action: the session is
/// cleared and the engine moves on to the sign-in page.
pub(crate) async fn after_commit(spa: &Spa, pathname: &str) {
    if pathname == "/logout" {
        spa.session.logout().await;
        spa.navigate(SIGN_IN_PATH).await;
    }
}

pub(crate) async fn dispatch_submit(spa: &Spa, binding: &Binding) {
    debug!(?binding, "submit");
    match binding {
        Binding::LoginForm => login_submit(spa).await,
        Binding::RegisterForm => register_submit(spa).await,
        Binding::EventForm { mode, raw_id } => {
            event_form_submit(spa, *mode, raw_id.as_deref()).await
        }
        _ => {}
    }
}

pub(crate) async fn dispatch_activate(spa: &Spa, binding: &Binding) {
    debug!(?binding, "activate");
    match binding {
        Binding::NavToggle => spa.toggle_nav().await,
        Binding::EventRegister { raw_id } => register_click(spa, raw_id).await,
        Binding::EventDelete { raw_id } => delete_click(spa, raw_id).await,
        _ => {}
    }
}

async fn login_submit(spa: &Spa) {
    let gen = spa.generation.load(Ordering::SeqCst);
    let form = FormSnapshot::capture(spa.host.as_ref(), &[fields::EMAIL, fields::PASSWORD]).await;
    let email = form.trimmed(fields::EMAIL).to_string();
    let password = form.raw(fields::PASSWORD).to_string();

    if !validation::is_email(&email) {
        login_error(spa, gen, "Please enter a valid email.").await;
        return;
    }
    if validation::is_empty(&password) {
        login_error(spa, gen, "Password is required.").await;
        return;
    }

    match spa.session.login_with_email(&email, &password).await {
        Ok(()) => spa.navigate(MEMBER_HOME_PATH).await,
        Err(err) => login_error(spa, gen, &err.to_string()).await,
    }
}

async fn login_error(spa: &Spa, gen: u64, text: &str) {
    let session = spa.session.snapshot().await;
    let body = views::login(Some(text));
    commit_page(spa, gen, &session, &body.into_string(), login_bindings()).await;
}

async fn register_submit(spa: &Spa) {
    let gen = spa.generation.load(Ordering::SeqCst);
    let form = FormSnapshot::capture(
        spa.host.as_ref(),
        &[fields::NAME, fields::EMAIL, fields::PASSWORD, fields::ROLE],
    )
    .await;
    let name = form.trimmed(fields::NAME).to_string();
    let email = form.trimmed(fields::EMAIL).to_string();
    let password = form.raw(fields::PASSWORD).to_string();
    let role_raw = form.raw(fields::ROLE).to_string();

    if validation::is_empty(&name) {
        register_error(spa, gen, "Name is required.").await;
        return;
    }
    if !validation::is_email(&email) {
        register_error(spa, gen, "Please enter a valid email.").await;
        return;
    }
    if !validation::min_length(&password, 8) {
        register_error(spa, gen, "Password must be at least 8 characters.").await;
        return;
    }
    let Some(role) = Role::from_str(&role_raw) else {
        register_error(spa, gen, "Invalid role.").await;
        return;
    };

    let new_user = NewUser {
        name,
        email,
        password,
        role,
    };
    match spa.session.register_user(new_user).await {
        Ok(()) => spa.navigate(SIGN_IN_PATH).await,
        Err(err) => register_error(spa, gen, &err.to_string()).await,
    }
}

async fn register_error(spa: &Spa, gen: u64, text: &str) {
    let session = spa.session.snapshot().await;
    let body = views::register(Some(text));
    commit_page(spa, gen, &session, &body.into_string(), register_bindings()).await;
}

/// The register button on an event detail page
///
/// On success the detail view is re-rendered with a confirmation. On
/// failure the view is re-rendered with the error text; if even the
/// re-fetch fails, the failure screen carries the first error.
async fn register_click(spa: &Spa, raw_id: &str) {
    let gen = spa.generation.load(Ordering::SeqCst);

    let attempted: Result<()> = async {
        let user = spa
            .session
            .user()
            .await
            .ok_or_else(|| anyhow!(UNKNOWN_ERROR))?;
        let event_id = event_id_from(raw_id)?;
        spa.events.register_attendee(event_id, user.id).await?;

        let event = spa.events.event(event_id).await?;
        let session = spa.session.snapshot().await;
        let notice = Notice::success("Registered successfully!");
        let body = views::detail(&event, session.can_register(), Some(&notice));
        commit_page(
            spa,
            gen,
            &session,
            &body.into_string(),
            detail_bindings(raw_id, &session),
        )
        .await;
        Ok(())
    }
    .await;

    if let Err(err) = attempted {
        let recovered: Result<()> = async {
            let event_id = event_id_from(raw_id)?;
            let event = spa.events.event(event_id).await?;
            let session = spa.session.snapshot().await;
            let notice = Notice::error(error_text(&err));
            let body = views::detail(&event, session.can_register(), Some(&notice));
            commit_page(
                spa,
                gen,
                &session,
                &body.into_string(),
                detail_bindings(raw_id, &session),
            )
            .await;
            Ok(())
        }
        .await;

        if recovered.is_err() {
            let session = spa.session.snapshot().await;
            let body = views::message(Tone::Error, "Something went wrong", &error_text(&err));
            commit_page(spa, gen, &session, &body.into_string(), Bindings::header()).await;
        }
    }
}

async fn event_form_submit(spa: &Spa, mode: FormMode, raw_id: Option<&str>) {
    let gen = spa.generation.load(Ordering::SeqCst);
    let form = FormSnapshot::capture(
        spa.host.as_ref(),
        &[
            fields::TITLE,
            fields::DESCRIPTION,
            fields::DATE,
            fields::TIME,
            fields::LOCATION,
            fields::CAPACITY,
        ],
    )
    .await;
    let title = form.trimmed(fields::TITLE).to_string();
    let description = form.trimmed(fields::DESCRIPTION).to_string();
    let date = form.raw(fields::DATE).to_string();
    let time = form.raw(fields::TIME).to_string();
    let location = form.trimmed(fields::LOCATION).to_string();

    if validation::is_empty(&title) {
        admin_form_error(spa, gen, mode, raw_id, "Title is required.").await;
        return;
    }
    if validation::is_empty(&description) {
        admin_form_error(spa, gen, mode, raw_id, "Description is required.").await;
        return;
    }
    if validation::is_empty(&date) {
        admin_form_error(spa, gen, mode, raw_id, "Date is required.").await;
        return;
    }
    if validation::is_empty(&time) {
        admin_form_error(spa, gen, mode, raw_id, "Time is required.").await;
        return;
    }
    if validation::is_empty(&location) {
        admin_form_error(spa, gen, mode, raw_id, "Location is required.").await;
        return;
    }
    let Some(capacity) = parse_capacity(form.raw(fields::CAPACITY)) else {
        admin_form_error(
            spa,
            gen,
            mode,
            raw_id,
            "Capacity must be an integer greater than or equal to 1.",
        )
        .await;
        return;
    };

    let draft = EventDraft {
        title,
        description,
        date,
        time,
        location,
        capacity,
    };

    let saved: Result<()> = match mode {
        FormMode::Create => match spa.session.user().await {
            Some(user) => spa.events.create(draft, user.id).await.map(|_| ()),
            None => Err(anyhow!(UNKNOWN_ERROR)),
        },
        FormMode::Edit => match event_id_from(raw_id.unwrap_or("")) {
            Ok(id) => spa.events.update(id, draft).await.map(|_| ()),
            Err(err) => Err(err),
        },
    };

    match saved {
        Ok(()) => spa.navigate(MEMBER_HOME_PATH).await,
        Err(err) => admin_form_error(spa, gen, mode, raw_id, &error_text(&err)).await,
    }
}

async fn delete_click(spa: &Spa, raw_id: &str) {
    let gen = spa.generation.load(Ordering::SeqCst);

    let deleted = match event_id_from(raw_id) {
        Ok(id) => spa.events.delete(id).await,
        Err(err) => Err(err),
    };

    match deleted {
        Ok(()) => spa.navigate(MEMBER_HOME_PATH).await,
        Err(err) => admin_form_error(spa, gen, FormMode::Edit, Some(raw_id), &error_text(&err)).await,
    }
}

/// Re-commits the admin form with an inline error
///
/// The create form comes back blank. The edit form is rebuilt from the
/// stored event, so unsaved field edits are discarded; a vanished event
/// downgrades to the failure screen instead.
async fn admin_form_error(
    spa: &Spa,
    gen: u64,
    mode: FormMode,
    raw_id: Option<&str>,
    error: &str,
) {
    let session = spa.session.snapshot().await;

    if mode == FormMode::Create {
        let body = views::event_form(FormMode::Create, None, Some(error));
        commit_page(
            spa,
            gen,
            &session,
            &body.into_string(),
            admin_form_bindings(FormMode::Create, None),
        )
        .await;
        return;
    }

    let raw = raw_id.unwrap_or("");
    let event_id = match event_id_from(raw) {
        Ok(id) => id,
        Err(_) => {
            let body = views::message(Tone::Error, "Invalid request", "Invalid event id.");
            commit_page(spa, gen, &session, &body.into_string(), Bindings::header()).await;
            return;
        }
    };

    match spa.events.event(event_id).await {
        Ok(event) => {
            let body = views::event_form(FormMode::Edit, Some(&event), Some(error));
            commit_page(
                spa,
                gen,
                &session,
                &body.into_string(),
                admin_form_bindings(FormMode::Edit, Some(raw)),
            )
            .await;
        }
        Err(err) => {
            let body = views::message(Tone::Error, "Something went wrong", &error_text(&err));
            commit_page(spa, gen, &session, &body.into_string(), Bindings::header()).await;
        }
    }
}

/// Parses the capacity field the way a number input reads
///
/// Fractions round down; anything non-numeric or below 1 is rejected.
fn parse_capacity(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < 1.0 || floored > f64::from(u32::MAX) {
        return None;
    }
    Some(floored as u32)
}
