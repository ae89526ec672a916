// File: src/handlers.rs
// Purpose: Route handlers and the application route table

use anyhow::{bail, Result};
use maud::PreEscaped;
use std::sync::Arc;

use octothorpe_router::{Role, Route, RouteTable};

use crate::events::{EventId, EventStore};
use crate::session::SessionService;
use crate::views::{self, FormMode};

/// Parses a dynamic `:id` segment into an event id
///
/// Anything that is not a whole number is rejected with the same text
/// the views show for a malformed id.
pub fn event_id_from(raw: &str) -> Result<EventId> {
    match raw.trim().parse::<EventId>() {
        Ok(id) => Ok(id),
        Err(_) => bail!("Invalid event id."),
    }
}

/// Builds the application route table
///
/// Order matters: earlier routes win, and the wildcard fallback catches
/// everything no pattern matched.
pub fn route_table(
    session: Arc<dyn SessionService>,
    events: Arc<dyn EventStore>,
) -> RouteTable {
    let list_session = Arc::clone(&session);
    let list_events = Arc::clone(&events);
    let detail_session = Arc::clone(&session);
    let detail_events = Arc::clone(&events);
    let edit_events = Arc::clone(&events);

    RouteTable::new(Route::fallback(Arc::new(|_ctx| {
        Box::pin(async { Ok(views::not_found()) })
    })))
    .with_route(Route::new(
        "/",
        Arc::new(|_ctx| Box::pin(async { Ok(views::home()) })),
    ))
    .with_route(
        Route::new(
            "/login",
            Arc::new(|_ctx| Box::pin(async { Ok(views::login(None)) })),
        )
        .public_only(),
    )
    .with_route(
        Route::new(
            "/register",
            Arc::new(|_ctx| Box::pin(async { Ok(views::register(None)) })),
        )
        .public_only(),
    )
    .with_route(
        Route::new(
            "/logout",
            Arc::new(|_ctx| {
                Box::pin(async { Ok(PreEscaped("<p>Signing out...</p>".to_string())) })
            }),
        )
        .protected(),
    )
    .with_route(
        Route::new(
            "/events",
            Arc::new(move |_ctx| {
                let session = Arc::clone(&list_session);
                let events = Arc::clone(&list_events);
                Box::pin(async move {
                    let all = events.events().await?;
                    let viewer = session.snapshot().await;
                    Ok(views::list(&all, &viewer))
                })
            }),
        )
        .protected(),
    )
    .with_route(
        Route::new(
            "/events/:id",
            Arc::new(move |ctx| {
                let session = Arc::clone(&detail_session);
                let events = Arc::clone(&detail_events);
                Box::pin(async move {
                    let id = event_id_from(ctx.params.get("id").unwrap_or(""))?;
                    let event = events.event(id).await?;
                    let can_register = session.snapshot().await.can_register();
                    Ok(views::detail(&event, can_register, None))
                })
            }),
        )
        .protected(),
    )
    .with_route(
        Route::new(
            "/admin/events/new",
            Arc::new(|_ctx| Box::pin(async { Ok(views::event_form(FormMode::Create, None, None)) })),
        )
        .protected()
        .require_role(Role::Admin),
    )
    .with_route(
        Route::new(
            "/admin/events/:id/edit",
            Arc::new(move |ctx| {
                let events = Arc::clone(&edit_events);
                Box::pin(async move {
                    let id = event_id_from(ctx.params.get("id").unwrap_or(""))?;
                    let event = events.event(id).await?;
                    Ok(views::event_form(FormMode::Edit, Some(&event), None))
                })
            }),
        )
        .protected()
        .require_role(Role::Admin),
    )
}
