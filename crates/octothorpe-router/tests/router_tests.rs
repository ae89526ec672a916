//! Integration tests for octothorpe-router
//!
//! Tests are organized by feature area and cover:
//! - Pattern grammar (literal, named capture, anchoring, trailing slash)
//! - Route table resolution (declaration order, first match wins)
//! - Wildcard fallback
//! - Access guard evaluation against resolved routes
//! - Handler invocation through a resolved route

use std::sync::Arc;

use maud::html;
use pretty_assertions::assert_eq;

use octothorpe_router::{
    GuardOutcome, HandlerFn, Params, Role, Route, RouteContext, RouteTable, Viewer,
    MEMBER_HOME_PATH, SIGN_IN_PATH,
};

/// Handler stub that renders its label, so tests can tell routes apart.
fn page(label: &'static str) -> HandlerFn {
    Arc::new(move |_ctx| Box::pin(async move { Ok(html! { p { (label) } }) }))
}

/// The application's literal route table shape, with stub handlers.
fn app_table() -> RouteTable {
    RouteTable::new(Route::fallback(page("not-found")))
        .with_route(Route::new("/", page("home")))
        .with_route(Route::new("/login", page("login")).public_only())
        .with_route(Route::new("/register", page("register")).public_only())
        .with_route(Route::new("/logout", page("logout")).protected())
        .with_route(Route::new("/events", page("events")).protected())
        .with_route(Route::new("/events/:id", page("event-detail")).protected())
        .with_route(
            Route::new("/admin/events/new", page("event-create"))
                .protected()
                .require_role(Role::Admin),
        )
        .with_route(
            Route::new("/admin/events/:id/edit", page("event-edit"))
                .protected()
                .require_role(Role::Admin),
        )
}

#[test]
fn test_resolve_static_routes() {
    let table = app_table();

    assert_eq!(table.resolve("/").route.pattern(), "/");
    assert_eq!(table.resolve("/login").route.pattern(), "/login");
    assert_eq!(table.resolve("/events").route.pattern(), "/events");
}

#[test]
fn test_resolve_dynamic_route_extracts_params() {
    let table = app_table();

    let resolved = table.resolve("/events/42");
    assert_eq!(resolved.route.pattern(), "/events/:id");
    assert_eq!(resolved.params.get("id"), Some("42"));

    let resolved = table.resolve("/admin/events/7/edit");
    assert_eq!(resolved.route.pattern(), "/admin/events/:id/edit");
    assert_eq!(resolved.params.get("id"), Some("7"));
}

#[test]
fn test_first_declared_match_wins() {
    let table = RouteTable::new(Route::fallback(page("not-found")))
        .with_route(Route::new("/events/:id", page("first")))
        .with_route(Route::new("/events/:other", page("second")));

    let resolved = table.resolve("/events/3");
    assert_eq!(resolved.params.names(), vec!["id"]);
}

#[test]
fn test_unmatched_path_falls_back_with_empty_params() {
    let table = app_table();

    let resolved = table.resolve("/nonexistent");
    assert!(resolved.route.is_fallback());
    assert_eq!(resolved.route.pattern(), "*");
    assert!(resolved.params.is_empty());
}

#[test]
fn test_fallback_carries_no_access_requirements() {
    let table = app_table();

    let resolved = table.resolve("/no/such/route");
    let access = resolved.route.access();
    assert!(!access.requires_auth);
    assert!(!access.public_only);
    assert_eq!(access.required_role, None);
    assert_eq!(access.evaluate(&Viewer::default()), GuardOutcome::Allow);
}

#[test]
fn test_trailing_slash_resolves_to_fallback() {
    let table = app_table();

    assert!(table.resolve("/events/").route.is_fallback());
    assert!(table.resolve("/login/").route.is_fallback());
}

#[test]
fn test_protected_route_redirects_anonymous_viewer() {
    let table = app_table();
    let anonymous = Viewer::default();

    let resolved = table.resolve("/events");
    assert_eq!(
        resolved.route.access().evaluate(&anonymous),
        GuardOutcome::Redirect(SIGN_IN_PATH)
    );
}

#[test]
fn test_public_only_route_redirects_signed_in_viewer() {
    let table = app_table();
    let visitor = Viewer {
        authenticated: true,
        role: Some(Role::Visitor),
    };

    let resolved = table.resolve("/login");
    assert_eq!(
        resolved.route.access().evaluate(&visitor),
        GuardOutcome::Redirect(MEMBER_HOME_PATH)
    );
}

#[test]
fn test_role_gated_route_denies_visitor_allows_admin() {
    let table = app_table();
    let visitor = Viewer {
        authenticated: true,
        role: Some(Role::Visitor),
    };
    let admin = Viewer {
        authenticated: true,
        role: Some(Role::Admin),
    };

    let resolved = table.resolve("/admin/events/new");
    assert_eq!(resolved.route.access().evaluate(&visitor), GuardOutcome::Deny);
    assert_eq!(resolved.route.access().evaluate(&admin), GuardOutcome::Allow);
}

#[test]
fn test_anonymous_viewer_on_role_gated_route_is_redirected_not_denied() {
    let table = app_table();

    let resolved = table.resolve("/admin/events/9/edit");
    assert_eq!(
        resolved.route.access().evaluate(&Viewer::default()),
        GuardOutcome::Redirect(SIGN_IN_PATH)
    );
}

#[tokio::test]
async fn test_resolved_route_invokes_its_handler() {
    let table = app_table();

    let resolved = table.resolve("/events/42");
    let ctx = RouteContext::new("/events/42", resolved.params.clone());
    let markup = resolved.route.invoke(ctx).await.unwrap();

    assert_eq!(markup.into_string(), "<p>event-detail</p>");
}

#[tokio::test]
async fn test_handler_context_carries_pathname_and_params() {
    let echo: HandlerFn = Arc::new(|ctx| {
        Box::pin(async move {
            let id = ctx.params.get("id").unwrap_or("-").to_string();
            Ok(html! { span { (ctx.pathname) ":" (id) } })
        })
    });
    let table =
        RouteTable::new(Route::fallback(page("not-found"))).with_route(Route::new("/events/:id", echo));

    let resolved = table.resolve("/events/9");
    let markup = resolved
        .route
        .invoke(RouteContext::new("/events/9", resolved.params.clone()))
        .await
        .unwrap();

    assert_eq!(markup.into_string(), "<span>/events/9:9</span>");
}

#[test]
fn test_params_type_reports_declared_names_only() {
    let table = app_table();

    let resolved = table.resolve("/admin/events/12/edit");
    assert_eq!(resolved.params.len(), 1);
    assert_eq!(resolved.params.names(), vec!["id"]);
    assert_eq!(resolved.params.get("id"), Some("12"));
    assert_eq!(resolved.params.get("slug"), None);

    let empty = Params::new();
    assert!(empty.is_empty());
}
