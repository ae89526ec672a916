//! # Octothorpe Router
//!
//! Fragment routing for the octothorpe SPA engine: declarative path
//! patterns with named captures, an ordered route table with a mandatory
//! wildcard fallback, and access guards evaluated in a fixed order.
//!
//! ## Features
//!
//! - **Static routes** - `/events`, `/login`
//! - **Named captures** - `/events/:id` extracts `id`
//! - **Ordered resolution** - first declared structural match wins
//! - **Wildcard fallback** - the not-found route, matched when nothing else is
//! - **Access guards** - protected / public-only / role-gated routes with
//!   redirect-or-deny outcomes
//! - **Ordered params** - extracted parameters keep their pattern order
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use maud::html;
//! use octothorpe_router::{GuardOutcome, HandlerFn, Role, Route, RouteTable, Viewer};
//!
//! let home: HandlerFn = Arc::new(|_ctx| Box::pin(async { Ok(html! { p { "Home" } }) }));
//! let detail: HandlerFn = Arc::new(|ctx| {
//!     Box::pin(async move {
//!         let id = ctx.params.get("id").unwrap_or("?").to_string();
//!         Ok(html! { p { "Event " (id) } })
//!     })
//! });
//! let missing: HandlerFn = Arc::new(|_ctx| Box::pin(async { Ok(html! { p { "Not Found" } }) }));
//!
//! let table = RouteTable::new(Route::fallback(missing))
//!     .with_route(Route::new("/", home))
//!     .with_route(Route::new("/events/:id", detail).protected());
//!
//! let resolved = table.resolve("/events/42");
//! assert_eq!(resolved.route.pattern(), "/events/:id");
//! assert_eq!(resolved.params.get("id"), Some("42"));
//!
//! // Guards decide before any handler runs
//! let viewer = Viewer { authenticated: true, role: Some(Role::Visitor) };
//! assert_eq!(resolved.route.access().evaluate(&viewer), GuardOutcome::Allow);
//! ```
//!
//! ## Pattern Grammar
//!
//! | Pattern | Matches | Captures |
//! |---------|---------|----------|
//! | `/events` | `/events` only | none |
//! | `/events/:id` | `/events/42` | `id = "42"` |
//! | `/admin/events/:id/edit` | `/admin/events/7/edit` | `id = "7"` |
//! | `*` (fallback) | anything unmatched | none |
//!
//! Matching is anchored and trailing slashes are significant: `/events`
//! and `/events/` are distinct patterns by explicit policy.

pub mod guard;
pub mod pattern;
pub mod table;

pub use guard::{Access, GuardOutcome, Role, Viewer, MEMBER_HOME_PATH, SIGN_IN_PATH};
pub use pattern::{classify_segment, Params, PathPattern, Segment, WILDCARD};
pub use table::{HandlerFn, HandlerFuture, Resolved, Route, RouteContext, RouteTable};
