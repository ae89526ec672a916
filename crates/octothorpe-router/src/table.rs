/// Ordered route table with a mandatory wildcard fallback
///
/// Routes are declared once at startup and never change; declaration order
/// is significant because resolution returns the first structural match.
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use maud::Markup;

use crate::guard::{Access, Role};
use crate::pattern::{Params, PathPattern, WILDCARD};

/// Boxed future returned by a route handler
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Markup>> + Send>>;

/// Async route handler: resolved navigation context in, content markup out
///
/// Errors raised here (domain errors included) are caught at the render
/// pipeline boundary and shown as the generic failure view.
pub type HandlerFn = Arc<dyn Fn(RouteContext) -> HandlerFuture + Send + Sync>;

/// What a handler gets to work with: the concrete path and its captures
#[derive(Debug, Clone)]
pub struct RouteContext {
    pub pathname: String,
    pub params: Params,
}

impl RouteContext {
    pub fn new(pathname: impl Into<String>, params: Params) -> Self {
        Self {
            pathname: pathname.into(),
            params,
        }
    }
}

/// A route descriptor: pattern, async handler and access requirements
///
/// Built with the `with_*` style used across the workspace:
///
/// ```
/// use std::sync::Arc;
/// use maud::html;
/// use octothorpe_router::{HandlerFn, Role, Route};
///
/// let handler: HandlerFn = Arc::new(|_ctx| Box::pin(async { Ok(html! { p { "form" } }) }));
/// let route = Route::new("/admin/events/new", handler)
///     .protected()
///     .require_role(Role::Admin);
///
/// assert_eq!(route.pattern(), "/admin/events/new");
/// assert!(route.access().requires_auth);
/// ```
#[derive(Clone)]
pub struct Route {
    pattern: Option<PathPattern>,
    handler: HandlerFn,
    access: Access,
}

impl Route {
    /// Declares an open route for the given pattern
    pub fn new(pattern: &str, handler: HandlerFn) -> Self {
        Self {
            pattern: Some(PathPattern::parse(pattern)),
            handler,
            access: Access::default(),
        }
    }

    /// Declares the wildcard fallback route
    ///
    /// The fallback carries no access requirements and never takes part in
    /// structural matching; it is authoritative only when nothing else
    /// matched.
    pub fn fallback(handler: HandlerFn) -> Self {
        Self {
            pattern: None,
            handler,
            access: Access::default(),
        }
    }

    /// Requires an authenticated session
    pub fn protected(mut self) -> Self {
        self.access.requires_auth = true;
        self
    }

    /// Reachable only without an authenticated session
    pub fn public_only(mut self) -> Self {
        self.access.public_only = true;
        self
    }

    /// Additionally requires the given role
    pub fn require_role(mut self, role: Role) -> Self {
        self.access.required_role = Some(role);
        self
    }

    /// The declared pattern string; `"*"` for the fallback
    pub fn pattern(&self) -> &str {
        self.pattern
            .as_ref()
            .map(PathPattern::raw)
            .unwrap_or(WILDCARD)
    }

    /// True for the wildcard fallback
    pub fn is_fallback(&self) -> bool {
        self.pattern.is_none()
    }

    /// Access requirements evaluated by the guard step
    pub fn access(&self) -> &Access {
        &self.access
    }

    /// Structural match against a concrete path
    ///
    /// The fallback returns `None` here by construction.
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.pattern.as_ref()?.matches(path)
    }

    /// Invokes the handler for an already-resolved navigation
    pub async fn invoke(&self, ctx: RouteContext) -> Result<Markup> {
        (self.handler)(ctx).await
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern())
            .field("access", &self.access)
            .finish()
    }
}

/// A resolved navigation: the winning route and its extracted parameters
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub route: &'a Route,
    pub params: Params,
}

/// The route table: declared routes in order, plus the fallback
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Route,
}

impl RouteTable {
    /// Creates a table with its wildcard fallback
    pub fn new(fallback: Route) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Appends a route; declaration order is matching order
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Resolves a pathname to the first matching route
    ///
    /// Walks the declared routes in order and returns the first structural
    /// match with its parameters; when none match, the fallback wins with
    /// empty parameters.
    pub fn resolve(&self, path: &str) -> Resolved<'_> {
        self.routes
            .iter()
            .find_map(|route| {
                route.matches(path).map(|params| Resolved { route, params })
            })
            .unwrap_or_else(|| Resolved {
                route: &self.fallback,
                params: Params::new(),
            })
    }

    /// Declared routes, in declaration order (fallback excluded)
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The wildcard fallback route
    pub fn fallback(&self) -> &Route {
        &self.fallback
    }

    /// Number of declared routes, fallback excluded
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are declared
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("fallback", &self.fallback)
            .finish()
    }
}
