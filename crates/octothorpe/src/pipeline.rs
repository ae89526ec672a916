// File: src/pipeline.rs
// Purpose: The render cycle, from fragment to committed page

use maud::PreEscaped;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

use octothorpe_router::{GuardOutcome, RouteContext};

use crate::error::error_text;
use crate::session::SessionView;
use crate::spa::Spa;
use crate::views::{self, Tone};
use crate::wiring::{self, Bindings};

/// How one render cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The route's view was committed and wired
    Rendered,
    /// A guard redirected; the next cycle renders the target
    Redirected(&'static str),
    /// A role guard refused in place, leaving the fragment as is
    Denied,
    /// The handler failed and the failure screen was committed
    Failed,
    /// A newer navigation started mid-cycle; nothing was committed
    Superseded,
}

/// The page as of the last applied commit
///
/// `content` is the view inside the layout, kept so the chrome can be
/// recomposed around it without re-running the route handler.
#[derive(Debug, Clone)]
pub(crate) struct CommittedPage {
    pub(crate) content: String,
    pub(crate) session: SessionView,
}

/// Extracts the route path from a location fragment
///
/// An absent or bare `#` fragment reads as the home path.
pub fn path_from_fragment(fragment: &str) -> String {
    let fragment = if fragment.is_empty() { "#/" } else { fragment };
    let path = fragment.replacen('#', "", 1);
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Runs one render cycle against the current fragment
///
/// The cycle claims a fresh generation up front. Every commit it makes
/// is checked against the live counter, so a navigation that starts
/// mid-cycle silently wins over this cycle's late output.
pub(crate) async fn run_cycle(spa: &Spa) -> CycleOutcome {
    let gen = spa.generation.fetch_add(1, Ordering::SeqCst) + 1;
    let pathname = path_from_fragment(&spa.host.fragment().await);
    let resolved = spa.routes.resolve(&pathname);
    let session = spa.session.snapshot().await;

    debug!(%pathname, pattern = resolved.route.pattern(), gen, "render cycle");

    match resolved.route.access().evaluate(&session.guard_viewer()) {
        GuardOutcome::Redirect(target) => {
            spa.navigate(target).await;
            return CycleOutcome::Redirected(target);
        }
        GuardOutcome::Deny => {
            let body = views::message(
                Tone::Error,
                "Access denied",
                "You do not have permission to access this page.",
            );
            let applied =
                commit_page(spa, gen, &session, &body.into_string(), Bindings::header()).await;
            return if applied {
                CycleOutcome::Denied
            } else {
                CycleOutcome::Superseded
            };
        }
        GuardOutcome::Allow => {}
    }

    // The loading screen always lands before the handler runs.
    commit_page(
        spa,
        gen,
        &session,
        &views::loading().into_string(),
        Bindings::none(),
    )
    .await;

    let ctx = RouteContext::new(pathname.clone(), resolved.params.clone());
    match resolved.route.invoke(ctx).await {
        Ok(markup) => {
            let bindings = wiring::bindings_for(&pathname, &resolved.params, &session);
            if commit_page(spa, gen, &session, &markup.into_string(), bindings).await {
                wiring::after_commit(spa, &pathname).await;
                CycleOutcome::Rendered
            } else {
                CycleOutcome::Superseded
            }
        }
        Err(err) => {
            let body = views::message(Tone::Error, "Something went wrong", &error_text(&err));
            if commit_page(spa, gen, &session, &body.into_string(), Bindings::header()).await {
                CycleOutcome::Failed
            } else {
                CycleOutcome::Superseded
            }
        }
    }
}

/// Composes the layout around `content` and pushes it to the host
///
/// Applies only while `gen` is still the live generation; a stale
/// commit is dropped and leaves page, state and bindings untouched.
/// Returns whether the commit applied.
pub(crate) async fn commit_page(
    spa: &Spa,
    gen: u64,
    session: &SessionView,
    content: &str,
    bindings: Bindings,
) -> bool {
    if spa.generation.load(Ordering::SeqCst) != gen {
        warn!(gen, "discarding stale commit");
        return false;
    }

    let html = views::layout(
        &spa.config.app,
        session,
        spa.nav_open(),
        PreEscaped(content.to_string()),
    );
    spa.host.commit(&html.into_string()).await;

    *spa.committed.write().await = Some(CommittedPage {
        content: content.to_string(),
        session: session.clone(),
    });
    *spa.bindings.write().await = bindings;
    true
}
