// File: src/spa.rs
// Purpose: The engine: navigation, render scheduling and interaction dispatch

use maud::PreEscaped;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use octothorpe_router::RouteTable;

use crate::config::Config;
use crate::events::EventStore;
use crate::handlers;
use crate::host::Host;
use crate::pipeline::{self, CommittedPage, CycleOutcome};
use crate::session::SessionService;
use crate::views;
use crate::wiring::{self, Bindings};

/// The single-page engine
///
/// Owns the route table and the render state. Renders are scheduled,
/// not run inline: [`Spa::navigate`] marks a render pending and bumps
/// the generation counter, and [`Spa::settle`] drains pending renders
/// until the page is quiescent. All methods take `&self`; the engine is
/// shared behind an [`Arc`].
pub struct Spa {
    pub(crate) config: Config,
    pub(crate) routes: RouteTable,
    pub(crate) host: Arc<dyn Host>,
    pub(crate) session: Arc<dyn SessionService>,
    pub(crate) events: Arc<dyn EventStore>,
    /// Live render generation; commits from older generations are stale
    pub(crate) generation: AtomicU64,
    pending: AtomicBool,
    nav_open: AtomicBool,
    pub(crate) committed: RwLock<Option<CommittedPage>>,
    pub(crate) bindings: RwLock<Bindings>,
}

impl Spa {
    pub fn new(
        config: Config,
        host: Arc<dyn Host>,
        session: Arc<dyn SessionService>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        let routes = handlers::route_table(Arc::clone(&session), Arc::clone(&events));
        Self {
            config,
            routes,
            host,
            session,
            events,
            generation: AtomicU64::new(0),
            pending: AtomicBool::new(false),
            nav_open: AtomicBool::new(false),
            committed: RwLock::new(None),
            bindings: RwLock::new(Bindings::none()),
        }
    }

    /// Renders whatever the fragment currently points at
    ///
    /// The startup analog of a page load: call once after construction.
    pub async fn boot(&self) {
        debug!(host = self.host.name(), "booting");
        self.schedule();
        self.settle().await;
    }

    /// Reacts to an externally changed fragment, as on a deep link
    pub async fn on_fragment_change(&self) {
        self.schedule();
        self.settle().await;
    }

    /// Moves to a new path
    ///
    /// Closes the mobile nav, rewrites the fragment and schedules a
    /// render. The generation bump makes any in-flight cycle stale
    /// immediately, so its late commits are dropped.
    pub async fn navigate(&self, to: &str) {
        self.nav_open.store(false, Ordering::SeqCst);
        self.host.set_fragment(&format!("#{to}")).await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.schedule();
        debug!(to, "navigate");
    }

    /// Runs pending render cycles until none are left
    ///
    /// A cycle may queue another render (guard redirects, sign-out);
    /// the loop keeps going until the page is quiescent. Returns the
    /// outcome of every cycle run, in order.
    pub async fn settle(&self) -> Vec<CycleOutcome> {
        let mut outcomes = Vec::new();
        while self.pending.swap(false, Ordering::SeqCst) {
            let outcome = self.render_once().await;
            debug!(?outcome, "cycle settled");
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Runs exactly one render cycle, leaving any queued follow-up
    /// render pending
    pub async fn render_once(&self) -> CycleOutcome {
        pipeline::run_cycle(self).await
    }

    /// Flips the mobile nav and recomposes the chrome around the
    /// committed view
    ///
    /// The view content and its bindings are untouched; only the `open`
    /// class on the top nav changes.
    pub async fn toggle_nav(&self) {
        let was_open = self.nav_open.fetch_xor(true, Ordering::SeqCst);
        let open = !was_open;
        debug!(open, "nav toggled");

        let committed = self.committed.read().await.clone();
        if let Some(page) = committed {
            let html = views::layout(
                &self.config.app,
                &page.session,
                open,
                PreEscaped(page.content.clone()),
            );
            self.host.commit(&html.into_string()).await;
        }
    }

    /// Whether the mobile nav is open
    pub fn nav_open(&self) -> bool {
        self.nav_open.load(Ordering::SeqCst)
    }

    /// Submits a form by id
    ///
    /// Returns whether a binding handled it; an unwired id is a no-op,
    /// like submitting a form nothing listens to.
    pub async fn submit(&self, form_id: &str) -> bool {
        let binding = self.bindings.read().await.submit_binding(form_id).cloned();
        match binding {
            Some(binding) => {
                wiring::dispatch_submit(self, &binding).await;
                true
            }
            None => false,
        }
    }

    /// Activates a button or control by id
    pub async fn activate(&self, control_id: &str) -> bool {
        let binding = self
            .bindings
            .read()
            .await
            .activate_binding(control_id)
            .cloned();
        match binding {
            Some(binding) => {
                wiring::dispatch_activate(self, &binding).await;
                true
            }
            None => false,
        }
    }

    fn schedule(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }
}
