// Octothorpe - fragment-routed single-page engine
// Event management app: guarded routes, pure views, idempotent wiring

pub mod config;
pub mod error;
pub mod fields;
pub mod forms;
pub mod validation;

// Collaborators behind trait seams
pub mod events;
pub mod host;
pub mod session;
pub mod storage;

// The engine
pub mod handlers;
pub mod pipeline;
pub mod spa;
pub mod views;
pub mod wiring;

// Re-export the router crate the engine is built on
pub use octothorpe_router::{
    Access, GuardOutcome, HandlerFn, HandlerFuture, Params, PathPattern, Role, Route,
    RouteContext, RouteTable, Viewer, MEMBER_HOME_PATH, SIGN_IN_PATH,
};

// Re-export Maud for view composition
pub use maud::{html as maud, Markup, PreEscaped};

// Re-export engine types
pub use config::Config;
pub use error::{AuthError, EventError};
pub use events::{Event, EventDraft, EventId, EventStore, MemoryEvents};
pub use forms::FormSnapshot;
pub use host::{Host, MemoryHost};
pub use pipeline::CycleOutcome;
pub use session::{MemorySessions, NewUser, SessionService, SessionView, User, UserId};
pub use spa::Spa;
pub use storage::{KvStore, MemoryKv};
pub use views::{FormMode, Notice, Tone};
pub use wiring::{Binding, Bindings};
