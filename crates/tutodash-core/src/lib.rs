//! tutodash-core: shared library for the tutorial dashboard.
//!
//! Three layers, leaf to root:
//! 1. **model** — the `Tutorial` record and the `TutorialDraft` form buffer.
//! 2. **api** — `TutorialApi` trait + reqwest implementation against the REST
//!    backend, with error normalization to a single display string.
//! 3. **controller** — the `Dashboard` state machine: collection, selection,
//!    form buffers, filters, and busy/feedback flags. All UI front ends
//!    (currently the TUI add-on) render from this state and dispatch into it.

pub mod api;
pub mod config;
pub mod controller;
pub mod model;

pub use api::{ApiError, ApiResult, HttpTutorialApi, TutorialApi};
pub use config::ApiConfig;
pub use controller::{Answer, Confirm, Dashboard, PendingAction};
pub use model::{Tutorial, TutorialDraft};
