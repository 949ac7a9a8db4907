//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.
//!
//! ## Cancellation
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes it by calling `token.cancel()` on the provided
//! token. The reducer decides when to cancel, the runtime executes.

use std::time::Duration;

use deskmon_core::api::{LoginRequest, RegisterRequest};
use deskmon_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::state::Route;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn the async login request.
    SubmitLogin {
        request: LoginRequest,
        cancel: CancellationToken,
    },

    /// Spawn the async register request.
    SubmitRegister {
        request: RegisterRequest,
        cancel: CancellationToken,
    },

    /// Write the session to disk.
    PersistSession { session: Session },

    /// Navigate to another screen after a delay.
    ScheduleNavigate {
        delay: Duration,
        route: Route,
        cancel: CancellationToken,
    },

    /// Fire the monitoring dashboard launch after a delay.
    ScheduleLaunch {
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Cancel an in-flight request or pending timer.
    CancelTask { token: CancellationToken },
}
