//! UI event types.
//!
//! Events are the inputs to the reducer: terminal input, frame ticks,
//! and results of async work delivered through the runtime inbox.

use deskmon_core::api::{ApiError, AuthResponse, UserResponse};

use crate::state::Route;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Frame tick; drives the spinner and render cadence.
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// The async login request finished.
    LoginOutcome {
        result: Result<AuthResponse, ApiError>,
    },

    /// The async register request finished.
    RegisterOutcome {
        result: Result<UserResponse, ApiError>,
    },

    /// A scheduled navigation timer fired.
    NavigateDue { route: Route },

    /// The monitoring launch timer fired.
    LaunchDue,
}
