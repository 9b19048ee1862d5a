mod controller;
mod record;
mod reload;

// Public API of the session subsystem.
pub use crate::error::{LoginFailure, SessionError};
pub use controller::{ActivityLogResult, DEFAULT_PASSWORD, LOAD_FAILED_MESSAGE, SessionController, SessionState};
pub use record::SESSION_KEY;
pub use reload::{ReloadOutcome, ReloadTicket};
