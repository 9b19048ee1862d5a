#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod gateway;
pub mod session;

pub use edutrack_core::Clock;

pub use app_services::{AppServices, BackendChoice};
pub use error::{AppServicesError, GatewayConfigError, GatewayError, LoginFailure, SessionError};
pub use gateway::{Backend, GatewayConfig, HttpGateway, InMemoryBackend};
pub use session::{
    ActivityLogResult, ReloadOutcome, ReloadTicket, SessionController, SessionState,
};
