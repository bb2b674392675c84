//! Transcript gateway: stateless HTTP proxy in front of the upstream.
mod error;
mod routes;
mod serve;
mod state;

pub use error::GatewayError;
pub use routes::routes;
pub use serve::serve;
pub use state::{GatewayState, SharedState};
