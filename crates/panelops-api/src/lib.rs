// panelops-api: Async Rust client for the panel's HTTP API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use client::{Ack, Created, PanelClient, SessionEvent};
pub use error::Error;
pub use session::{Session, SessionStore};
pub use transport::{TlsMode, TransportConfig};
