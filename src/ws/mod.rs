//! WebSocket layer: upgrade handling and the per-connection echo session.
//!
//! The endpoint at `/sock` upgrades to a WebSocket and echoes every data
//! message back with a fixed prefix until the connection ends.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod session_id;

pub use connection::{CloseReason, EchoSession, SessionState, Transport};
pub use messages::{ECHO_PREFIX, Message, MessageKind};
pub use session_id::SessionId;
