//! # echo-gateway
//!
//! Minimal HTTP service with an introspectable router, static file
//! serving and a WebSocket echo endpoint.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── dispatch (api/)
//!     │     ├── Router: first match on (method, path) (routing/)
//!     │     ├── StaticFiles: unmatched GET/HEAD (api/static_files)
//!     │     └── fallback: 404
//!     │
//!     └── GET /sock upgrade (ws/)
//!           └── EchoSession, one task per connection
//! ```
//!
//! The route table is built once at startup and shared read-only; sessions
//! share nothing with each other.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routing;
pub mod shutdown;
pub mod ws;
