//! Client for the hypertodo API.
//!
//! The client hardcodes a single URL, the server root. Everything else is
//! discovered: `GET /` yields the todo collection URL, and each todo
//! representation carries the `operations` the client may perform next.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`executor`] | Turns a named operation into an HTTP request and sends it |
//! | [`client`] | Discovery and navigation: list, fetch, create |
//! | [`config`] | Explicit client configuration |
//! | [`error`] | [`ClientError`] |

pub mod client;
pub mod config;
pub mod error;
pub mod executor;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use executor::{prepare, OpExecutor, PreparedRequest, Values};
