//! IRC client side of the bot.
//!
//! - [`wire`]: line parsing and serialization
//! - [`connection`]: the [`crate::commands::Connection`] the dispatcher replies through
//! - [`client`]: connect, register, and run the session loop
//! - [`tls`]: optional TLS upgrade

mod client;
mod connection;
mod tls;
pub mod wire;

pub use client::{run, run_session};
pub use connection::IrcConnection;
pub use wire::Message;
