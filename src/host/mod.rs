//! Host Adapter
//!
//! Boundary between the engine and the process that embeds it.
//! The host owns networking, timers and question flow; it drives this
//! crate either in-process through [`SharedEngine`] or over stdio.

pub mod protocol;
pub mod shared;
pub mod server;

pub use protocol::{HostRequest, HostReply, ReplyError, ErrorCode};
pub use shared::SharedEngine;
pub use server::{HostConfig, HostError, HostStats, handle_request, run};
