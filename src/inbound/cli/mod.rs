mod commands;
pub mod handlers;
pub mod middleware;
pub mod responses;
mod router;

pub use commands::*;
pub use router::dispatch;
