mod auth;
mod client;
pub mod error;
mod inbox;
pub mod models;
mod team;
mod workspace;

pub use client::{NewRestClientParams, RestClient};
