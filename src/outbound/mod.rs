pub mod cache;
pub mod rest;
pub mod session;
