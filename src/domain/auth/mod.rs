mod models;
mod ports;
mod services;

pub use models::*;
pub use ports::*;
pub use services::Service;
