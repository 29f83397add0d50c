pub mod auth;
pub mod calendar;
pub mod inbox;
pub mod kanban;
pub mod session;
pub mod status;
pub mod team;
pub mod workspace;
