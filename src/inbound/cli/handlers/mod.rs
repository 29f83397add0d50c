pub mod auth;
pub mod board;
pub mod calendar;
pub mod inbox;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod team;
