pub mod board;
pub mod calendar;
pub mod inbox;
pub mod profile;
pub mod project;
pub mod shared;
pub mod tag;
pub mod task;
pub mod team;
