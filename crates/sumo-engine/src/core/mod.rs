pub mod physics;
pub mod schedule;
pub mod time;
