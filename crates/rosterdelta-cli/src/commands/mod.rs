pub mod config;
pub mod delta;
