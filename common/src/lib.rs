pub mod axis;
pub mod config;
