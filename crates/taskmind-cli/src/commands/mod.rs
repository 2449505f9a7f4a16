pub mod assist;
pub mod config;
pub mod task;
