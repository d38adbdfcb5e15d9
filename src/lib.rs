pub mod api;
pub mod app;
pub mod config;
pub mod inventory;
pub mod report;
pub mod services;
pub mod utils;
