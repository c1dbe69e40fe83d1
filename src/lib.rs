pub mod api;
pub mod config;
pub mod ids;
pub mod service;
pub mod store;
pub mod telemetry;
