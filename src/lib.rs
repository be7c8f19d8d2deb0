pub mod api;
pub mod client;
pub mod config;
pub mod service;
pub mod store;
