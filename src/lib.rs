pub mod core;
pub mod models;
pub mod session;
pub mod api;
pub mod table;
pub mod views;
pub mod export;
pub mod render;
pub mod handlers;
pub mod utils;
