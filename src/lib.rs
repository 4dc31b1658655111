pub mod bot;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod handlers;
pub mod platform;
pub mod services;
pub mod utils;
