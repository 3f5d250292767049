pub mod actions;
pub mod bootstrap;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod models;
pub mod particles;
pub mod presence;
