pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod experience;
pub mod handlers;
pub mod models;
pub mod templates_structs;
