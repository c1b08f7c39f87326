pub mod apidoc;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
