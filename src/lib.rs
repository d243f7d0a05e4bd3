pub mod config;
pub mod middleware;
pub mod redirect;
pub mod routes;
pub mod settings;
