pub mod config;
pub mod fs;
pub mod http;
pub mod repositories;
