pub mod config;
pub mod interpret;
pub mod utils;
