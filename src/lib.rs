pub mod config;
pub mod error;
pub mod server;
pub mod simulator;
pub mod static_files;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{Result, SentinelError};
