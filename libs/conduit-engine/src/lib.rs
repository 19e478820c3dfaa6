pub mod alert;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod factory;
pub mod filter;
pub mod input;
pub mod output;
pub mod supervisor;
pub mod worker;

pub use bootstrap::Engine;
pub use config::EngineConfig;
pub use error::EngineError;
pub use supervisor::Supervisor;
pub use worker::{RunningWorker, Worker};
