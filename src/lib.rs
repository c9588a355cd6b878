pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod tools;

pub use agent::{Agent, AgentSpec};
pub use config::Config;
pub use error::{AgentError, Result};
