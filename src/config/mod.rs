//! Configuration
//!
//! Layered configuration (defaults, global file, project file, environment)
//! for the gateway connection, per-use-case model selectors, and synthetic
//! media generation parameters.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Config, GatewayConfig, GenerationConfig, ModelConfig};
