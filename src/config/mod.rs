pub mod tool;

pub use tool::{ToolConfig, DEFAULT_CONFIG_FILE};
