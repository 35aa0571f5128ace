//! Resume parser app: submission controller, configuration and console front end.
mod platform;

pub use platform::config::{AppConfig, ConfigError, CONFIG_FILENAME, ENDPOINT_ENV};
pub use platform::controller::{candidate_from_path, SubmissionController};
pub use platform::logging::{initialize as initialize_logging, LogDestination};
pub use platform::ui::command::{parse as parse_command, Command, HELP};
pub use platform::ui::render::render;
