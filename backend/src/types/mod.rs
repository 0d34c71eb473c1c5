pub mod environment;
pub mod error;
mod extractors;
pub mod settings;

pub use environment::Environment;
pub use error::AppError;
pub use extractors::JsonBody;
pub use settings::{Settings, SettingsError};
