pub mod config;
pub mod models;
pub mod error;
pub mod language;
pub mod api;
pub mod transform;
pub mod plugin;

pub use config::Config;
pub use models::*;
pub use error::{ErrorKind, ErrorPayload, KnownError, QueryError};
pub use api::ApiClient;
pub use plugin::{MojiPlugin, Query, TranslatePlugin};
