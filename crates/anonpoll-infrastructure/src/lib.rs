pub mod config_service;
pub mod json_avatar_store;
pub mod paths;
pub mod smtp_notifier;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_avatar_store::JsonAvatarStore;
pub use crate::paths::PollPaths;
pub use crate::smtp_notifier::SmtpNotifier;
pub use crate::storage::{SecretStorage, SecretStorageError};
