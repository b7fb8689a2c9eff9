pub mod config_service;
pub mod history_navigator;
pub mod paths;
pub mod queue_notifier;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::history_navigator::HistoryNavigator;
pub use crate::queue_notifier::QueueNotifier;
pub use crate::storage::{JsonFileStore, MemoryStore, open_store};
