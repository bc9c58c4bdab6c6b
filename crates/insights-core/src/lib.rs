pub mod config;
pub mod dashboard;
pub mod error;
pub mod record;
pub mod selection;
pub mod session;
pub mod store;
pub mod tag;

// Re-export main types for convenience
pub use config::Config;
pub use dashboard::{DashboardConfig, DashboardSummary, IssuePriority, Priority, RecentCase};
pub use error::ValidationError;
pub use record::{InteractionDraft, InteractionRecord};
pub use selection::SelectionState;
pub use session::Session;
pub use store::InteractionStore;
pub use tag::{InteractionType, Tag};
