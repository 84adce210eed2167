//! Application layer: state, view derivation, moderation, and the event
//! handler that ties them together.

pub mod actions;
pub mod handler;
pub mod log_feed;
pub mod menu;
pub mod moderation;
pub mod pagination;
pub mod pipeline;
pub mod state;
pub mod view;

pub use actions::RosterAction;
pub use handler::{handle_event, RosterEvent};
pub use log_feed::{LogEntry, LogFeed};
pub use menu::RowMenuController;
pub use moderation::{ModerationAction, ModerationIntent, ModerationWorkflow, RollbackToken};
pub use pagination::PaginationCursor;
pub use state::{Banner, BannerKind, RosterState};
pub use view::{SortOrder, StandardFilter, ViewState};
