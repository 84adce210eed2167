//! Domain layer for the roster engine.
//!
//! Core record types and business rules, independent of the transport layer
//! or any presentation concern.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`record`]: Traits parameterizing the generic store/pipeline/moderation
//! - [`score`]: Pure score extraction driving the sort order
//! - [`student`], [`coordinator`], [`school`], [`callback`]: resource models

pub mod callback;
pub mod coordinator;
pub mod error;
pub mod record;
pub mod school;
pub mod score;
pub mod student;

pub use callback::Callback;
pub use coordinator::Coordinator;
pub use error::{Result, RosterError};
pub use record::{ApprovalStatus, Moderatable, RosterRecord, Viewable};
pub use school::School;
pub use score::ScoreBasis;
pub use student::Student;
