//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, time utilities and error types
//! that form the vocabulary of the publishing domain.

mod clock;
mod errors;
mod ids;
mod identity;
mod state_machine;
mod text;
mod timestamp;

pub use clock::{format_relative, is_within_free_access, Clock, FixedClock, SystemClock};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdId, CategoryId, MembershipId, PostId, SubscriberId, UserId};
pub use identity::{Actor, UserRole};
pub use state_machine::StateMachine;
pub use text::{slugify, truncate};
pub use timestamp::Timestamp;
