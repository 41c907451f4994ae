//! Button-driven pagination for chat bots.
//!
//! A [`Pagination`] shows one page at a time on a single message and moves
//! between pages when its owner presses First, Previous, Stop, Next or Last.
//! The chat platform is abstracted behind [`Transport`].

/// Interaction listener with filter, limit and idle timer.
pub mod collector;
/// Session tunables and end-of-life policy.
pub mod config;
/// Navigation controls and authorization.
pub mod controls;
/// Error taxonomy.
pub mod error;
/// Observer notifications.
pub mod events;
/// Page storage.
pub mod page;
/// Payload rendering.
pub mod render;
/// The pagination state machine.
pub mod session;
/// Platform capabilities consumed by sessions.
pub mod transport;

pub use collector::{CloseReason, Collected, Collector};
pub use config::{DEFAULT_IDLE_TIMEOUT, EndPolicy, MIN_IDLE_TIMEOUT, PaginationConfig};
pub use controls::{
    ControlDescriptor, ControlKind, ControlSet, ControlSetBuilder, ControlStyle, RenderedControl,
    RenderedControls, UserId,
};
pub use error::{PaginationError, Result, TransportError};
pub use events::{EventHub, EventKind, PaginationEvent};
pub use page::{Page, PageStore};
pub use render::{ContentPayload, render};
pub use session::{Dispatch, Pagination, PaginationHandle, Phase};
pub use transport::{Activation, Delivery, InteractionFeed, OriginKind, SendMode, Transport};
