//! Discord transport for `rusty-pager`, built on twilight.

/// Rendered controls to button components.
pub mod components;
/// Pagination anchors and message handles.
pub mod parent;
/// Component interaction routing.
pub mod router;
/// The twilight-backed transport.
pub mod transport;

pub use components::{build_control_row, button_style};
pub use parent::{PaginationMessage, PaginationParent};
pub use router::{ComponentActivation, ComponentRouter, Routed};
pub use transport::TwilightTransport;
