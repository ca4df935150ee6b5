pub mod resolve;
pub mod review;
pub mod review_view;

pub use resolve::resolve_source;
pub use review::{MountOutcome, ReviewController};
pub use review_view::{FlagBlock, FlagColor, ReviewView};
