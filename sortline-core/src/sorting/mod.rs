//! Item classification and tracking
//!
//! Objects are classified once at the belt entry, travel down the belt as
//! [`ItemRecord`]s in an [`ItemQueue`], and are counted into a bin at the
//! exit.

pub mod classifier;
pub mod counts;
pub mod material;
pub mod queue;

pub use classifier::Classifier;
pub use counts::SortCounts;
pub use material::MaterialType;
pub use queue::{ItemQueue, ItemRecord, QueueError, QUEUE_CAPACITY};
