//! In-flight item queue
//!
//! Items are appended when classified at the entry sensor and removed when
//! they reach the exit sensor. The belt preserves order, so a FIFO is enough
//! to pair each exit event with its classification.

use heapless::Deque;

use super::MaterialType;

/// Maximum number of items between the entry and exit sensors
///
/// Far above what fits on the belt. Enqueueing past it is reported as
/// [`QueueError::Full`], and the controller treats that as a fatal fault
/// in the same way as dequeueing from an empty queue.
pub const QUEUE_CAPACITY: usize = 32;

/// Queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Dequeue with no items in flight
    Empty,
    /// Enqueue with the belt already full
    Full,
}

/// A classified item travelling down the belt
///
/// Not `Clone`: a record is owned by the queue until the item exits, then
/// handed out exactly once.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemRecord {
    material: MaterialType,
}

impl ItemRecord {
    pub fn new(material: MaterialType) -> Self {
        Self { material }
    }

    /// Consume the record once the item has been sorted
    pub fn into_material(self) -> MaterialType {
        self.material
    }
}

/// Bounded FIFO of in-flight items
#[derive(Debug)]
pub struct ItemQueue {
    items: Deque<ItemRecord, QUEUE_CAPACITY>,
}

impl ItemQueue {
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append a record at the tail
    pub fn enqueue(&mut self, record: ItemRecord) -> Result<(), QueueError> {
        self.items.push_back(record).map_err(|_| QueueError::Full)
    }

    /// Remove the record at the head
    pub fn dequeue(&mut self) -> Result<ItemRecord, QueueError> {
        self.items.pop_front().ok_or(QueueError::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in flight
    pub fn size(&self) -> usize {
        self.items.len()
    }
}

impl Default for ItemQueue {
    fn default() -> Self {
        Self::new()
    }
}
