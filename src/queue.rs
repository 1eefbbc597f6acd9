//! Sliding-window prefetch queue: a bounded buffer of fetched images plus the
//! cursor naming the slot currently on screen.
//!
//! Insertion happens only at the tail, eviction only at the head. At the live
//! edge an advance evicts and refills in one step, so the numeric cursor stays
//! put while the image it names moves forward.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::events::Direction;
use crate::fetch::{FetchedImage, ImageFetcher};
use crate::resource::{ResourceHandle, ResourcePool};

/// Resident window: four images of history, the current one, two ahead.
pub const QUEUE_SIZE: usize = 7;
/// Home position of the cursor once the queue has warmed up.
pub const CURRENT_INDEX: usize = 4;

/// One queue position: a fetched image, or a placeholder when the fetch that
/// should have filled it failed.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    /// Stable rendering identity; never reused within a session.
    pub id: u64,
    /// `None` marks a placeholder ("no image available").
    pub handle: Option<ResourceHandle>,
    pub content_type: Option<String>,
}

#[derive(Debug)]
pub struct SlideQueue {
    slots: VecDeque<ImageSlot>,
    /// Stored cursor, always in `0..=CURRENT_INDEX`. The displayed index is
    /// this clamped into the populated range; see [`SlideQueue::current_index`].
    cursor: usize,
    next_slot_id: u64,
    pool: ResourcePool,
    last_direction: Direction,
}

impl Default for SlideQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: VecDeque::with_capacity(QUEUE_SIZE),
            cursor: CURRENT_INDEX,
            next_slot_id: 0,
            pool: ResourcePool::new(),
            last_direction: Direction::Forward,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() == QUEUE_SIZE
    }

    #[must_use]
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        !self.slots.is_empty() && self.cursor > 0
    }

    /// Index of the slot considered on screen: the stored cursor clamped into
    /// the populated range, which is what lets rendering proceed while the
    /// queue is still cold-filling.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        if self.slots.is_empty() {
            None
        } else {
            Some(self.cursor.min(self.slots.len() - 1))
        }
    }

    #[must_use]
    pub fn current_slot(&self) -> Option<&ImageSlot> {
        self.current_index().and_then(|idx| self.slots.get(idx))
    }

    /// Payload bytes for the current slot, cloned out of the pool. `None` for
    /// an empty queue or a placeholder slot.
    #[must_use]
    pub fn current_payload(&self) -> Option<Bytes> {
        self.current_slot()
            .and_then(|slot| slot.handle)
            .and_then(|handle| self.pool.payload(handle))
    }

    /// Number of live payloads held by the queue; bounded by [`QUEUE_SIZE`].
    #[must_use]
    pub fn resident_payloads(&self) -> usize {
        self.pool.live_len()
    }

    /// Issue `n` concurrent fetches, join them, and append the successes at
    /// the tail in initiation order. Failures are dropped, leaving the queue
    /// short rather than padded. `n` is clamped so the queue never grows past
    /// capacity. Returns the number of slots appended.
    pub async fn fill<F: ImageFetcher>(&mut self, fetcher: &F, n: usize) -> usize {
        let want = n.min(QUEUE_SIZE - self.slots.len());
        if want == 0 {
            return 0;
        }
        let results = join_all((0..want).map(|_| fetcher.fetch_one())).await;
        let mut appended = 0;
        for fetched in results.into_iter().flatten() {
            self.push_fetched(fetched);
            appended += 1;
        }
        debug!(requested = n, appended, len = self.slots.len(), "queue fill");
        appended
    }

    /// Move one image forward.
    ///
    /// Inside replayed history this is cursor motion only, with no fetch and
    /// no eviction. At the live edge the window slides: the head is released
    /// and evicted, one fresh image is fetched and appended, and the cursor is
    /// left numerically unchanged because the whole window shifted under it.
    pub async fn advance<F: ImageFetcher>(&mut self, fetcher: &F) {
        self.last_direction = Direction::Forward;
        if self.cursor < CURRENT_INDEX {
            self.cursor += 1;
            return;
        }
        // Live edge. Never evict the slot the clamped cursor still names: with
        // a single resident image the queue grows instead of sliding.
        let evicting = self.slots.len() >= 2;
        if evicting {
            if let Some(head) = self.slots.pop_front() {
                self.pool.release(head.handle);
            }
        }
        match fetcher.fetch_one().await {
            Some(fetched) => self.push_fetched(fetched),
            None if evicting => {
                // Placeholder keeps the window length stable.
                let slot = self.placeholder_slot();
                self.slots.push_back(slot);
            }
            None => {
                warn!("advance fetch failed with nothing evicted; staying put");
            }
        }
    }

    /// Step back through resident history. Pure cursor motion, no network.
    /// No-op at the oldest resident slot (and on an empty queue).
    pub fn retreat(&mut self) -> bool {
        if self.slots.is_empty() || self.cursor == 0 {
            return false;
        }
        self.last_direction = Direction::Backward;
        self.cursor -= 1;
        true
    }

    /// Release every handle and return to the empty cold-start state.
    pub fn drain(&mut self) {
        for slot in self.slots.drain(..) {
            self.pool.release(slot.handle);
        }
        self.cursor = CURRENT_INDEX;
    }

    fn push_fetched(&mut self, fetched: FetchedImage) {
        let handle = self.pool.acquire(fetched.payload);
        let slot = ImageSlot {
            id: self.take_slot_id(),
            handle: Some(handle),
            content_type: fetched.content_type,
        };
        self.slots.push_back(slot);
    }

    fn placeholder_slot(&mut self) -> ImageSlot {
        ImageSlot {
            id: self.take_slot_id(),
            handle: None,
            content_type: None,
        }
    }

    fn take_slot_id(&mut self) -> u64 {
        let id = self.next_slot_id;
        self.next_slot_id += 1;
        id
    }
}
