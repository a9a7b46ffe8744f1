//! Identifier allocation for integer-keyed collections.
//!
//! Ids start at `1` and strictly increase. The allocator remembers the
//! highest id it has ever seen, so ids of deleted rows are never reissued,
//! including the one that held the maximum.

use conferencehub_core::error::AppError;
use conferencehub_core::result::AppResult;

/// High-water-mark id allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdAllocator {
    last_issued: u32,
}

impl IdAllocator {
    /// An allocator that has already seen every id in `ids` (seed data).
    pub fn after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            last_issued: ids.into_iter().max().unwrap_or(0),
        }
    }

    /// Highest id issued or observed so far; `0` when none.
    pub fn last_issued(&self) -> u32 {
        self.last_issued
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> AppResult<u32> {
        let id = self
            .last_issued
            .checked_add(1)
            .ok_or_else(|| AppError::internal("Identifier space exhausted"))?;
        self.last_issued = id;
        Ok(id)
    }
}
