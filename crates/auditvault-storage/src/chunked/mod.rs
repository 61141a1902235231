//! Stateless chunked uploads.
//!
//! A chunked upload is a sequence of independent requests carrying
//! `chunk_index` and `total_chunks`. No server-side session ties them
//! together: non-final chunks are acknowledged and dropped, and only the
//! final chunk is written to the object store.

use serde::{Deserialize, Serialize};

use auditvault_core::error::AppError;
use auditvault_core::result::AppResult;

/// Where a chunk sits in its upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkPosition {
    /// Index 0 of a multi-chunk upload.
    First,
    /// Neither the first nor the last chunk.
    Intermediate,
    /// The last chunk (or the only chunk).
    Final,
}

/// The position fields sent with every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDescriptor {
    /// Zero-based index of this chunk.
    pub index: u32,
    /// Number of chunks in the upload.
    pub total: u32,
}

impl ChunkDescriptor {
    /// Validate and build a descriptor.
    pub fn new(index: u32, total: u32) -> AppResult<Self> {
        if total == 0 {
            return Err(AppError::validation("total_chunks must be at least 1"));
        }
        if index >= total {
            return Err(AppError::validation(format!(
                "chunk_index {index} is out of range for {total} chunks"
            )));
        }
        Ok(Self { index, total })
    }

    /// Classify the chunk.
    pub fn position(&self) -> ChunkPosition {
        if self.index + 1 == self.total {
            ChunkPosition::Final
        } else if self.index == 0 {
            ChunkPosition::First
        } else {
            ChunkPosition::Intermediate
        }
    }

    /// Whether this chunk completes the upload.
    pub fn is_final(&self) -> bool {
        self.position() == ChunkPosition::Final
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        assert_eq!(ChunkDescriptor::new(0, 3).unwrap().position(), ChunkPosition::First);
        assert_eq!(
            ChunkDescriptor::new(1, 3).unwrap().position(),
            ChunkPosition::Intermediate
        );
        assert_eq!(ChunkDescriptor::new(2, 3).unwrap().position(), ChunkPosition::Final);
    }

    #[test]
    fn test_single_chunk_is_final() {
        let chunk = ChunkDescriptor::new(0, 1).unwrap();
        assert!(chunk.is_final());
    }

    #[test]
    fn test_out_of_range() {
        assert!(ChunkDescriptor::new(0, 0).is_err());
        assert!(ChunkDescriptor::new(3, 3).is_err());
    }
}
