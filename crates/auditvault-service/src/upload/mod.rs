//! Presigned and chunked upload flows.

pub mod service;

pub use service::{
    ChunkOutcome, ChunkUpload, CompleteUploadRequest, PresignUploadRequest, PresignedUpload,
    UploadService,
};
