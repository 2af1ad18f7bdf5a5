//! Backing data structures of [`BufferUploads`]: the alternating release queues, the frame tracking deciding when
//! a released resource may be reused, and the pool of reusable resources.
//!
//! [`BufferUploads`]: crate::uploads::BufferUploads

pub mod ab;
pub mod frame_sync;
pub mod pool;
