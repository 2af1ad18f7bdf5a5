//! Allocation of GPU visible memory for [`ResourceDesc`]s, with pooling of released resources, batching of small
//! buffers into shared pages and frame-latency delayed destruction. The graphics API itself is abstracted by
//! [`UploadPlatform`].
//!
//! [`ResourceDesc`]: render_core::descriptor::ResourceDesc
//! [`UploadPlatform`]: platform::UploadPlatform

pub mod backing;
pub mod platform;
pub mod uploads;
