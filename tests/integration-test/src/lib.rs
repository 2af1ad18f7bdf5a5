//! Tests replaying the resource request patterns of typical clients against [`BufferUploads`] backed by the
//! in-memory platform.
//!
//! [`BufferUploads`]: buffer_uploads::uploads::BufferUploads

pub mod erosion;
pub mod gbuffer;
pub mod terrain;

/// Installs a logger printing to the test output, may be called by every test.
pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}
