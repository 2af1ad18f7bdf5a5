use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;

/// A snapshot of what [`BufferUploads`] did so far.
///
/// [`BufferUploads`]: crate::uploads::BufferUploads
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct UploadStatistics {
	/// Resources created by the platform, including batch pages
	pub created: u64,
	/// Requests served by a pooled resource instead of creating a new one
	pub reused_from_pool: u64,
	/// Requests placed into a batch page
	pub batched_allocations: u64,
	/// Batch pages written to the platform
	pub batch_pages_flushed: u64,
	/// Resources handed to the platform for destruction
	pub destroyed: u64,
	pub device_resets: u64,
}

#[derive(Debug, Default)]
pub(crate) struct UploadCounters {
	pub created: AtomicU64,
	pub reused_from_pool: AtomicU64,
	pub batched_allocations: AtomicU64,
	pub batch_pages_flushed: AtomicU64,
	pub destroyed: AtomicU64,
	pub device_resets: AtomicU64,
}

impl UploadCounters {
	#[inline]
	pub fn inc(counter: &AtomicU64, by: u64) {
		counter.fetch_add(by, Relaxed);
	}

	pub fn snapshot(&self) -> UploadStatistics {
		UploadStatistics {
			created: self.created.load(Relaxed),
			reused_from_pool: self.reused_from_pool.load(Relaxed),
			batched_allocations: self.batched_allocations.load(Relaxed),
			batch_pages_flushed: self.batch_pages_flushed.load(Relaxed),
			destroyed: self.destroyed.load(Relaxed),
			device_resets: self.device_resets.load(Relaxed),
		}
	}
}
