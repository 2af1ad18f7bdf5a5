use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BufferUploadsCreateInfo {
	/// The maximum amount of released resources kept for reuse per compatible description. Resources released past
	/// this limit are destroyed.
	pub max_pooled_per_key: usize,
	/// Capacity in bytes of a single batch page. Batched buffers larger than this are allocated on their own.
	pub batch_page_size: u32,
	/// Alignment in bytes of buffers within a batch page. Must be a power of two.
	pub batch_alignment: u32,
}

impl BufferUploadsCreateInfo {
	pub const REASONABLE_DEFAULTS: Self = BufferUploadsCreateInfo {
		max_pooled_per_key: 16,
		batch_page_size: 64 * 1024,
		batch_alignment: 256,
	};

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.batch_alignment.is_power_of_two() {
			Err(ConfigError::BatchAlignment(self.batch_alignment))
		} else if self.batch_page_size < self.batch_alignment {
			Err(ConfigError::BatchPageSize {
				page_size: self.batch_page_size,
				alignment: self.batch_alignment,
			})
		} else {
			Ok(())
		}
	}
}

impl Default for BufferUploadsCreateInfo {
	fn default() -> Self {
		Self::REASONABLE_DEFAULTS
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
	#[error("Batch alignment {0} must be a non-zero power of two")]
	BatchAlignment(u32),
	#[error("Batch page size {page_size} must not be smaller than the batch alignment {alignment}")]
	BatchPageSize { page_size: u32, alignment: u32 },
}
