use crate::platform::UploadPlatform;
use parking_lot::Mutex;
use render_core::descriptor::{Format, ResourceDesc, ResourceName, SubResourceInitData};
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;
use thiserror::Error;

/// A platform keeping all resources in system memory. Useful as a headless backend and to observe the decisions
/// [`BufferUploads`] makes.
///
/// Init data is copied tightly packed, row and slice pitches are ignored.
///
/// [`BufferUploads`]: crate::uploads::BufferUploads
#[derive(Debug, Default)]
pub struct MemoryPlatform {
	/// Resources larger than this many bytes fail to allocate
	pub max_resource_size: Option<u64>,
	/// Bytes per texel for every texture format
	pub texel_size: Option<u32>,
	next_id: AtomicU64,
	created: AtomicU64,
	writes: AtomicU64,
	reads: AtomicU64,
	destroyed: AtomicU64,
}

#[derive(Debug)]
pub struct MemoryResource {
	pub id: u64,
	pub name: ResourceName,
	bytes: Mutex<Vec<u8>>,
}

impl MemoryResource {
	pub fn len(&self) -> usize {
		self.bytes.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn contents(&self) -> Vec<u8> {
		self.bytes.lock().clone()
	}
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryPlatformStats {
	pub created: u64,
	pub writes: u64,
	pub reads: u64,
	pub destroyed: u64,
}

impl MemoryPlatformStats {
	pub fn alive(&self) -> u64 {
		self.created - self.destroyed
	}
}

#[derive(Debug, Error)]
pub enum MemoryAllocationError {
	#[error("Resource {name} of {size} bytes exceeds the limit of {max} bytes")]
	TooLarge { name: ResourceName, size: u64, max: u64 },
	#[error("Access of {len} bytes at offset {offset} is out of bounds of resource {id} with {size} bytes")]
	OutOfBounds { id: u64, offset: u64, len: u64, size: u64 },
}

impl MemoryPlatform {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_resource_size(max_resource_size: u64) -> Self {
		Self {
			max_resource_size: Some(max_resource_size),
			..Self::default()
		}
	}

	pub fn stats(&self) -> MemoryPlatformStats {
		MemoryPlatformStats {
			created: self.created.load(Relaxed),
			writes: self.writes.load(Relaxed),
			reads: self.reads.load(Relaxed),
			destroyed: self.destroyed.load(Relaxed),
		}
	}

	fn range(
		resource: &MemoryResource,
		size: usize,
		offset: u64,
		len: usize,
	) -> Result<std::ops::Range<usize>, MemoryAllocationError> {
		let start = usize::try_from(offset).ok();
		match start.and_then(|start| Some(start..start.checked_add(len)?)) {
			Some(range) if range.end <= size => Ok(range),
			_ => Err(MemoryAllocationError::OutOfBounds {
				id: resource.id,
				offset,
				len: len as u64,
				size: size as u64,
			}),
		}
	}
}

impl UploadPlatform for MemoryPlatform {
	type Resource = MemoryResource;
	type AllocationError = MemoryAllocationError;

	fn create_resource(&self, desc: &ResourceDesc, byte_size: u64) -> Result<Self::Resource, Self::AllocationError> {
		let too_large = || MemoryAllocationError::TooLarge {
			name: desc.name,
			size: byte_size,
			max: self.max_resource_size.unwrap_or(usize::MAX as u64),
		};
		if self.max_resource_size.is_some_and(|max| byte_size > max) {
			return Err(too_large());
		}
		let len = usize::try_from(byte_size).map_err(|_| too_large())?;

		self.created.fetch_add(1, Relaxed);
		Ok(MemoryResource {
			id: self.next_id.fetch_add(1, Relaxed),
			name: desc.name,
			bytes: Mutex::new(vec![0; len]),
		})
	}

	fn write(
		&self,
		resource: &Self::Resource,
		offset: u64,
		init: &SubResourceInitData,
	) -> Result<(), Self::AllocationError> {
		let mut bytes = resource.bytes.lock();
		let range = Self::range(resource, bytes.len(), offset, init.size())?;
		bytes[range].copy_from_slice(init.data);
		self.writes.fetch_add(1, Relaxed);
		Ok(())
	}

	fn read(&self, resource: &Self::Resource, offset: u64, out: &mut [u8]) -> Result<(), Self::AllocationError> {
		let bytes = resource.bytes.lock();
		let range = Self::range(resource, bytes.len(), offset, out.len())?;
		out.copy_from_slice(&bytes[range]);
		self.reads.fetch_add(1, Relaxed);
		Ok(())
	}

	fn destroy_resources(&self, resources: impl Iterator<Item = Self::Resource>) {
		let count = resources.count();
		self.destroyed.fetch_add(count as u64, Relaxed);
	}

	fn bytes_per_texel(&self, _format: Format) -> u32 {
		self.texel_size.unwrap_or(4)
	}
}
