use crate::platform::UploadPlatform;
use crate::uploads::BufferUploads;
use parking_lot::Mutex;
use render_core::descriptor::ResourceDesc;
use std::fmt::{Debug, Formatter};
use std::mem::ManuallyDrop;
use std::sync::Arc;

/// A resource on its way back to [`BufferUploads`], waiting for all frames in flight to finish.
pub(crate) struct Released<P: UploadPlatform> {
	pub desc: ResourceDesc,
	pub resource: P::Resource,
	pub byte_size: u64,
	pub generation: u32,
}

/// A platform resource owned by one or more [`ResourceLocator`]s. Released to its [`BufferUploads`] on drop, which is
/// kept alive until then.
pub(crate) struct Allocation<P: UploadPlatform> {
	resource: ManuallyDrop<P::Resource>,
	/// The description the resource was created with. For batch pages this is the page, not any buffer within.
	desc: ResourceDesc,
	byte_size: u64,
	/// Device generation the resource was created in, see [`BufferUploads::device_reset`]
	generation: u32,
	/// CPU side contents of a batch page which has not been written to the platform yet.
	shadow: Mutex<Option<Vec<u8>>>,
	uploads: Arc<BufferUploads<P>>,
}

impl<P: UploadPlatform> Allocation<P> {
	pub fn new(
		resource: P::Resource,
		desc: ResourceDesc,
		byte_size: u64,
		generation: u32,
		uploads: Arc<BufferUploads<P>>,
	) -> Self {
		Self {
			resource: ManuallyDrop::new(resource),
			desc,
			byte_size,
			generation,
			shadow: Mutex::new(None),
			uploads,
		}
	}

	/// Creates a batch page whose contents are gathered on the CPU until it is flushed.
	pub fn new_pending(
		resource: P::Resource,
		desc: ResourceDesc,
		byte_size: u64,
		generation: u32,
		uploads: Arc<BufferUploads<P>>,
	) -> Self {
		let allocation = Self::new(resource, desc, byte_size, generation, uploads);
		*allocation.shadow.lock() = Some(vec![0; byte_size as usize]);
		allocation
	}

	#[inline]
	pub fn resource(&self) -> &P::Resource {
		&self.resource
	}

	#[inline]
	pub fn desc(&self) -> &ResourceDesc {
		&self.desc
	}

	#[inline]
	pub fn byte_size(&self) -> u64 {
		self.byte_size
	}

	pub fn is_lost(&self) -> bool {
		!self.desc.allocation_rules.is_non_volatile() && self.uploads.device_generation() != self.generation
	}

	pub fn is_pending(&self) -> bool {
		self.shadow.lock().is_some()
	}

	/// Copies `data` into the shadow at `offset`. Returns false if the page is no longer pending.
	pub fn write_shadow(&self, offset: u64, data: &[u8]) -> bool {
		match self.shadow.lock().as_mut() {
			Some(shadow) => {
				let start = offset as usize;
				shadow[start..start + data.len()].copy_from_slice(data);
				true
			}
			None => false,
		}
	}

	/// Copies from the shadow at `offset` into `out`. Returns false if the page is no longer pending.
	pub fn read_shadow(&self, offset: u64, out: &mut [u8]) -> bool {
		match self.shadow.lock().as_ref() {
			Some(shadow) => {
				let start = offset as usize;
				out.copy_from_slice(&shadow[start..start + out.len()]);
				true
			}
			None => false,
		}
	}

	pub fn take_shadow(&self) -> Option<Vec<u8>> {
		self.shadow.lock().take()
	}

	/// Hands the shadow to `write` and clears it once written. The shadow stays locked meanwhile, so readers see
	/// either the shadow or the written resource. Returns false if the page was not pending.
	pub fn flush_shadow<E>(&self, write: impl FnOnce(&[u8]) -> Result<(), E>) -> Result<bool, E> {
		let mut shadow = self.shadow.lock();
		match shadow.as_deref() {
			Some(data) => {
				write(data)?;
				*shadow = None;
				Ok(true)
			}
			None => Ok(false),
		}
	}
}

impl<P: UploadPlatform> Drop for Allocation<P> {
	fn drop(&mut self) {
		// Safety: resource is never accessed again
		let resource = unsafe { ManuallyDrop::take(&mut self.resource) };
		self.uploads.release(Released {
			desc: self.desc,
			resource,
			byte_size: self.byte_size,
			generation: self.generation,
		});
	}
}

/// Handle to GPU visible memory returned by [`BufferUploads::transaction`]. A locator is a range within a platform
/// resource: the whole resource, or a part of a batch page shared with other locators.
///
/// Clones share the same resource. Once the last locator referencing a resource is dropped, it is released and, after
/// all frames in flight finished, either returned to the pool or destroyed.
pub struct ResourceLocator<P: UploadPlatform> {
	allocation: Arc<Allocation<P>>,
	desc: ResourceDesc,
	offset: u64,
	size: u64,
	batched: bool,
}

impl<P: UploadPlatform> ResourceLocator<P> {
	/// A locator spanning the whole allocation
	pub(crate) fn whole(allocation: Arc<Allocation<P>>, desc: ResourceDesc) -> Self {
		let size = allocation.byte_size();
		Self {
			allocation,
			desc,
			offset: 0,
			size,
			batched: false,
		}
	}

	/// A locator for a part of a batch page
	pub(crate) fn batched(page: Arc<Allocation<P>>, desc: ResourceDesc, offset: u64, size: u64) -> Self {
		Self {
			allocation: page,
			desc,
			offset,
			size,
			batched: true,
		}
	}

	pub(crate) fn allocation(&self) -> &Arc<Allocation<P>> {
		&self.allocation
	}

	/// The description this locator was requested with.
	#[inline]
	pub fn desc(&self) -> &ResourceDesc {
		&self.desc
	}

	/// The underlying platform resource, which may be shared with other locators if [`Self::is_batched`].
	#[inline]
	pub fn resource(&self) -> &P::Resource {
		self.allocation.resource()
	}

	/// Offset in bytes of this locator within [`Self::resource`].
	#[inline]
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Size in bytes of this locator.
	#[inline]
	pub fn size(&self) -> u64 {
		self.size
	}

	/// Whether this locator is part of a batch page shared with other buffers.
	#[inline]
	pub fn is_batched(&self) -> bool {
		self.batched
	}

	/// Whether the contents are still gathered on the CPU, waiting for the next flush.
	pub fn is_pending(&self) -> bool {
		self.allocation.is_pending()
	}

	/// Whether the resource was lost in a device reset. Resources with [`AllocationRules::NON_VOLATILE`] are never
	/// lost.
	///
	/// [`AllocationRules::NON_VOLATILE`]: render_core::descriptor::AllocationRules::NON_VOLATILE
	pub fn is_lost(&self) -> bool {
		self.allocation.is_lost()
	}

	/// Whether both locators reference the same platform resource.
	pub fn shares_resource_with(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.allocation, &other.allocation)
	}
}

impl<P: UploadPlatform> Clone for ResourceLocator<P> {
	fn clone(&self) -> Self {
		Self {
			allocation: self.allocation.clone(),
			desc: self.desc,
			offset: self.offset,
			size: self.size,
			batched: self.batched,
		}
	}
}

impl<P: UploadPlatform> Debug for ResourceLocator<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResourceLocator")
			.field("name", &self.desc.name)
			.field("offset", &self.offset)
			.field("size", &self.size)
			.finish()
	}
}
