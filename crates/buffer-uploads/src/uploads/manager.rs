use crate::backing::ab::{ABArray, AB};
use crate::backing::frame_sync::FrameSync;
use crate::backing::pool::{PooledResource, ResourcePool};
use crate::platform::UploadPlatform;
use crate::uploads::allocation::{Allocation, Released, ResourceLocator};
use crate::uploads::batch::{self, BatchPages};
use crate::uploads::{BufferUploadsCreateInfo, ConfigError, UploadCounters, UploadError, UploadStatistics};
use crossbeam_queue::SegQueue;
use parking_lot::Mutex;
use render_core::descriptor::{ResourceDesc, SubResourceInitData};
use static_assertions::assert_impl_all;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{AcqRel, Acquire};
use std::sync::Arc;

/// Hands out GPU visible memory for [`ResourceDesc`]s, deciding how each request is backed according to its
/// [`AllocationRules`]:
/// * plain requests create a dedicated platform resource
/// * `POOLED` requests reuse a released resource of a compatible description
/// * `BATCHED` linear buffers are sub-allocated from shared pages, which are written to the platform on [`Self::flush`]
/// * `STAGING` requests may be read back and updated regardless of their [`CpuAccess`]
///
/// Released resources are only reused or destroyed once all [`UploadFrame`]s that were running when they were
/// released have ended.
///
/// [`AllocationRules`]: render_core::descriptor::AllocationRules
/// [`CpuAccess`]: render_core::descriptor::CpuAccess
pub struct BufferUploads<P: UploadPlatform> {
	platform: P,
	create_info: BufferUploadsCreateInfo,
	frame_sync: FrameSync,
	release_queues: ABArray<SegQueue<Released<P>>>,
	pool: ResourcePool<P::Resource>,
	batches: Mutex<BatchPages<P>>,
	device_generation: AtomicU32,
	counters: UploadCounters,
}

assert_impl_all!(BufferUploads<crate::platform::MemoryPlatform>: Send, Sync);
assert_impl_all!(ResourceLocator<crate::platform::MemoryPlatform>: Send, Sync, Clone);

impl<P: UploadPlatform> BufferUploads<P> {
	pub fn new(platform: P, create_info: BufferUploadsCreateInfo) -> Result<Arc<Self>, ConfigError> {
		create_info.validate()?;
		Ok(Arc::new(Self {
			platform,
			create_info,
			frame_sync: FrameSync::new(),
			release_queues: ABArray::new(SegQueue::new),
			pool: ResourcePool::new(create_info.max_pooled_per_key),
			batches: Mutex::new(BatchPages::default()),
			device_generation: AtomicU32::new(0),
			counters: UploadCounters::default(),
		}))
	}

	#[inline]
	pub fn platform(&self) -> &P {
		&self.platform
	}

	#[inline]
	pub fn create_info(&self) -> &BufferUploadsCreateInfo {
		&self.create_info
	}

	/// Allocates memory for `desc` and fills it with `init`, if given. `init` may be smaller than the resource, the
	/// remaining bytes are zeroed. The returned locator keeps this `BufferUploads` alive.
	pub fn transaction(
		self: &Arc<Self>,
		desc: &ResourceDesc,
		init: Option<SubResourceInitData>,
	) -> Result<ResourceLocator<P>, UploadError<P>> {
		profiling::function_scope!();
		desc.validate()?;
		let byte_size = self.byte_size(desc)?;
		if let Some(init) = &init {
			Self::check_range(desc, init.size(), byte_size)?;
		}

		if desc.allocation_rules.is_batched() {
			if let Some(locator) = self.try_batch(desc, byte_size, init.as_ref())? {
				return Ok(locator);
			}
		}

		let (allocation, reused) = self.allocate(desc, byte_size)?;
		let allocation = Arc::new(allocation);
		let init = init.filter(|init| !init.is_empty());
		match init {
			Some(init) if !reused || init.size() as u64 == allocation.byte_size() => {
				self.platform
					.write(allocation.resource(), 0, &init)
					.map_err(UploadError::Platform)?;
			}
			// reused resources still hold the contents of their previous owner
			_ if reused => {
				let len =
					usize::try_from(allocation.byte_size()).map_err(|_| UploadError::SizeOverflow { name: desc.name })?;
				let mut data = vec![0; len];
				if let Some(init) = init {
					data[..init.data.len()].copy_from_slice(init.data);
				}
				self.platform
					.write(allocation.resource(), 0, &SubResourceInitData::new(&data))
					.map_err(UploadError::Platform)?;
			}
			_ => (),
		}
		log::trace!("Allocated {} with {} bytes", desc.name, byte_size);
		Ok(ResourceLocator::whole(allocation, *desc))
	}

	/// Sub-allocates `desc` from a batch page. Returns `None` if it is too large to be batched.
	fn try_batch(
		self: &Arc<Self>,
		desc: &ResourceDesc,
		byte_size: u64,
		init: Option<&SubResourceInitData>,
	) -> Result<Option<ResourceLocator<P>>, UploadError<P>> {
		let Some(key) = batch::batch_key(desc) else {
			return Ok(None);
		};
		let page_size = batch::page_size(&key, self.create_info.batch_page_size);
		if byte_size > page_size as u64 {
			return Ok(None);
		}
		let alignment = batch::batch_alignment(desc, self.create_info.batch_alignment);

		// init data must reach the shadow before the page can be flushed
		let mut batches = self.batches.lock();
		let (page, offset) = batches.sub_allocate::<UploadError<P>>(key, byte_size, alignment, || {
			let page_desc = batch::page_desc(&key, page_size);
			let page_bytes = self.byte_size(&page_desc)?;
			let (resource, page_bytes, _) = self.create_or_reuse(&page_desc, page_bytes)?;
			Ok(Arc::new(Allocation::new_pending(
				resource,
				page_desc,
				page_bytes,
				self.device_generation(),
				self.clone(),
			)))
		})?;
		if let Some(init) = init {
			page.write_shadow(offset, init.data);
		}
		drop(batches);

		UploadCounters::inc(&self.counters.batched_allocations, 1);
		log::trace!("Batched {} with {} bytes at offset {}", desc.name, byte_size, offset);
		Ok(Some(ResourceLocator::batched(page, *desc, offset, byte_size)))
	}

	/// Allocates a dedicated resource for `desc`. Returns whether it was reused from the pool.
	fn allocate(
		self: &Arc<Self>,
		desc: &ResourceDesc,
		byte_size: u64,
	) -> Result<(Allocation<P>, bool), UploadError<P>> {
		let (resource, byte_size, reused) = self.create_or_reuse(desc, byte_size)?;
		let allocation = Allocation::new(resource, *desc, byte_size, self.device_generation(), self.clone());
		Ok((allocation, reused))
	}

	fn create_or_reuse(
		&self,
		desc: &ResourceDesc,
		byte_size: u64,
	) -> Result<(P::Resource, u64, bool), UploadError<P>> {
		if desc.allocation_rules.is_pooled() {
			if let Some(pooled) = self.pool.take(desc) {
				log::trace!("Reusing pooled resource for {}", desc.name);
				UploadCounters::inc(&self.counters.reused_from_pool, 1);
				return Ok((pooled.resource, pooled.byte_size, true));
			}
		}
		let resource = self
			.platform
			.create_resource(desc, byte_size)
			.map_err(UploadError::Platform)?;
		UploadCounters::inc(&self.counters.created, 1);
		Ok((resource, byte_size, false))
	}

	fn byte_size(&self, desc: &ResourceDesc) -> Result<u64, UploadError<P>> {
		self.platform
			.byte_size(desc)
			.ok_or(UploadError::SizeOverflow { name: desc.name })
	}

	fn check_range(desc: &ResourceDesc, len: usize, size: u64) -> Result<(), UploadError<P>> {
		if len as u64 > size {
			Err(UploadError::OutOfRange {
				name: desc.name,
				len: len as u64,
				size,
			})
		} else {
			Ok(())
		}
	}

	/// Writes all pending batch pages to the platform. Pages failing to write stay pending and are retried on the next
	/// flush, the first error is returned.
	pub fn flush(&self) -> Result<(), UploadError<P>> {
		profiling::function_scope!();
		let pending = self.batches.lock().take_pending();
		if pending.is_empty() {
			return Ok(());
		}

		let mut flushed = 0;
		let mut failed = Vec::new();
		let mut error = None;
		for page in pending {
			let written =
				page.flush_shadow(|data| self.platform.write(page.resource(), 0, &SubResourceInitData::new(data)));
			match written {
				Ok(true) => flushed += 1,
				Ok(false) => (),
				Err(err) => {
					error.get_or_insert(err);
					failed.push(page);
				}
			}
		}

		UploadCounters::inc(&self.counters.batch_pages_flushed, flushed);
		log::debug!("Flushed {flushed} batch pages");
		if !failed.is_empty() {
			log::warn!("{} batch pages failed to flush and remain pending", failed.len());
			self.batches.lock().requeue(failed);
		}
		match error {
			None => Ok(()),
			Some(err) => Err(UploadError::Platform(err)),
		}
	}

	/// Begins a new frame, flushing pending batch pages. Resources released while this frame is alive are not reused
	/// or destroyed until the frame ends.
	pub fn frame(self: &Arc<Self>) -> UploadFrame<P> {
		profiling::function_scope!();
		if let Err(err) = self.flush() {
			log::error!("Flushing batch pages failed: {err}");
		}
		let (frame_ab, drained) = self.frame_sync.frame_begin(|ab| self.drain_queue(ab));
		if let Some(released) = drained {
			self.recycle(released);
		}
		UploadFrame {
			uploads: self.clone(),
			frame_ab,
		}
	}

	fn frame_end(&self, frame_ab: AB) {
		if let Some(released) = self.frame_sync.frame_end(frame_ab, |ab| self.drain_queue(ab)) {
			self.recycle(released);
		}
	}

	fn drain_queue(&self, ab: AB) -> Vec<Released<P>> {
		let queue = &self.release_queues[ab];
		let mut out = Vec::with_capacity(queue.len());
		while let Some(released) = queue.pop() {
			out.push(released);
		}
		out
	}

	/// Returns released resources to the pool, or destroys them if they are not pooled, lost or the pool is full.
	fn recycle(&self, released: Vec<Released<P>>) {
		if released.is_empty() {
			return;
		}
		profiling::scope!("recycle released resources");
		let generation = self.device_generation();
		let mut destroy = Vec::new();
		for released in released {
			let rules = released.desc.allocation_rules;
			let alive = rules.is_non_volatile() || released.generation == generation;
			if !(rules.is_pooled() && alive) {
				destroy.push(released.resource);
				continue;
			}

			let pooled = PooledResource {
				resource: released.resource,
				byte_size: released.byte_size,
			};
			if let Err(pooled) = self.pool.put(&released.desc, pooled) {
				log::debug!("Pool for {} is full, destroying released resource", released.desc.name);
				destroy.push(pooled.resource);
			}
		}
		self.destroy(destroy);
	}

	fn destroy(&self, resources: Vec<P::Resource>) {
		if !resources.is_empty() {
			UploadCounters::inc(&self.counters.destroyed, resources.len() as u64);
			self.platform.destroy_resources(resources.into_iter());
		}
	}

	pub(crate) fn release(&self, released: Released<P>) {
		self.release_queues[self.frame_sync.write_queue_ab()].push(released);
	}

	/// Notifies that the device was lost and recreated. All resources without
	/// [`AllocationRules::NON_VOLATILE`] are lost: pooled ones are destroyed, pending batch pages are discarded and
	/// their locators report [`ResourceLocator::is_lost`].
	///
	/// [`AllocationRules::NON_VOLATILE`]: render_core::descriptor::AllocationRules::NON_VOLATILE
	pub fn device_reset(&self) {
		profiling::function_scope!();
		let generation = self.device_generation.fetch_add(1, AcqRel) + 1;
		let discarded = self.batches.lock().discard_volatile();
		let lost = self.pool.drain_matching(|key| !key.allocation_rules.is_non_volatile());
		let destroyed = lost.len();
		self.destroy(lost);
		UploadCounters::inc(&self.counters.device_resets, 1);
		log::debug!(
			"Device reset to generation {generation}: destroyed {destroyed} pooled resources, discarded {discarded} batch pages"
		);
	}

	#[inline]
	pub fn device_generation(&self) -> u32 {
		self.device_generation.load(Acquire)
	}

	/// Reads back the contents of `locator` starting at its offset into `out`. Requires CPU read access or a staging
	/// resource.
	pub fn read_back(&self, locator: &ResourceLocator<P>, out: &mut [u8]) -> Result<(), UploadError<P>> {
		profiling::function_scope!();
		let desc = locator.desc();
		if !(desc.cpu_access.is_readable() || desc.allocation_rules.is_staging()) {
			return Err(UploadError::NotReadable { name: desc.name });
		}
		self.check_access(locator, out.len())?;

		let allocation = locator.allocation();
		if allocation.read_shadow(locator.offset(), out) {
			return Ok(());
		}
		self.platform
			.read(allocation.resource(), locator.offset(), out)
			.map_err(UploadError::Platform)
	}

	/// Overwrites the contents of `locator` starting at its offset with `init`. Requires CPU write access or a staging
	/// resource.
	pub fn update(&self, locator: &ResourceLocator<P>, init: &SubResourceInitData) -> Result<(), UploadError<P>> {
		profiling::function_scope!();
		let desc = locator.desc();
		if !(desc.cpu_access.is_writable() || desc.allocation_rules.is_staging()) {
			return Err(UploadError::NotWritable { name: desc.name });
		}
		self.check_access(locator, init.size())?;

		let allocation = locator.allocation();
		if allocation.write_shadow(locator.offset(), init.data) {
			return Ok(());
		}
		self.platform
			.write(allocation.resource(), locator.offset(), init)
			.map_err(UploadError::Platform)
	}

	fn check_access(&self, locator: &ResourceLocator<P>, len: usize) -> Result<(), UploadError<P>> {
		if locator.is_lost() {
			return Err(UploadError::Lost {
				name: locator.desc().name,
			});
		}
		Self::check_range(locator.desc(), len, locator.size())
	}

	pub fn statistics(&self) -> UploadStatistics {
		self.counters.snapshot()
	}

	/// The amount of released resources waiting in the pool to be reused
	pub fn pooled_count(&self) -> usize {
		self.pool.len()
	}

	/// The amount of batch pages waiting for the next flush
	pub fn pending_batch_pages(&self) -> usize {
		self.batches.lock().len()
	}
}

impl<P: UploadPlatform> Drop for BufferUploads<P> {
	fn drop(&mut self) {
		let mut resources: Vec<_> = AB::VALUES
			.into_iter()
			.flat_map(|ab| self.drain_queue(ab))
			.map(|released| released.resource)
			.collect();
		resources.extend(self.pool.drain_all());
		log::trace!("Destroying {} resources on shutdown", resources.len());
		self.destroy(resources);
	}
}

/// A frame in flight, see [`BufferUploads::frame`]. Ends the frame on drop.
#[must_use]
pub struct UploadFrame<P: UploadPlatform> {
	uploads: Arc<BufferUploads<P>>,
	frame_ab: AB,
}

impl<P: UploadPlatform> Drop for UploadFrame<P> {
	fn drop(&mut self) {
		self.uploads.frame_end(self.frame_ab);
	}
}
