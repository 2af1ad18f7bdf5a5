use crate::platform::UploadPlatform;
use crate::uploads::allocation::Allocation;
use render_core::descriptor::{LinearBufferDesc, ResourceDesc, ResourceKind};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Weak};

/// The key batched buffers are grouped by: everything but their size and name must match to share a page.
pub(crate) fn batch_key(desc: &ResourceDesc) -> Option<ResourceDesc> {
	match desc.kind {
		ResourceKind::LinearBuffer(buffer) => Some(ResourceDesc {
			kind: ResourceKind::LinearBuffer(LinearBufferDesc::create(0, buffer.structure_byte_size)),
			..desc.compatibility_key()
		}),
		_ => None,
	}
}

/// The description of a page holding buffers of `key`.
pub(crate) fn page_desc(key: &ResourceDesc, page_size: u32) -> ResourceDesc {
	let structure = key.as_linear_buffer().map_or(0, |b| b.structure_byte_size);
	ResourceDesc {
		kind: ResourceKind::LinearBuffer(LinearBufferDesc::create(page_size, structure)),
		..*key
	}
	.with_name("batch page")
}

/// Alignment of a buffer within a page, satisfying both the page alignment and the structure size.
pub(crate) fn batch_alignment(desc: &ResourceDesc, alignment: u32) -> u64 {
	let structure = desc.as_linear_buffer().map_or(0, |b| b.structure_byte_size);
	if structure == 0 {
		alignment as u64
	} else {
		lcm(alignment as u64, structure as u64)
	}
}

/// The page size for `key`, which must be a multiple of the key's structure size.
pub(crate) fn page_size(key: &ResourceDesc, page_size: u32) -> u32 {
	let structure = key.as_linear_buffer().map_or(0, |b| b.structure_byte_size);
	if structure == 0 {
		page_size
	} else {
		page_size - page_size % structure
	}
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
	while b != 0 {
		(a, b) = (b, a % b);
	}
	a
}

fn lcm(a: u64, b: u64) -> u64 {
	a / gcd(a, b) * b
}

#[inline]
fn align_up(value: u64, alignment: u64) -> u64 {
	value.div_ceil(alignment) * alignment
}

struct OpenPage<P: UploadPlatform> {
	page: Weak<Allocation<P>>,
	cursor: u64,
}

/// Batch pages of the current frame which have not yet been written to the platform. Pages are owned by their
/// locators only, a page whose locators were all dropped is released without ever being written.
pub(crate) struct BatchPages<P: UploadPlatform> {
	open: FxHashMap<ResourceDesc, OpenPage<P>>,
	full: Vec<Weak<Allocation<P>>>,
}

impl<P: UploadPlatform> Default for BatchPages<P> {
	fn default() -> Self {
		Self {
			open: FxHashMap::default(),
			full: Vec::new(),
		}
	}
}

impl<P: UploadPlatform> BatchPages<P> {
	/// Reserves `size` bytes in the open page of `key`, opening a new page via `open_page` if it does not fit. Returns
	/// the page and the offset of the reservation.
	pub fn sub_allocate<E>(
		&mut self,
		key: ResourceDesc,
		size: u64,
		alignment: u64,
		open_page: impl FnOnce() -> Result<Arc<Allocation<P>>, E>,
	) -> Result<(Arc<Allocation<P>>, u64), E> {
		if let Some(open) = self.open.get_mut(&key) {
			if let Some(page) = open.page.upgrade() {
				let offset = align_up(open.cursor, alignment);
				if offset + size <= page.byte_size() {
					open.cursor = offset + size;
					return Ok((page, offset));
				}
			}
		}

		let page = open_page()?;
		let replaced = self.open.insert(
			key,
			OpenPage {
				page: Arc::downgrade(&page),
				cursor: size,
			},
		);
		if let Some(full) = replaced {
			if full.page.strong_count() > 0 {
				self.full.push(full.page);
			}
		}
		Ok((page, 0))
	}

	/// Takes all pages that are still referenced and need to be written to the platform.
	pub fn take_pending(&mut self) -> Vec<Arc<Allocation<P>>> {
		let mut pages = std::mem::take(&mut self.full);
		pages.extend(self.open.drain().map(|(_, open)| open.page));
		pages.iter().filter_map(Weak::upgrade).collect()
	}

	/// Requeues pages that failed to be written.
	pub fn requeue(&mut self, pages: impl IntoIterator<Item = Arc<Allocation<P>>>) {
		self.full.extend(pages.into_iter().map(|page| Arc::downgrade(&page)));
	}

	/// Discards all pending pages without writing them, as they would be lost anyway. Returns how many were discarded.
	pub fn discard_volatile(&mut self) -> usize {
		let before = self.len();
		let keep = |page: &Weak<Allocation<P>>| match page.upgrade() {
			Some(page) => {
				let non_volatile = page.desc().allocation_rules.is_non_volatile();
				if !non_volatile {
					page.take_shadow();
				}
				non_volatile
			}
			None => false,
		};
		self.full.retain(keep);
		self.open.retain(|_, open| keep(&open.page));
		before - self.len()
	}

	/// Number of pending pages still referenced by a locator.
	pub fn len(&self) -> usize {
		let alive = |page: &&Weak<Allocation<P>>| page.strong_count() > 0;
		self.full.iter().filter(alive).count() + self.open.values().map(|open| &open.page).filter(alive).count()
	}
}
