use parking_lot::Mutex;
use render_core::descriptor::ResourceDesc;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug)]
pub struct PooledResource<R> {
	pub resource: R,
	pub byte_size: u64,
}

/// Free lists of released resources, keyed by [`ResourceDesc::compatibility_key`]. A resource taken from the pool can
/// back any description with the same key.
#[derive(Debug)]
pub struct ResourcePool<R> {
	free: Mutex<FxHashMap<ResourceDesc, SmallVec<[PooledResource<R>; 4]>>>,
	max_per_key: usize,
}

impl<R> ResourcePool<R> {
	pub fn new(max_per_key: usize) -> Self {
		Self {
			free: Mutex::new(FxHashMap::default()),
			max_per_key,
		}
	}

	/// Takes the most recently released resource compatible with `desc`.
	pub fn take(&self, desc: &ResourceDesc) -> Option<PooledResource<R>> {
		let key = desc.compatibility_key();
		let mut free = self.free.lock();
		let list = free.get_mut(&key)?;
		let pooled = list.pop();
		if list.is_empty() {
			free.remove(&key);
		}
		pooled
	}

	/// Returns a resource to the pool. Hands it back if the free list of its key is already full.
	pub fn put(&self, desc: &ResourceDesc, pooled: PooledResource<R>) -> Result<(), PooledResource<R>> {
		let mut free = self.free.lock();
		let list = free.entry(desc.compatibility_key()).or_default();
		if list.len() < self.max_per_key {
			list.push(pooled);
			Ok(())
		} else {
			Err(pooled)
		}
	}

	/// Removes all resources whose key matches `filter`.
	pub fn drain_matching(&self, mut filter: impl FnMut(&ResourceDesc) -> bool) -> Vec<R> {
		let mut free = self.free.lock();
		let mut out = Vec::new();
		free.retain(|key, list| {
			if filter(key) {
				out.extend(list.drain(..).map(|p| p.resource));
				false
			} else {
				true
			}
		});
		out
	}

	pub fn drain_all(&self) -> Vec<R> {
		self.drain_matching(|_| true)
	}

	/// The total number of pooled resources over all keys
	pub fn len(&self) -> usize {
		self.free.lock().values().map(|list| list.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
