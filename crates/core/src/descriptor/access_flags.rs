bitflags::bitflags! {
	/// Bind flags declare the pipeline stages a resource may be attached to. Most resources have a single bind flag,
	/// but input and output bindings may be combined, like `RENDER_TARGET | SHADER_RESOURCE` for a texture that is
	/// rendered to and later sampled.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct BindFlags: u32 {
		/// Can be bound as a vertex buffer
		const VERTEX_BUFFER = 1 << 0;
		/// Can be bound as an index buffer
		const INDEX_BUFFER = 1 << 1;
		/// Can be read by shaders through a shader resource view
		const SHADER_RESOURCE = 1 << 2;
		/// Can be bound as a color render target
		const RENDER_TARGET = 1 << 3;
		/// Can be bound as a depth/stencil target
		const DEPTH_STENCIL = 1 << 4;
		/// Can be read and written by shaders through an unordered access view
		const UNORDERED_ACCESS = 1 << 5;
		/// Can be bound as a structured buffer
		const STRUCTURED_BUFFER = 1 << 6;
		/// Can be bound as a constant buffer
		const CONSTANT_BUFFER = 1 << 7;
		/// Can be the target of stream output from the geometry stage
		const STREAM_OUTPUT = 1 << 8;
		/// Can be the source of indirect draw arguments
		const DRAW_INDIRECT_ARGS = 1 << 9;
		/// Allows raw (byte addressed) views to be created
		const RAW_VIEWS = 1 << 10;
	}
}

impl BindFlags {
	/// Bindings through which the GPU writes into the resource.
	pub const OUTPUTS: Self = Self::RENDER_TARGET
		.union(Self::DEPTH_STENCIL)
		.union(Self::UNORDERED_ACCESS)
		.union(Self::STREAM_OUTPUT);

	#[inline]
	pub fn is_pipeline_output(&self) -> bool {
		self.intersects(Self::OUTPUTS)
	}
}

bitflags::bitflags! {
	/// The access the CPU has to a resource, which decides the memory it lives in and how uploads are performed. Use
	/// as few flags as possible, most resources should be fine without any.
	///
	/// Prefer [`CpuAccess::WRITE`] for resources updated at most once per frame. [`CpuAccess::WRITE_DYNAMIC`] is meant
	/// for resources that are locked multiple times within a single frame.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct CpuAccess: u32 {
		/// The CPU may read the resource back
		const READ = 1 << 0;
		/// The CPU may write the resource, at most once per frame
		const WRITE = 1 << 1;
		/// The CPU may write the resource many times per frame. Implies [`CpuAccess::WRITE`].
		const WRITE_DYNAMIC = (1 << 2) | Self::WRITE.bits();
	}
}

impl CpuAccess {
	#[inline]
	pub fn is_readable(&self) -> bool {
		self.contains(Self::READ)
	}

	#[inline]
	pub fn is_writable(&self) -> bool {
		self.contains(Self::WRITE)
	}

	#[inline]
	pub fn is_dynamic(&self) -> bool {
		self.contains(Self::WRITE_DYNAMIC)
	}

	#[inline]
	pub fn is_mappable(&self) -> bool {
		self.intersects(Self::READ | Self::WRITE)
	}
}

bitflags::bitflags! {
	/// The access the GPU has to a resource.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct GpuAccess: u32 {
		/// Shaders or fixed function stages may read the resource
		const READ = 1 << 0;
		/// Shaders or fixed function stages may write the resource
		const WRITE = 1 << 1;
	}
}

impl GpuAccess {
	#[inline]
	pub fn is_readable(&self) -> bool {
		self.contains(Self::READ)
	}

	#[inline]
	pub fn is_writable(&self) -> bool {
		self.contains(Self::WRITE)
	}
}

bitflags::bitflags! {
	/// Hints for the buffer upload manager on how to allocate and schedule a resource.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct AllocationRules: u32 {
		/// Reuse a compatible resource that was recently released instead of allocating a new one
		const POOLED = 1 << 0;
		/// Coalesce similar uploads, so they become a single low level operation per frame
		const BATCHED = 1 << 1;
		/// CPU visible staging memory only, never sent to the GPU
		const STAGING = 1 << 2;
		/// The resource must survive device loss and resets
		const NON_VOLATILE = 1 << 3;
	}
}

impl AllocationRules {
	#[inline]
	pub fn is_pooled(&self) -> bool {
		self.contains(Self::POOLED)
	}

	#[inline]
	pub fn is_batched(&self) -> bool {
		self.contains(Self::BATCHED)
	}

	#[inline]
	pub fn is_staging(&self) -> bool {
		self.contains(Self::STAGING)
	}

	#[inline]
	pub fn is_non_volatile(&self) -> bool {
		self.contains(Self::NON_VOLATILE)
	}
}
