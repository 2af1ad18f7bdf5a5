use crate::descriptor::{
	AllocationRules, BindFlags, CpuAccess, GpuAccess, LinearBufferDesc, ResourceName, TextureDesc,
};
use static_assertions::assert_impl_all;

/// The kind of resource and its kind specific description. Only the payload of the active variant exists.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ResourceKind {
	LinearBuffer(LinearBufferDesc),
	Texture(TextureDesc),
	#[default]
	Unknown,
}

/// Discriminant of [`ResourceKind`] without the payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResourceType {
	LinearBuffer,
	Texture,
	Unknown,
}

impl ResourceKind {
	#[inline]
	pub fn ty(&self) -> ResourceType {
		match self {
			ResourceKind::LinearBuffer(_) => ResourceType::LinearBuffer,
			ResourceKind::Texture(_) => ResourceType::Texture,
			ResourceKind::Unknown => ResourceType::Unknown,
		}
	}
}

impl From<LinearBufferDesc> for ResourceKind {
	fn from(value: LinearBufferDesc) -> Self {
		ResourceKind::LinearBuffer(value)
	}
}

impl From<TextureDesc> for ResourceKind {
	fn from(value: TextureDesc) -> Self {
		ResourceKind::Texture(value)
	}
}

/// Description of a GPU resource, passed to the buffer upload manager to request an allocation.
///
/// It is pure metadata and owns no GPU memory. The allocation manager interprets the flags to pick how the resource
/// is backed: pooled reuse, batched submission, staging only or memory surviving device resets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ResourceDesc {
	pub kind: ResourceKind,
	pub bind_flags: BindFlags,
	pub cpu_access: CpuAccess,
	pub gpu_access: GpuAccess,
	pub allocation_rules: AllocationRules,
	/// Name of the resource, for tracking and debugging purposes
	pub name: ResourceName,
}
assert_impl_all!(ResourceDesc: Send, Sync, Copy);

impl ResourceDesc {
	/// Builds a description with no [`AllocationRules`] set. The variant of [`ResourceDesc::kind`] always matches
	/// the supplied payload. `name` is truncated to fit a [`ResourceName`].
	pub fn new(
		bind_flags: BindFlags,
		cpu_access: CpuAccess,
		gpu_access: GpuAccess,
		kind: impl Into<ResourceKind>,
		name: &str,
	) -> Self {
		Self {
			kind: kind.into(),
			bind_flags,
			cpu_access,
			gpu_access,
			allocation_rules: AllocationRules::empty(),
			name: ResourceName::new(name),
		}
	}

	pub fn texture(
		bind_flags: BindFlags,
		cpu_access: CpuAccess,
		gpu_access: GpuAccess,
		texture: TextureDesc,
		name: &str,
	) -> Self {
		Self::new(bind_flags, cpu_access, gpu_access, texture, name)
	}

	pub fn linear_buffer(
		bind_flags: BindFlags,
		cpu_access: CpuAccess,
		gpu_access: GpuAccess,
		linear_buffer: LinearBufferDesc,
		name: &str,
	) -> Self {
		Self::new(bind_flags, cpu_access, gpu_access, linear_buffer, name)
	}

	#[inline]
	#[must_use]
	pub fn with_allocation_rules(mut self, allocation_rules: AllocationRules) -> Self {
		self.allocation_rules = allocation_rules;
		self
	}

	#[inline]
	#[must_use]
	pub fn with_name(mut self, name: &str) -> Self {
		self.name = ResourceName::new(name);
		self
	}

	#[inline]
	pub fn ty(&self) -> ResourceType {
		self.kind.ty()
	}

	#[inline]
	pub fn as_texture(&self) -> Option<&TextureDesc> {
		match &self.kind {
			ResourceKind::Texture(texture) => Some(texture),
			_ => None,
		}
	}

	#[inline]
	pub fn as_linear_buffer(&self) -> Option<&LinearBufferDesc> {
		match &self.kind {
			ResourceKind::LinearBuffer(buffer) => Some(buffer),
			_ => None,
		}
	}

	/// A copy of this description with the name removed. Two resources with equal compatibility keys may back each
	/// other, which is what pooling relies on.
	#[inline]
	pub fn compatibility_key(&self) -> Self {
		Self {
			name: ResourceName::default(),
			..*self
		}
	}
}
