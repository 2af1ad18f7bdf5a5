use arrayvec::ArrayString;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

/// Maximum length of a [`ResourceName`] in bytes, excluding the terminator.
pub const RESOURCE_NAME_CAPACITY: usize = 47;

/// Inline, fixed capacity name of a resource, used for diagnostics and profiling only.
///
/// Names longer than [`RESOURCE_NAME_CAPACITY`] bytes are silently truncated to the longest prefix that fits and ends
/// on a character boundary.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ResourceName(ArrayString<RESOURCE_NAME_CAPACITY>);

impl ResourceName {
	pub fn new(name: &str) -> Self {
		let mut end = name.len().min(RESOURCE_NAME_CAPACITY);
		while !name.is_char_boundary(end) {
			end -= 1;
		}
		let mut inner = ArrayString::new();
		inner.push_str(&name[..end]);
		Self(inner)
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		self.0.as_str()
	}

	/// The name as a zero terminated byte string, padded with zeros. The last byte is always zero.
	pub fn to_nul_terminated(&self) -> [u8; RESOURCE_NAME_CAPACITY + 1] {
		let mut out = [0; RESOURCE_NAME_CAPACITY + 1];
		let bytes = self.0.as_bytes();
		out[..bytes.len()].copy_from_slice(bytes);
		out
	}
}

impl Deref for ResourceName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		self.as_str()
	}
}

impl From<&str> for ResourceName {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl PartialEq<str> for ResourceName {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for ResourceName {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

impl Debug for ResourceName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Debug::fmt(self.as_str(), f)
	}
}

impl Display for ResourceName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self.as_str(), f)
	}
}
