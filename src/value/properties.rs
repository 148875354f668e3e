use std::borrow::Cow;

use indexmap::IndexMap;

use super::Value;

/// Trait for values that expose named fields or indexed elements to key paths.
///
/// A named placeholder like `%(user.tags[0])s` starts from an argument
/// and calls [`field()`][Self::field] or [`element()`][Self::element] for each segment of the path.
pub trait Properties {
	/// Get a named field.
	fn field(&self, name: &str) -> Option<Cow<'_, Value>>;

	/// Get an element by index.
	fn element(&self, index: usize) -> Option<Cow<'_, Value>>;
}

impl Properties for Value {
	fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
		match self {
			Self::Map(map) => map.field(name),
			Self::List(list) => list.as_slice().field(name),
			Self::Text(text) => text.as_str().field(name),
			_ => None,
		}
	}

	fn element(&self, index: usize) -> Option<Cow<'_, Value>> {
		match self {
			Self::Map(map) => map.element(index),
			Self::List(list) => list.as_slice().element(index),
			Self::Text(text) => text.as_str().element(index),
			_ => None,
		}
	}
}

/// Maps expose their entries as fields.
///
/// Indexing a map looks up the decimal representation of the index as key.
impl<S: std::hash::BuildHasher> Properties for IndexMap<String, Value, S> {
	#[inline]
	fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
		self.get(name).map(Cow::Borrowed)
	}

	#[inline]
	fn element(&self, index: usize) -> Option<Cow<'_, Value>> {
		self.get(index.to_string().as_str()).map(Cow::Borrowed)
	}
}

/// Lists expose their elements by index, and their length as `length` field.
impl Properties for [Value] {
	fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
		match name {
			"length" => Some(Cow::Owned(self.len().into())),
			_ => None,
		}
	}

	#[inline]
	fn element(&self, index: usize) -> Option<Cow<'_, Value>> {
		self.get(index).map(Cow::Borrowed)
	}
}

/// Strings expose their characters by index, and their length in characters as `length` field.
impl Properties for str {
	fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
		match name {
			"length" => Some(Cow::Owned(self.chars().count().into())),
			_ => None,
		}
	}

	fn element(&self, index: usize) -> Option<Cow<'_, Value>> {
		self.chars().nth(index).map(|c| Cow::Owned(c.into()))
	}
}
