//! Dynamically typed values used as format arguments.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use indexmap::IndexMap;

mod properties;
pub use properties::*;

/// A format argument.
///
/// Placeholders select values from the argument list, optionally walking into
/// maps and lists with a key path, and then convert them to text according to
/// their conversion character.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// The absence of a value.
	#[default]
	Null,

	/// A boolean.
	Bool(bool),

	/// An integer.
	Int(i64),

	/// A floating point number.
	Float(f64),

	/// A string.
	Text(String),

	/// An ordered list of values.
	List(Vec<Value>),

	/// A map of named values, in insertion order.
	Map(IndexMap<String, Value>),

	/// A deferred value, computed when a placeholder uses it.
	Callable(Callable),
}

impl Value {
	/// Create a deferred value from a function.
	///
	/// The function is called once for every placeholder that renders it,
	/// except for the `%T` and `%v` conversions.
	pub fn callable<F>(func: F) -> Self
	where
		F: Fn() -> Value + Send + Sync + 'static,
	{
		Self::Callable(Callable::new(func))
	}

	/// Get the name of the type of the value, as rendered by `%T`.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Int(_) => "number",
			Self::Float(_) => "number",
			Self::Text(_) => "string",
			Self::List(_) => "array",
			Self::Map(_) => "object",
			Self::Callable(_) => "function",
		}
	}

	/// Check if the value counts as `true`, as rendered by `%t`.
	///
	/// Null, `false`, zero, NaN and empty strings are false.
	/// Everything else is true, including empty lists and maps.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(x) => *x,
			Self::Int(x) => *x != 0,
			Self::Float(x) => *x != 0.0 && !x.is_nan(),
			Self::Text(x) => !x.is_empty(),
			Self::List(_) => true,
			Self::Map(_) => true,
			Self::Callable(_) => true,
		}
	}

	/// Resolve a deferred value by calling it.
	///
	/// Other values are returned as they are.
	pub fn resolve(self) -> Self {
		match self {
			Self::Callable(func) => func.call(),
			other => other,
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(x) => write!(f, "{x}"),
			Self::Int(x) => write!(f, "{x}"),
			Self::Float(x) => f.write_str(&number_text(*x)),
			Self::Text(x) => f.write_str(x),
			Self::List(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					if *item != Self::Null {
						item.fmt(f)?;
					}
				}
				Ok(())
			},
			Self::Map(_) => match serde_json::to_string(self) {
				Ok(json) => f.write_str(&json),
				Err(_) => Err(std::fmt::Error),
			},
			Self::Callable(_) => f.write_str("function"),
		}
	}
}

impl serde::Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		use serde::ser::{SerializeMap, SerializeSeq};

		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(x) => serializer.serialize_bool(*x),
			Self::Int(x) => serializer.serialize_i64(*x),
			Self::Float(x) => match exact_integer(*x) {
				Some(x) => serializer.serialize_i64(x),
				None => serializer.serialize_f64(*x),
			},
			Self::Text(x) => serializer.serialize_str(x),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			},
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			},
			Self::Callable(func) => func.call().serialize(serializer),
		}
	}
}

/// A function that produces a [`Value`] on demand.
#[derive(Clone)]
pub struct Callable {
	func: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl Callable {
	/// Wrap a function.
	pub fn new<F>(func: F) -> Self
	where
		F: Fn() -> Value + Send + Sync + 'static,
	{
		Self { func: Arc::new(func) }
	}

	/// Call the function to produce the value.
	#[inline]
	pub fn call(&self) -> Value {
		(self.func)()
	}
}

impl std::fmt::Debug for Callable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callable").finish_non_exhaustive()
	}
}

/// Two callables are equal if they share the same function.
impl PartialEq for Callable {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.func, &other.func)
	}
}

/// Format a float as the shortest text that reads back as the same number.
///
/// Integral values have no fractional part, negative zero is `0`,
/// and very large or very small magnitudes use exponential notation (`1e+21`).
pub(crate) fn number_text(value: f64) -> String {
	if value.is_nan() {
		return "NaN".into();
	}
	if value.is_infinite() {
		return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
	}
	if value == 0.0 {
		return "0".into();
	}
	let magnitude = value.abs();
	if magnitude >= 1e21 || magnitude < 1e-6 {
		explicit_exponent_sign(&format!("{value:e}"))
	} else {
		format!("{value}")
	}
}

/// Turn Rust exponential notation (`1.5e3`) into notation with an explicit exponent sign (`1.5e+3`).
pub(crate) fn explicit_exponent_sign(text: &str) -> String {
	match text.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
		_ => text.to_owned(),
	}
}

/// Get a float as integer if it has no fractional part and fits in the exactly representable range.
fn exact_integer(value: f64) -> Option<i64> {
	const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
	if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
		Some(value as i64)
	} else {
		None
	}
}

impl From<bool> for Value {
	#[inline]
	fn from(other: bool) -> Self {
		Self::Bool(other)
	}
}

macro_rules! impl_from_int {
	($($int:ty),*) => {
		$(
			impl From<$int> for Value {
				#[inline]
				fn from(other: $int) -> Self {
					Self::Int(other.into())
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
	#[inline]
	fn from(other: u64) -> Self {
		match i64::try_from(other) {
			Ok(x) => Self::Int(x),
			Err(_) => Self::Float(other as f64),
		}
	}
}

impl From<usize> for Value {
	#[inline]
	fn from(other: usize) -> Self {
		Self::from(other as u64)
	}
}

impl From<isize> for Value {
	#[inline]
	fn from(other: isize) -> Self {
		Self::Int(other as i64)
	}
}

impl From<f32> for Value {
	#[inline]
	fn from(other: f32) -> Self {
		Self::Float(other.into())
	}
}

impl From<f64> for Value {
	#[inline]
	fn from(other: f64) -> Self {
		Self::Float(other)
	}
}

impl From<char> for Value {
	#[inline]
	fn from(other: char) -> Self {
		Self::Text(other.into())
	}
}

impl From<&str> for Value {
	#[inline]
	fn from(other: &str) -> Self {
		Self::Text(other.into())
	}
}

impl From<String> for Value {
	#[inline]
	fn from(other: String) -> Self {
		Self::Text(other)
	}
}

impl From<&String> for Value {
	#[inline]
	fn from(other: &String) -> Self {
		Self::Text(other.clone())
	}
}

impl From<Callable> for Value {
	#[inline]
	fn from(other: Callable) -> Self {
		Self::Callable(other)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	#[inline]
	fn from(other: Option<T>) -> Self {
		match other {
			Some(x) => x.into(),
			None => Self::Null,
		}
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(other: Vec<T>) -> Self {
		Self::List(other.into_iter().map(Into::into).collect())
	}
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
	fn from(other: &[T]) -> Self {
		Self::List(other.iter().cloned().map(Into::into).collect())
	}
}

impl<K: Into<String>, V: Into<Value>, S> From<IndexMap<K, V, S>> for Value {
	fn from(other: IndexMap<K, V, S>) -> Self {
		Self::Map(other.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
	fn from(other: BTreeMap<K, V>) -> Self {
		Self::Map(other.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl<K: Into<String>, V: Into<Value>, S: BuildHasher> From<HashMap<K, V, S>> for Value {
	fn from(other: HashMap<K, V, S>) -> Self {
		Self::Map(other.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl<V: Into<Value>> FromIterator<V> for Value {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		Self::List(iter.into_iter().map(Into::into).collect())
	}
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
	fn from(other: [(K, V); N]) -> Self {
		Self::Map(other.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl From<serde_json::Value> for Value {
	fn from(other: serde_json::Value) -> Self {
		match other {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(x) => Self::Bool(x),
			serde_json::Value::Number(x) => {
				if let Some(x) = x.as_i64() {
					Self::Int(x)
				} else {
					Self::Float(x.as_f64().unwrap_or(f64::NAN))
				}
			},
			serde_json::Value::String(x) => Self::Text(x),
			serde_json::Value::Array(x) => x.into(),
			serde_json::Value::Object(x) => Self::Map(x.into_iter().map(|(k, v)| (k, v.into())).collect()),
		}
	}
}
