//! Support for using TOML data as format arguments.

use crate::Value;

/// Parse a TOML document into a format argument.
///
/// The document is parsed as a table, so the result is always a [`Value::Map`].
pub fn from_slice(data: &[u8]) -> Result<Value, Error> {
	from_str(std::str::from_utf8(data)?)
}

/// Parse a TOML document into a format argument.
///
/// The document is parsed as a table, so the result is always a [`Value::Map`].
pub fn from_str(data: &str) -> Result<Value, Error> {
	let table: toml::Table = toml::from_str(data)?;
	Ok(toml::Value::Table(table).into())
}

/// Error for parsing TOML data into a format argument.
#[derive(Debug)]
pub enum Error {
	/// The input contains invalid UTF-8.
	InvalidUtf8(std::str::Utf8Error),

	/// An error occurred while parsing TOML.
	Toml(toml::de::Error),
}

impl From<std::str::Utf8Error> for Error {
	#[inline]
	fn from(other: std::str::Utf8Error) -> Self {
		Self::InvalidUtf8(other)
	}
}

impl From<toml::de::Error> for Error {
	#[inline]
	fn from(other: toml::de::Error) -> Self {
		Self::Toml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidUtf8(e) => std::fmt::Display::fmt(e, f),
			Self::Toml(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Date and time values are converted to their TOML text representation.
impl From<toml::Value> for Value {
	fn from(other: toml::Value) -> Self {
		match other {
			toml::Value::Boolean(x) => Self::Bool(x),
			toml::Value::Integer(x) => Self::Int(x),
			toml::Value::Float(x) => Self::Float(x),
			toml::Value::String(x) => Self::Text(x),
			toml::Value::Datetime(x) => Self::Text(x.to_string()),
			toml::Value::Array(seq) => seq.into(),
			toml::Value::Table(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
		}
	}
}
