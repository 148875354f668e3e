//! Support for using YAML data as format arguments.

use crate::Value;

/// Parse a YAML document into a format argument.
pub fn from_slice(data: &[u8]) -> Result<Value, Error> {
	let value: serde_yaml::Value = serde_yaml::from_slice(data)?;
	Ok(value.into())
}

/// Parse a YAML document into a format argument.
pub fn from_str(data: &str) -> Result<Value, Error> {
	let value: serde_yaml::Value = serde_yaml::from_str(data)?;
	Ok(value.into())
}

/// Error for parsing YAML data into a format argument.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while parsing YAML.
	Yaml(serde_yaml::Error),
}

impl From<serde_yaml::Error> for Error {
	#[inline]
	fn from(other: serde_yaml::Error) -> Self {
		Self::Yaml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::Yaml(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Tags are dropped, and mapping keys that are not strings are converted to text.
impl From<serde_yaml::Value> for Value {
	fn from(other: serde_yaml::Value) -> Self {
		match other {
			serde_yaml::Value::Null => Self::Null,
			serde_yaml::Value::Bool(x) => Self::Bool(x),
			serde_yaml::Value::Number(x) => {
				if let Some(x) = x.as_i64() {
					Self::Int(x)
				} else if let Some(x) = x.as_u64() {
					x.into()
				} else {
					Self::Float(x.as_f64().unwrap_or(f64::NAN))
				}
			},
			serde_yaml::Value::String(x) => Self::Text(x),
			serde_yaml::Value::Sequence(seq) => seq.into(),
			serde_yaml::Value::Mapping(map) => Self::Map(
				map.into_iter()
					.map(|(k, v)| (mapping_key(k), v.into()))
					.collect()
			),
			serde_yaml::Value::Tagged(tagged) => tagged.value.into(),
		}
	}
}

fn mapping_key(key: serde_yaml::Value) -> String {
	match key {
		serde_yaml::Value::String(x) => x,
		other => Value::from(other).to_string(),
	}
}
