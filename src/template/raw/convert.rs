use serde::Serialize;

use super::{Conversion, Placeholder};
use crate::error;
use crate::value::{explicit_exponent_sign, number_text, Value};

/// The maximum indentation of JSON dumps.
const MAX_JSON_INDENT: usize = 10;

/// A converted argument, before padding.
#[derive(Debug, PartialEq)]
pub(super) enum Converted {
	/// Plain text, padded as it is.
	Text(String),

	/// A number that gets an explicit sign when negative or when the placeholder forces it.
	Number {
		body: String,
		positive: bool,
	},

	/// A JSON dump, which is never padded.
	Json(String),
}

/// A numeric argument.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
	Int(i64),
	Float(f64),
}

impl Number {
	/// Interpret a value as a number.
	///
	/// Booleans count as `0` and `1`, and text is parsed after trimming whitespace.
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Int(x) => Some(Self::Int(*x)),
			Value::Float(x) => Some(Self::Float(*x)),
			Value::Bool(x) => Some(Self::Int(i64::from(*x))),
			Value::Text(x) => Self::parse(x.trim()),
			Value::Null | Value::List(_) | Value::Map(_) | Value::Callable(_) => None,
		}
	}

	/// Interpret a value as a number for an integer conversion.
	///
	/// Text must still be a valid number, but only its leading integer digits are used,
	/// so `"1e3"` counts as `1` and `".5"` as NaN.
	fn integer_from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Text(x) => {
				let text = x.trim();
				Self::parse(text)?;
				Some(Self::leading_integer(text))
			},
			other => Self::from_value(other),
		}
	}

	/// Read the optional sign and decimal digits at the start of a valid number.
	fn leading_integer(text: &str) -> Self {
		let sign_len = usize::from(text.starts_with(['+', '-']));
		let digits = text[sign_len..]
			.find(|c: char| !c.is_ascii_digit())
			.unwrap_or(text.len() - sign_len);
		if digits == 0 {
			return Self::Float(f64::NAN);
		}
		let literal = &text[..sign_len + digits];
		match literal.parse::<i64>() {
			Ok(x) => Self::Int(x),
			Err(_) => Self::Float(literal.parse().unwrap_or(f64::NAN)),
		}
	}

	/// Parse a number from text.
	fn parse(text: &str) -> Option<Self> {
		if let Ok(x) = text.parse::<i64>() {
			return Some(Self::Int(x));
		}
		let x = text.parse::<f64>().ok()?;
		// Only accept the spelled out infinity, not `inf` or `nan`.
		if x.is_finite() || text.trim_start_matches(['+', '-']) == "Infinity" {
			Some(Self::Float(x))
		} else {
			None
		}
	}

	fn as_f64(self) -> f64 {
		match self {
			Self::Int(x) => x as f64,
			Self::Float(x) => x,
		}
	}

	/// Truncate the number towards zero.
	///
	/// Returns `None` for NaN and infinity.
	fn truncate(self) -> Option<i64> {
		match self {
			Self::Int(x) => Some(x),
			Self::Float(x) if x.is_finite() => Some(x.trunc() as i64),
			Self::Float(_) => None,
		}
	}

	fn is_positive(self) -> bool {
		match self {
			Self::Int(x) => x >= 0,
			Self::Float(x) => x >= 0.0,
		}
	}

	/// Format the number as shortest text.
	fn text(self) -> String {
		match self {
			Self::Int(x) => x.to_string(),
			Self::Float(x) => number_text(x),
		}
	}
}

impl Placeholder {
	/// Convert a resolved argument to text according to the conversion of the placeholder.
	pub(super) fn convert(&self, value: &Value) -> Result<Converted, error::TypeCoercion> {
		if self.conversion.is_numeric() {
			let number = if self.conversion.is_integer() {
				Number::integer_from_value(value)
			} else {
				Number::from_value(value)
			};
			let number = number.ok_or_else(|| error::TypeCoercion {
				placeholder: self.range.clone(),
				conversion: self.conversion.as_char(),
				found: value.type_name(),
			})?;
			Ok(self.convert_number(number))
		} else {
			Ok(self.convert_other(value))
		}
	}

	fn convert_number(&self, number: Number) -> Converted {
		let signed = |body: String| Converted::Number {
			body,
			positive: number.is_positive(),
		};
		match self.conversion {
			Conversion::Decimal => signed(integer_text(number, 10)),
			Conversion::Exponential => signed(exponential_text(number.as_f64(), self.precision)),
			Conversion::Float => signed(match self.precision {
				Some(precision) => fixed_text(number.as_f64(), precision),
				None => number.text(),
			}),
			Conversion::General => signed(match self.precision {
				Some(precision) => precision_text(number.as_f64(), precision),
				None => number.text(),
			}),
			Conversion::Binary => Converted::Text(integer_text(number, 2)),
			Conversion::Octal => Converted::Text(integer_text(number, 8)),
			Conversion::HexLower => Converted::Text(integer_text(number, 16)),
			Conversion::HexUpper => Converted::Text(integer_text(number, 16).to_ascii_uppercase()),
			Conversion::Unsigned => Converted::Text(number.truncate().map_or(0, |x| x as u32).to_string()),
			Conversion::Char => {
				let c = number
					.truncate()
					.and_then(|x| u32::try_from(x).ok())
					.and_then(char::from_u32)
					.unwrap_or(char::REPLACEMENT_CHARACTER);
				Converted::Text(c.into())
			},
			Conversion::Json | Conversion::String | Conversion::Bool | Conversion::TypeName | Conversion::Primitive => {
				unreachable!("conversion {:?} is not numeric", self.conversion)
			},
		}
	}

	fn convert_other(&self, value: &Value) -> Converted {
		let text = match self.conversion {
			Conversion::Json => return Converted::Json(json_text(value, self.precision.or(self.width))),
			Conversion::String => value.to_string(),
			Conversion::Bool => value.is_truthy().to_string(),
			Conversion::TypeName => value.type_name().to_owned(),
			Conversion::Primitive => value.to_string(),
			_ => unreachable!("conversion {:?} is numeric", self.conversion),
		};
		match self.precision {
			Some(max_len) => Converted::Text(text.chars().take(max_len).collect()),
			None => Converted::Text(text),
		}
	}
}

/// Format the truncated integer value of a number in the given radix.
///
/// Negative numbers get a leading minus sign.
/// NaN and infinity can not be truncated and render as `NaN`.
fn integer_text(number: Number, radix: u32) -> String {
	let Some(value) = number.truncate() else {
		return "NaN".into();
	};
	let sign = if value < 0 { "-" } else { "" };
	let magnitude = value.unsigned_abs();
	match radix {
		2 => format!("{sign}{magnitude:b}"),
		8 => format!("{sign}{magnitude:o}"),
		16 => format!("{sign}{magnitude:x}"),
		_ => format!("{sign}{magnitude}"),
	}
}

/// Format a number in exponential notation, like `1.5e+3`.
fn exponential_text(value: f64, precision: Option<usize>) -> String {
	if !value.is_finite() {
		return number_text(value);
	}
	match precision {
		Some(precision) => explicit_exponent_sign(&format!("{value:.precision$e}")),
		None => explicit_exponent_sign(&format!("{value:e}")),
	}
}

/// Format a number with a fixed number of decimals.
fn fixed_text(value: f64, precision: usize) -> String {
	if !value.is_finite() {
		return number_text(value);
	}
	// Avoid rendering negative zero as `-0.00`.
	let value = if value == 0.0 { 0.0 } else { value };
	format!("{value:.precision$}")
}

/// Format a number with a number of significant digits.
///
/// Uses exponential notation if the exponent is less than -6 or not less than the precision.
fn precision_text(value: f64, precision: usize) -> String {
	if !value.is_finite() {
		return number_text(value);
	}
	let value = if value == 0.0 { 0.0 } else { value };
	let precision = precision.max(1);
	let decimals = precision - 1;
	let exponential = format!("{value:.decimals$e}");
	let exponent: i64 = exponential
		.split_once('e')
		.and_then(|(_, exponent)| exponent.parse().ok())
		.unwrap_or(0);
	if exponent < -6 || exponent >= precision as i64 {
		explicit_exponent_sign(&exponential)
	} else {
		let decimals = (decimals as i64 - exponent).max(0) as usize;
		format!("{value:.decimals$}")
	}
}

/// Dump a value as JSON, pretty printed if an indentation is given.
fn json_text(value: &Value, indent: Option<usize>) -> String {
	let indent = indent.unwrap_or(0).min(MAX_JSON_INDENT);
	let result = if indent == 0 {
		serde_json::to_vec(value)
	} else {
		let indent = " ".repeat(indent);
		let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
		let mut output = Vec::new();
		let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
		value.serialize(&mut serializer).map(|()| output)
	};
	match result.map(String::from_utf8) {
		Ok(Ok(json)) => json,
		_ => String::from("null"),
	}
}
