//! printf-style string formatting with positional and named arguments.
//!
//! # Features
//!
//! * Positional placeholders: `"%s is %d years old"`
//! * Explicit argument indices: `"%2$s %1$s"`
//! * Named placeholders with key paths into maps and lists: `"%(user.tags[0])s"`
//! * Flags for sign, padding, justification, width and precision: `"%+'*-10.2f"`
//! * Numeric conversions in several bases, JSON dumps, type names and truthiness.
//! * Deferred values that are computed only when a placeholder renders them.
//! * A [`Formatter`] that parses each distinct template only once, and can be shared between threads.
//! * Use TOML or YAML documents as arguments (optional, requires the `toml` or `yaml` feature).
//!
//! # Placeholders
//!
//! Placeholders have the form `%[argument][+][pad][-][width][.precision]conversion`.
//! The conversion is one of:
//!
//! * `b`, `o`, `x`, `X`: an integer in base 2, 8 or 16.
//! * `c`: the character with the integer as code point.
//! * `d`, `i`: a signed decimal integer.
//! * `u`: an integer wrapped to a 32 bit unsigned integer.
//! * `e`: a number in exponential notation, with `precision` decimals.
//! * `f`: a number with `precision` decimals.
//! * `g`: a number with `precision` significant digits.
//! * `j`: a JSON dump of the argument, indented by `precision` (or `width`) spaces.
//! * `s`: the argument as text, truncated to `precision` characters.
//! * `t`: `true` or `false`, depending on the truthiness of the argument.
//! * `T`: the type name of the argument.
//! * `v`: the argument as text, without calling deferred values.
//!
//! A literal percent sign is written as `%%`.
//!
//! # Examples
//!
//! The [`format()`] function parses and renders a template in one go.
//! It accepts any list of arguments that convert into a [`Value`].
//!
//! ```
//! # fn main() -> Result<(), pformat::Error> {
//! assert_eq!(pformat::format("%5.2f|%-4d|%05d", [3.0, 7.0, -42.0])?, " 3.00|7   |-0042");
//! assert_eq!(pformat::format("%2$s %1$s", ["world", "hello"])?, "hello world");
//! # Ok(())
//! # }
//! ```
//!
//! Arguments of mixed types can be collected with the [`args!`] macro.
//!
//! ```
//! # fn main() -> Result<(), pformat::Error> {
//! use pformat::{args, Value};
//!
//! let user = Value::from([
//!   ("name", Value::from("Ann")),
//!   ("tags", Value::from(vec!["admin", "ops"])),
//! ]);
//! assert_eq!(pformat::format_list("%(name)s is in %(tags.length)d groups", &[user.clone(), user])?, "Ann is in 2 groups");
//! assert_eq!(pformat::format_list("%s has %x%% of %T", &args!["Ann", 255, true])?, "Ann has ff% of boolean");
//! # Ok(())
//! # }
//! ```
//!
//! A [`Formatter`] caches parsed templates, so each distinct template is only parsed once.
//!
//! ```
//! # fn main() -> Result<(), pformat::Error> {
//! let formatter = pformat::Formatter::new();
//! for i in 0..3 {
//!   formatter.render("item %03d", [i])?;
//! }
//! assert_eq!(formatter.cached_templates(), 1);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub use error::Error;

mod value;
pub use value::*;

mod template;
pub use template::*;

mod formatter;
pub use formatter::Formatter;

pub mod date;
pub mod properties;

mod features;
#[allow(unused_imports)]
pub use features::*;

/// Parse a template and render it with the given arguments.
///
/// Each argument can be anything that converts into a [`Value`].
/// For arguments of mixed types, use the [`args!`] macro with [`format_list()`].
///
/// The template is not cached.
/// Use a [`Formatter`] if you render the same template many times.
pub fn format<I, V>(template: &str, args: I) -> Result<String, Error>
where
	I: IntoIterator<Item = V>,
	V: Into<Value>,
{
	Ok(Template::parse(template)?.render(args)?)
}

/// Parse a template and render it with an existing list of arguments.
///
/// The template is not cached.
/// Use a [`Formatter`] if you render the same template many times.
pub fn format_list(template: &str, args: &[Value]) -> Result<String, Error> {
	Ok(Template::parse(template)?.render_list(args)?)
}

/// Create a list of format arguments from values of different types.
///
/// Each argument is converted with [`Value::from()`].
///
/// ```
/// let args = pformat::args!["Ann", 32, 1.5, true, None::<i32>];
/// assert_eq!(args.len(), 5);
/// assert_eq!(args[4], pformat::Value::Null);
/// ```
#[macro_export]
macro_rules! args {
	($($arg:expr),* $(,)?) => {
		::std::vec![$($crate::Value::from($arg)),*]
	};
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::error::{ParseError, RenderError};
	use assert2::{assert, check, let_assert};

	#[test]
	fn test_templates_without_placeholders() {
		for source in ["", "plain text", "ünïcödé ❤", "no percent\nat all"] {
			let_assert!(Ok(rendered) = format_list(source, &[]));
			assert!(rendered == source);
		}
	}

	#[test]
	fn test_escaped_percent() {
		check!(let Ok("%") = format_list("%%", &[]).as_deref());
		check!(let Ok("50% of 8") = format("%d%% of %d", [50, 8]).as_deref());
	}

	#[test]
	fn test_width_precision_and_padding() {
		check!(let Ok(" 3.00") = format("%5.2f", [3]).as_deref());
		check!(let Ok("-0042") = format("%05d", [-42]).as_deref());
	}

	#[test]
	fn test_named_placeholders() {
		let ann = Value::from([("name", "Ann")]);
		check!(let Ok("Ann") = format("%(name)s", [ann.clone()]).as_deref());
		let_assert!(Err(Error::Render(RenderError::MissingProperty(e))) = format("%(missing)s", [ann]));
		assert!(e.property == "missing");
	}

	#[test]
	fn test_named_placeholders_take_the_next_argument() {
		let args = [Value::from([("k", "x")]), Value::from([("k", "y")])];
		check!(let Ok("x y") = format_list("%(k)s %(k)s", &args).as_deref());
		let_assert!(Err(Error::Render(RenderError::ArgumentIndex(e))) = format_list("%(k)s %(k)s", &args[..1]));
		assert!(e.index == 2);
		assert!(e.available == 1);
	}

	#[test]
	fn test_explicit_indices() {
		check!(let Ok("b-a") = format("%1$s-%2$s", ["b", "a"]).as_deref());
		check!(let Ok("a b a") = format("%2$s %s %2$s", ["b", "a"]).as_deref());
	}

	#[test]
	fn test_mixed_placeholders_fail_before_rendering() {
		let_assert!(Err(Error::Parse(ParseError::MixedPlaceholders(e))) = format_list("%(key)s %s", &[]));
		assert!(e.position == 8);
		let_assert!(Err(Error::Parse(ParseError::MixedPlaceholders(_))) = format_list("%2$s %(key)s", &[]));
	}

	#[test]
	fn test_syntax_errors() {
		let_assert!(Err(Error::Parse(ParseError::UnexpectedPlaceholder(e))) = format_list("50% off", &[]));
		assert!(e.position == 2);
		assert!(e.remainder == "% off");
		let_assert!(Err(Error::Parse(ParseError::InvalidKeyPath(e))) = format_list("%(a..b)s", &[]));
		assert!(e.key == "a..b");
	}

	#[test]
	fn test_error_highlighting() {
		let source = "Total: %(price)d EUR";
		let_assert!(Err(e) = format(source, [Value::from([("price", "free")])]));
		assert!(e.to_string() == "Expected a number for %d but found string");
		assert!(e.source_highlighting(source) == concat!(
			"  Total: %(price)d EUR\n",
			"         ^^^^^^^^^\n",
		));
	}

	#[test]
	#[should_panic]
	fn test_error_highlighting_needs_the_original_source() {
		let_assert!(Err(e) = format_list("Total: %(price)d EUR", &[]));
		e.source_highlighting("short");
	}

	#[test]
	fn test_args_macro() {
		let args = args!["x", 1, 2.5, false, 'c', vec![1, 2]];
		assert!(args == [
			Value::Text("x".into()),
			Value::Int(1),
			Value::Float(2.5),
			Value::Bool(false),
			Value::Text("c".into()),
			Value::List(vec![Value::Int(1), Value::Int(2)]),
		]);
		let empty: Vec<Value> = args![];
		assert!(empty.is_empty());
	}

	#[test]
	fn test_deferred_values() {
		use std::sync::atomic::{AtomicUsize, Ordering};
		use std::sync::Arc;

		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let lazy = Value::callable(move || Value::from(counter.fetch_add(1, Ordering::Relaxed) + 10));
		let args = [lazy];
		check!(let Ok("10 11 function function") = format_list("%1$d %1$s %1$T %1$v", &args).as_deref());
		assert!(calls.load(Ordering::Relaxed) == 2);
	}

	#[test]
	fn test_json_dump() {
		let value = Value::from(serde_json::json!({"a": [1, 2], "b": null}));
		check!(let Ok(r#"{"a":[1,2],"b":null}"#) = format("%j", [value.clone()]).as_deref());
		check!(let Ok("{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": null\n}") = format("%.2j", [value]).as_deref());
	}
}
