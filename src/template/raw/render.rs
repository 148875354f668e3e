use std::borrow::Cow;

use super::convert::Converted;
use super::{Argument, Node, Pad, PathSegment, Placeholder, Template};
use crate::error::{self, RenderError};
use crate::value::{Properties, Value};

/// The arguments of a single render call.
///
/// Keeps track of the next argument for placeholders without explicit argument.
#[derive(Debug)]
pub struct Arguments<'a> {
	values: &'a [Value],
	cursor: usize,
}

impl<'a> Arguments<'a> {
	/// Create a new argument list, with the cursor at the first argument.
	pub fn new(values: &'a [Value]) -> Self {
		Self { values, cursor: 1 }
	}

	/// Get an argument by index, counting from 1.
	fn get(&self, index: usize, placeholder: &Placeholder) -> Result<&'a Value, error::ArgumentIndex> {
		index
			.checked_sub(1)
			.and_then(|i| self.values.get(i))
			.ok_or_else(|| error::ArgumentIndex {
				placeholder: placeholder.range.clone(),
				index,
				available: self.values.len(),
			})
	}
}

/// Common `render` prototype for templates and placeholders.
pub trait Render {
	/// Render into the output string.
	fn render(&self, output: &mut String, source: &str, args: &mut Arguments<'_>) -> Result<(), RenderError>;
}

impl Render for Template {
	/// Render the template into the output string.
	fn render(&self, output: &mut String, source: &str, args: &mut Arguments<'_>) -> Result<(), RenderError> {
		// Render all nodes one by one.
		for node in &self.nodes {
			match node {
				Node::Literal(x) => output.push_str(&source[x.range.clone()]),
				Node::Percent => output.push('%'),
				Node::Placeholder(x) => x.render(output, source, args)?,
			}
		}
		Ok(())
	}
}

impl Render for Placeholder {
	/// Resolve and convert the argument of the placeholder, and render it into the output string.
	fn render(&self, output: &mut String, _source: &str, args: &mut Arguments<'_>) -> Result<(), RenderError> {
		let mut value = self.resolve(args)?;
		if self.conversion.calls_deferred() && matches!(value.as_ref(), Value::Callable(_)) {
			value = Cow::Owned(value.into_owned().resolve());
		}
		let converted = self.convert(&value)?;
		self.compose(output, converted);
		Ok(())
	}
}

impl Placeholder {
	/// Find the argument for the placeholder.
	fn resolve<'a>(&self, args: &mut Arguments<'a>) -> Result<Cow<'a, Value>, RenderError> {
		match &self.argument {
			Argument::Index(index) => Ok(Cow::Borrowed(args.get(*index, self)?)),
			Argument::Next => {
				let value = args.get(args.cursor, self)?;
				args.cursor += 1;
				Ok(Cow::Borrowed(value))
			},
			Argument::Path(path) => {
				// Each named placeholder starts from the next argument, like an implicit placeholder.
				let root = args.get(args.cursor, self)?;
				args.cursor += 1;
				self.walk(root, path)
			},
		}
	}

	/// Walk a key path starting at the given value.
	fn walk<'a>(&self, root: &'a Value, path: &[PathSegment]) -> Result<Cow<'a, Value>, RenderError> {
		let mut current = Cow::Borrowed(root);
		for segment in path {
			let next = match &current {
				Cow::Borrowed(value) => lookup(*value, segment),
				Cow::Owned(value) => lookup(value, segment).map(|x| Cow::Owned(x.into_owned())),
			};
			current = next.ok_or_else(|| error::MissingProperty {
				placeholder: self.range.clone(),
				property: segment.to_string(),
			})?;
		}
		Ok(current)
	}

	/// Apply sign, padding and justification to a converted value.
	fn compose(&self, output: &mut String, converted: Converted) {
		let (sign, body) = match converted {
			Converted::Json(json) => {
				output.push_str(&json);
				return;
			},
			Converted::Text(body) => ("", body),
			Converted::Number { body, positive } => {
				if !positive || self.force_sign {
					let sign = if positive { "+" } else { "-" };
					let body = match body.strip_prefix(['+', '-']) {
						Some(stripped) => stripped.to_owned(),
						None => body,
					};
					(sign, body)
				} else {
					("", body)
				}
			},
		};

		let pad_char = self.pad.map_or(' ', Pad::character);
		let len = sign.chars().count() + body.chars().count();
		let pad_len = self.width.map_or(0, |width| width.saturating_sub(len));
		let pad: String = std::iter::repeat(pad_char).take(pad_len).collect();

		if self.left_justify {
			output.push_str(sign);
			output.push_str(&body);
			output.push_str(&pad);
		} else if pad_char == '0' {
			output.push_str(sign);
			output.push_str(&pad);
			output.push_str(&body);
		} else {
			output.push_str(&pad);
			output.push_str(sign);
			output.push_str(&body);
		}
	}
}

/// Look up one segment of a key path.
fn lookup<'a>(value: &'a Value, segment: &PathSegment) -> Option<Cow<'a, Value>> {
	match segment {
		PathSegment::Field(name) => value.field(name),
		PathSegment::Index(index) => value.element(*index),
	}
}
