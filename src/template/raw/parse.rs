use super::{Argument, Conversion, Literal, Node, Pad, PathSegment, Placeholder, Template};
use crate::error::{self, ParseError};

impl Template {
	/// Parse the template from a source string.
	///
	/// Fails if a `%` does not start a valid placeholder,
	/// if a key path is malformed,
	/// or if the template mixes named and positional placeholders.
	pub fn parse(source: &str) -> Result<Self, ParseError> {
		let bytes = source.as_bytes();
		let mut nodes = Vec::with_capacity(1);
		let mut kinds = PlaceholderKinds::default();
		let mut finger = 0;
		while finger < source.len() {
			let next = match memchr::memchr(b'%', &bytes[finger..]) {
				Some(x) => finger + x,
				None => source.len(),
			};

			// If we found a non-empty string up to the first percent sign,
			// then we have a piece of literal text.
			if next != finger {
				nodes.push(Node::Literal(Literal { range: finger..next }));
			}

			// If we hit the end of the string, we're done.
			if next == source.len() {
				break;
			}

			// We found an escaped percent sign.
			if bytes.get(next + 1) == Some(&b'%') {
				nodes.push(Node::Percent);
				finger = next + 2;

			// We found a placeholder.
			} else {
				let placeholder = Placeholder::parse(source, next)?;
				kinds.add(&placeholder)?;
				finger = placeholder.range.end;
				nodes.push(Node::Placeholder(placeholder));
			}
		}

		Ok(Self { nodes })
	}
}

/// Tracks which kinds of placeholders appeared in a template.
#[derive(Default)]
struct PlaceholderKinds {
	named: bool,
	positional: bool,
}

impl PlaceholderKinds {
	/// Register a placeholder, failing if it can not be combined with earlier placeholders.
	fn add(&mut self, placeholder: &Placeholder) -> Result<(), error::MixedPlaceholders> {
		match placeholder.argument {
			Argument::Path(_) => self.named = true,
			Argument::Next | Argument::Index(_) => self.positional = true,
		}
		if self.named && self.positional {
			Err(error::MixedPlaceholders {
				position: placeholder.range.start,
				len: placeholder.range.len(),
			})
		} else {
			Ok(())
		}
	}
}

impl Placeholder {
	/// Parse a placeholder from the source.
	///
	/// The start must be the position of the percent sign in the source.
	fn parse(source: &str, start: usize) -> Result<Self, ParseError> {
		let bytes = source.as_bytes();
		let unexpected = || error::UnexpectedPlaceholder {
			position: start,
			remainder: source[start..].to_owned(),
		};
		let mut finger = start + 1;

		// An explicit argument index (`2$`) or a key path (`(key)`).
		let mut argument = Argument::Next;
		let mut key_range = None;
		if let Some((index, end)) = parse_decimal(bytes, finger).filter(|_| bytes[finger] != b'0') {
			if bytes.get(end) == Some(&b'$') {
				argument = Argument::Index(index);
				finger = end + 1;
			}
		} else if bytes.get(finger) == Some(&b'(') {
			let key_start = finger + 1;
			match memchr::memchr(b')', &bytes[key_start..]) {
				Some(0) | None => (),
				Some(len) => {
					key_range = Some(key_start..key_start + len);
					finger = key_start + len + 1;
				},
			}
		}

		let force_sign = bytes.get(finger) == Some(&b'+');
		if force_sign {
			finger += 1;
		}

		let mut pad = None;
		if bytes.get(finger) == Some(&b'0') {
			pad = Some(Pad::Zero);
			finger += 1;
		} else if bytes.get(finger) == Some(&b'\'') {
			match source[finger + 1..].chars().next() {
				Some(c) if c != '$' => {
					pad = Some(Pad::Char(c));
					finger += 1 + c.len_utf8();
				},
				_ => (),
			}
		}

		let left_justify = bytes.get(finger) == Some(&b'-');
		if left_justify {
			finger += 1;
		}

		let mut width = None;
		if let Some((value, end)) = parse_decimal(bytes, finger) {
			width = Some(value);
			finger = end;
		}

		let mut precision = None;
		if bytes.get(finger) == Some(&b'.') {
			let (value, end) = parse_decimal(bytes, finger + 1).ok_or_else(unexpected)?;
			precision = Some(value);
			finger = end;
		}

		let conversion = bytes
			.get(finger)
			.and_then(|&c| Conversion::from_char(char::from(c)))
			.ok_or_else(unexpected)?;
		finger += 1;

		// The key path is only parsed once the rest of the placeholder turned out to be valid.
		if let Some(key_range) = key_range {
			argument = Argument::Path(parse_key_path(source, key_range)?);
		}

		Ok(Self {
			range: start..finger,
			argument,
			force_sign,
			pad,
			left_justify,
			width,
			precision,
			conversion,
		})
	}
}

/// Parse a key path like `user.tags[0].name` from the source.
///
/// The path must start with a name, followed by any number of `.name` or `[index]` accessors.
/// Names consist of ASCII letters, digits and underscores, and can not start with a digit.
fn parse_key_path(source: &str, range: std::ops::Range<usize>) -> Result<Vec<PathSegment>, error::InvalidKeyPath> {
	let bytes = &source.as_bytes()[..range.end];
	let invalid = || error::InvalidKeyPath {
		position: range.start,
		key: source[range.clone()].to_owned(),
	};

	let mut segments = Vec::with_capacity(1);
	let (name, mut finger) = parse_name(source, bytes, range.start).ok_or_else(invalid)?;
	segments.push(PathSegment::Field(name.to_owned()));
	while finger < range.end {
		match bytes[finger] {
			b'.' => {
				let (name, end) = parse_name(source, bytes, finger + 1).ok_or_else(invalid)?;
				segments.push(PathSegment::Field(name.to_owned()));
				finger = end;
			},
			b'[' => {
				let (index, end) = parse_decimal(bytes, finger + 1).ok_or_else(invalid)?;
				if bytes.get(end) != Some(&b']') {
					return Err(invalid());
				}
				segments.push(PathSegment::Index(index));
				finger = end + 1;
			},
			_ => return Err(invalid()),
		}
	}
	Ok(segments)
}

/// Parse a name at the given position.
///
/// Returns the name and the index of the byte after the name.
fn parse_name<'a>(source: &'a str, bytes: &[u8], start: usize) -> Option<(&'a str, usize)> {
	let first = *bytes.get(start)?;
	if !first.is_ascii_alphabetic() && first != b'_' {
		return None;
	}
	let end = match bytes[start..].iter().position(|&c| !c.is_ascii_alphanumeric() && c != b'_') {
		Some(x) => start + x,
		None => bytes.len(),
	};
	Some((&source[start..end], end))
}

/// Parse a non-empty sequence of decimal digits at the given position.
///
/// Returns the value and the index of the byte after the digits,
/// or `None` if there are no digits or the value does not fit in a `usize`.
fn parse_decimal(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
	let digits = bytes.get(start..)?;
	let len = digits.iter().position(|c| !c.is_ascii_digit()).unwrap_or(digits.len());
	if len == 0 {
		return None;
	}
	let value = digits[..len].iter().try_fold(0usize, |value, &digit| {
		value.checked_mul(10)?.checked_add(usize::from(digit - b'0'))
	})?;
	Some((value, start + len))
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	fn parse_one(source: &str) -> Placeholder {
		let_assert!(Ok(template) = Template::parse(source));
		let placeholders: Vec<_> = template.placeholders().cloned().collect();
		assert!(placeholders.len() == 1);
		placeholders.into_iter().next().unwrap()
	}

	#[test]
	fn test_parse_decimal() {
		check!(parse_decimal(b"123abc", 0) == Some((123, 3)));
		check!(parse_decimal(b"x42", 1) == Some((42, 3)));
		check!(parse_decimal(b"abc", 0) == None);
		check!(parse_decimal(b"1", 1) == None);
		check!(parse_decimal(b"99999999999999999999999999", 0) == None);
	}

	#[test]
	fn test_parse_simple_placeholder() {
		let placeholder = parse_one("Hello %s!");
		check!(placeholder.range == (6..8));
		check!(placeholder.argument == Argument::Next);
		check!(placeholder.conversion == Conversion::String);
		check!(placeholder.pad == None);
		check!(placeholder.width == None);
		check!(placeholder.precision == None);
		check!(!placeholder.force_sign);
		check!(!placeholder.left_justify);
	}

	#[test]
	fn test_parse_all_flags() {
		let placeholder = parse_one("%2$+'*-10.3f");
		check!(placeholder.argument == Argument::Index(2));
		check!(placeholder.force_sign);
		check!(placeholder.pad == Some(Pad::Char('*')));
		check!(placeholder.left_justify);
		check!(placeholder.width == Some(10));
		check!(placeholder.precision == Some(3));
		check!(placeholder.conversion == Conversion::Float);
	}

	#[test]
	fn test_parse_zero_pad() {
		let placeholder = parse_one("%05d");
		check!(placeholder.pad == Some(Pad::Zero));
		check!(placeholder.width == Some(5));

		let placeholder = parse_one("%005d");
		check!(placeholder.pad == Some(Pad::Zero));
		check!(placeholder.width == Some(5));

		let placeholder = parse_one("%'05d");
		check!(placeholder.pad == Some(Pad::Char('0')));
		check!(placeholder.width == Some(5));
	}

	#[test]
	fn test_parse_digits_without_dollar_are_width() {
		let placeholder = parse_one("%12d");
		check!(placeholder.argument == Argument::Next);
		check!(placeholder.width == Some(12));
	}

	#[test]
	fn test_parse_multibyte_pad() {
		let placeholder = parse_one("%'❤8s");
		check!(placeholder.pad == Some(Pad::Char('❤')));
		check!(placeholder.width == Some(8));
		check!(placeholder.range == (0..7));
	}

	#[test]
	fn test_parse_key_path() {
		let placeholder = parse_one("%(user.tags[1].name)s");
		check!(placeholder.argument == Argument::Path(vec![
			PathSegment::Field("user".into()),
			PathSegment::Field("tags".into()),
			PathSegment::Index(1),
			PathSegment::Field("name".into()),
		]));
	}

	#[test]
	fn test_parse_literals_and_percent() {
		let_assert!(Ok(template) = Template::parse("100%% of %d"));
		check!(template.nodes.len() == 4);
		check!(let Node::Literal(Literal { range: std::ops::Range { start: 0, end: 3 } }) = &template.nodes[0]);
		check!(let Node::Percent = &template.nodes[1]);
		check!(let Node::Literal(Literal { range: std::ops::Range { start: 5, end: 9 } }) = &template.nodes[2]);
		check!(let Node::Placeholder(_) = &template.nodes[3]);
	}

	#[test]
	fn test_parse_empty() {
		let_assert!(Ok(template) = Template::parse(""));
		check!(template.nodes.is_empty());
	}

	#[test]
	#[rustfmt::skip]
	fn test_unexpected_placeholder() {
		for source in ["50%", "%y", "%5", "%.s", "%0$s", "%()s", "%(name", "%'$s", "trailing %-"] {
			let_assert!(Err(ParseError::UnexpectedPlaceholder(e)) = Template::parse(source), "{}", source);
			check!(e.position == source.find('%').unwrap());
			check!(e.remainder == &source[e.position..]);
		}

		let source = "Hello %y!";
		let_assert!(Err(e) = Template::parse(source));
		assert!(e.is_syntax_error());
		assert!(e.to_string() == r#"Unexpected placeholder: "%y!""#);
		assert!(e.source_highlighting(source) == concat!(
				"  Hello %y!\n",
				"        ^\n",
		));
	}

	#[test]
	#[rustfmt::skip]
	fn test_invalid_key_path() {
		for source in ["%(0abc)s", "%(a.)s", "%(a..b)s", "%(a[x])s", "%(a[1)s", "%(a b)s", "%(a-b)s"] {
			let_assert!(Err(ParseError::InvalidKeyPath(e)) = Template::parse(source), "{}", source);
			check!(e.position == 2);
		}

		let source = "Hi %(a.)s";
		let_assert!(Err(e) = Template::parse(source));
		assert!(e.is_syntax_error());
		assert!(e.to_string() == r#"Failed to parse named argument key: "a.""#);
		assert!(e.source_highlighting(source) == concat!(
				"  Hi %(a.)s\n",
				"       ^^\n",
		));
	}

	#[test]
	#[rustfmt::skip]
	fn test_mixed_placeholders() {
		let source = "%(name)s is %d";
		let_assert!(Err(ParseError::MixedPlaceholders(e)) = Template::parse(source));
		assert!(e.position == 12);
		assert!(e.len == 2);

		let source = "%1$s and %(name)s";
		let_assert!(Err(e) = Template::parse(source));
		assert!(!e.is_syntax_error());
		assert!(e.to_string() == "Mixing positional and named placeholders is not supported");
		assert!(e.source_highlighting(source) == concat!(
				"  %1$s and %(name)s\n",
				"           ^^^^^^^^\n",
		));
	}

	#[test]
	fn test_escaped_percent_is_not_a_placeholder_kind() {
		check!(let Ok(_) = Template::parse("%% %(a)s %%"));
		check!(let Ok(_) = Template::parse("%% %s %%"));
	}
}
