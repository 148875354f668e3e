use crate::error::{ParseError, RenderError};
use crate::value::Value;

mod raw;

pub use raw::{Argument, Conversion, Pad, PathSegment, Placeholder};
use raw::{Arguments, Render};

/// A parsed format template that owns its source string.
///
/// You can parse the template once and call [`Self::render()`] multiple times.
/// This is generally more efficient than calling [`format()`][crate::format] multiple times on the same string.
///
/// Use a [`Formatter`][crate::Formatter] if you want templates to be parsed once and cached by their source text.
#[derive(Clone)]
pub struct Template {
	source: String,
	raw: raw::Template,
}

impl std::fmt::Debug for Template {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

/// Two templates are equal if they have the same source.
impl PartialEq for Template {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

impl Eq for Template {}

impl Template {
	/// Parse a template.
	///
	/// Placeholders have the form `%[argument][+][pad][-][width][.precision]conversion`, where:
	/// * `argument` is either an explicit index counting from 1 (`%2$s`) or a key path (`%(user.tags[0])s`),
	/// * `+` forces a sign for positive numbers,
	/// * `pad` is either `0` or a quoted pad character (`'*`),
	/// * `-` pads on the right instead of the left,
	/// * `conversion` is one of `b c d i e f g j o s t T u v x X`.
	///
	/// A literal percent sign is written as `%%`.
	/// A template can not mix named placeholders with positional placeholders.
	pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
		let source = source.into();
		let raw = raw::Template::parse(&source)?;
		Ok(Self { source, raw })
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Consume the template to get the original source string.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Iterate over the placeholders of the template, in order of appearance.
	pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
		self.raw.placeholders()
	}

	/// Render the template with the given arguments.
	///
	/// Each argument can be anything that converts into a [`Value`].
	/// For arguments of mixed types, use the [`args!`][crate::args] macro and [`Self::render_list()`].
	pub fn render<I, V>(&self, args: I) -> Result<String, RenderError>
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		let args: Vec<Value> = args.into_iter().map(Into::into).collect();
		self.render_list(&args)
	}

	/// Render the template with an existing list of arguments.
	pub fn render_list(&self, args: &[Value]) -> Result<String, RenderError> {
		let mut output = String::with_capacity(self.source.len() + self.source.len() / 4);
		self.raw.render(&mut output, &self.source, &mut Arguments::new(args))?;
		Ok(output)
	}
}

impl std::str::FromStr for Template {
	type Err = ParseError;

	#[inline]
	fn from_str(source: &str) -> Result<Self, Self::Err> {
		Self::parse(source)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	#[test]
	fn test_render_twice() {
		let_assert!(Ok(template) = Template::parse("%s is %d years old"));
		check!(let Ok("Ann is 32 years old") = template.render_list(&[Value::from("Ann"), Value::from(32)]).as_deref());
		check!(let Ok("Bob is 7 years old") = template.render_list(&[Value::from("Bob"), Value::from(7)]).as_deref());
	}

	#[test]
	fn test_render_homogeneous_arguments() {
		let_assert!(Ok(template) = Template::parse("%d + %d = %2$d + %1$d"));
		check!(let Ok("1 + 2 = 2 + 1") = template.render([1, 2]).as_deref());
		check!(let Ok("a b") = Template::parse("%s %s").unwrap().render(vec!["a", "b"]).as_deref());
	}

	#[test]
	fn test_source() {
		let_assert!(Ok(template) = "%(name)s".parse::<Template>());
		assert!(template.source() == "%(name)s");
		assert!(template.clone().into_source() == "%(name)s");
		assert!(format!("{template:?}") == r#"Template("%(name)s")"#);
	}

	#[test]
	fn test_equality() {
		let_assert!(Ok(a) = Template::parse("%s"));
		let_assert!(Ok(b) = Template::parse(String::from("%s")));
		let_assert!(Ok(c) = Template::parse("%d"));
		check!(a == b);
		check!(a != c);
	}

	#[test]
	fn test_placeholders() {
		let_assert!(Ok(template) = Template::parse("%+05.1f and %%"));
		let placeholders: Vec<_> = template.placeholders().collect();
		assert!(placeholders.len() == 1);
		assert!(placeholders[0].range == (0..7));
		assert!(placeholders[0].argument == Argument::Next);
		assert!(placeholders[0].force_sign);
		assert!(placeholders[0].pad == Some(Pad::Zero));
		assert!(placeholders[0].width == Some(5));
		assert!(placeholders[0].precision == Some(1));
		assert!(placeholders[0].conversion == Conversion::Float);

		let_assert!(Ok(template) = Template::parse("tags: %(user.tags[2])'*-8s"));
		let placeholders: Vec<_> = template.placeholders().collect();
		assert!(placeholders.len() == 1);
		assert!(placeholders[0].range == (6..26));
		assert!(placeholders[0].argument == Argument::Path(vec![
			PathSegment::Field("user".into()),
			PathSegment::Field("tags".into()),
			PathSegment::Index(2),
		]));
		assert!(placeholders[0].pad == Some(Pad::Char('*')));
		assert!(placeholders[0].left_justify);
		assert!(placeholders[0].width == Some(8));
		assert!(placeholders[0].conversion == Conversion::String);
	}

	#[test]
	fn test_parse_error() {
		let_assert!(Err(e) = Template::parse("100% sure"));
		assert!(e.is_syntax_error());
		assert!(e.source_range() == (3..4));
		assert!(e.source_highlighting("100% sure") == concat!(
			"  100% sure\n",
			"     ^\n",
		));
	}

	#[test]
	fn test_render_error_keeps_no_partial_output() {
		let_assert!(Ok(template) = Template::parse("a %s b %s"));
		let_assert!(Err(RenderError::ArgumentIndex(e)) = template.render(["x"]));
		assert!(e.placeholder == (7..9));
	}
}
