//! Module containing error details.

/// An error that can occur while parsing or rendering a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum Error {
	/// The template could not be parsed.
	Parse(ParseError),

	/// The template was parsed, but could not be rendered with the given arguments.
	Render(RenderError),
}

impl From<ParseError> for Error {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Parse(other)
	}
}

impl From<RenderError> for Error {
	#[inline]
	fn from(other: RenderError) -> Self {
		Self::Render(other)
	}
}

impl From<UnexpectedPlaceholder> for Error {
	#[inline]
	fn from(other: UnexpectedPlaceholder) -> Self {
		Self::Parse(other.into())
	}
}

impl From<InvalidKeyPath> for Error {
	#[inline]
	fn from(other: InvalidKeyPath) -> Self {
		Self::Parse(other.into())
	}
}

impl From<MixedPlaceholders> for Error {
	#[inline]
	fn from(other: MixedPlaceholders) -> Self {
		Self::Parse(other.into())
	}
}

impl From<ArgumentIndex> for Error {
	#[inline]
	fn from(other: ArgumentIndex) -> Self {
		Self::Render(other.into())
	}
}

impl From<MissingProperty> for Error {
	#[inline]
	fn from(other: MissingProperty) -> Self {
		Self::Render(other.into())
	}
}

impl From<TypeCoercion> for Error {
	#[inline]
	fn from(other: TypeCoercion) -> Self {
		Self::Render(other.into())
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Render(e) => e.fmt(f),
		}
	}
}

impl Error {
	/// Get the range in the template that contains the error.
	#[inline]
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match self {
			Self::Parse(e) => e.source_range(),
			Self::Render(e) => e.source_range(),
		}
	}

	/// Write source highlighting for the error location.
	///
	/// See [`ParseError::write_source_highlighting()`] for details.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		write_source_highlighting(f, source, self.source_range())
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn source_highlighting(&self, source: &str) -> String {
		source_highlighting(source, self.source_range())
	}
}

/// An error that can occur while parsing a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParseError {
	/// The template contains a `%` that does not start a valid placeholder.
	UnexpectedPlaceholder(UnexpectedPlaceholder),

	/// A named placeholder contains a key path that can not be parsed.
	InvalidKeyPath(InvalidKeyPath),

	/// The template mixes named placeholders with positional placeholders.
	MixedPlaceholders(MixedPlaceholders),
}

impl From<UnexpectedPlaceholder> for ParseError {
	#[inline]
	fn from(other: UnexpectedPlaceholder) -> Self {
		Self::UnexpectedPlaceholder(other)
	}
}

impl From<InvalidKeyPath> for ParseError {
	#[inline]
	fn from(other: InvalidKeyPath) -> Self {
		Self::InvalidKeyPath(other)
	}
}

impl From<MixedPlaceholders> for ParseError {
	#[inline]
	fn from(other: MixedPlaceholders) -> Self {
		Self::MixedPlaceholders(other)
	}
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::UnexpectedPlaceholder(e) => e.fmt(f),
			Self::InvalidKeyPath(e) => e.fmt(f),
			Self::MixedPlaceholders(e) => e.fmt(f),
		}
	}
}

impl ParseError {
	/// Check if this is a syntax error, as opposed to a semantic error in a well-formed template.
	pub fn is_syntax_error(&self) -> bool {
		match self {
			Self::UnexpectedPlaceholder(_) => true,
			Self::InvalidKeyPath(_) => true,
			Self::MixedPlaceholders(_) => false,
		}
	}

	/// Get the range in the template that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let (start, len) = match self {
			Self::UnexpectedPlaceholder(e) => (e.position, 1),
			Self::InvalidKeyPath(e) => (e.position, e.key.len()),
			Self::MixedPlaceholders(e) => (e.position, e.len),
		};
		start..start + len
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] instead.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		write_source_highlighting(f, source, self.source_range())
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn source_highlighting(&self, source: &str) -> String {
		source_highlighting(source, self.source_range())
	}
}

/// The template contains a `%` that does not start a valid placeholder.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnexpectedPlaceholder {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the `%` sign that starts the invalid placeholder.
	pub position: usize,

	/// The unconsumed remainder of the template, starting at the `%` sign.
	pub remainder: String,
}

impl std::error::Error for UnexpectedPlaceholder {}

impl std::fmt::Display for UnexpectedPlaceholder {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unexpected placeholder: {:?}", self.remainder)
	}
}

/// A named placeholder contains a key path that can not be parsed.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidKeyPath {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first character of the key path, after the opening parenthesis.
	pub position: usize,

	/// The full text of the key path.
	pub key: String,
}

impl std::error::Error for InvalidKeyPath {}

impl std::fmt::Display for InvalidKeyPath {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Failed to parse named argument key: {:?}", self.key)
	}
}

/// The template mixes named placeholders with positional placeholders.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MixedPlaceholders {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first placeholder that conflicts with an earlier one.
	pub position: usize,

	/// The length of the conflicting placeholder in bytes.
	pub len: usize,
}

impl std::error::Error for MixedPlaceholders {}

impl std::fmt::Display for MixedPlaceholders {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Mixing positional and named placeholders is not supported")
	}
}

/// An error that can occur while rendering a parsed template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum RenderError {
	/// A placeholder refers to an argument that was not given.
	ArgumentIndex(ArgumentIndex),

	/// A named placeholder refers to a property that the argument does not have.
	MissingProperty(MissingProperty),

	/// A numeric placeholder received a value that can not be interpreted as a number.
	TypeCoercion(TypeCoercion),
}

impl From<ArgumentIndex> for RenderError {
	#[inline]
	fn from(other: ArgumentIndex) -> Self {
		Self::ArgumentIndex(other)
	}
}

impl From<MissingProperty> for RenderError {
	#[inline]
	fn from(other: MissingProperty) -> Self {
		Self::MissingProperty(other)
	}
}

impl From<TypeCoercion> for RenderError {
	#[inline]
	fn from(other: TypeCoercion) -> Self {
		Self::TypeCoercion(other)
	}
}

impl std::error::Error for RenderError {}

impl std::fmt::Display for RenderError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ArgumentIndex(e) => e.fmt(f),
			Self::MissingProperty(e) => e.fmt(f),
			Self::TypeCoercion(e) => e.fmt(f),
		}
	}
}

impl RenderError {
	/// Get the range in the template of the placeholder that failed to render.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match self {
			Self::ArgumentIndex(e) => e.placeholder.clone(),
			Self::MissingProperty(e) => e.placeholder.clone(),
			Self::TypeCoercion(e) => e.placeholder.clone(),
		}
	}

	/// Write source highlighting for the error location.
	///
	/// See [`ParseError::write_source_highlighting()`] for details.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		write_source_highlighting(f, source, self.source_range())
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	///
	/// # Panics
	/// May panic if the source text is not the template that produced the error.
	#[inline]
	pub fn source_highlighting(&self, source: &str) -> String {
		source_highlighting(source, self.source_range())
	}
}

/// A placeholder refers to an argument that was not given.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ArgumentIndex {
	/// The byte range of the placeholder in the template.
	pub placeholder: std::ops::Range<usize>,

	/// The requested argument, counting from 1.
	pub index: usize,

	/// The number of arguments that were given.
	pub available: usize,
}

impl std::error::Error for ArgumentIndex {}

impl std::fmt::Display for ArgumentIndex {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No such argument: {} (got {} arguments)", self.index, self.available)
	}
}

/// A named placeholder refers to a property that the argument does not have.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MissingProperty {
	/// The byte range of the placeholder in the template.
	pub placeholder: std::ops::Range<usize>,

	/// The path segment that could not be found.
	pub property: String,
}

impl std::error::Error for MissingProperty {}

impl std::fmt::Display for MissingProperty {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Property {:?} does not exist", self.property)
	}
}

/// A numeric placeholder received a value that can not be interpreted as a number.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct TypeCoercion {
	/// The byte range of the placeholder in the template.
	pub placeholder: std::ops::Range<usize>,

	/// The conversion character of the placeholder.
	pub conversion: char,

	/// The type name of the value that was found instead.
	pub found: &'static str,
}

impl std::error::Error for TypeCoercion {}

impl std::fmt::Display for TypeCoercion {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Expected a number for %{} but found {}", self.conversion, self.found)
	}
}

fn source_highlighting(source: &str, range: std::ops::Range<usize>) -> String {
	let mut output = String::new();
	// Writing to a String can not fail.
	let _ = write_source_highlighting(&mut output, source, range);
	output
}

fn write_source_highlighting(f: &mut impl std::fmt::Write, source: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;

	let start = line_start(source, range.start);
	let end = line_end(source, range.start);
	let line = &source[start..end];
	if line.width() > 60 {
		return Ok(());
	}

	// Only underline the part of the range that is on the first line.
	let range = range.start - start..range.end.min(end) - start;
	write!(f, "  {}\n  ", line)?;
	write_underline(f, line, range)?;
	writeln!(f)
}

fn line_start(source: &str, position: usize) -> usize {
	match source[..position].rfind(['\n', '\r']) {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source[position..].find(['\n', '\r']) {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
