mod convert;
mod parse;
mod render;

pub use render::{Arguments, Render};

/// Raw template that doesn't track the original source.
///
/// Internally, this keeps a bunch of offsets into the original source.
#[derive(Debug, Clone)]
pub struct Template {
	/// The individual parts that make up the template, in rendering order.
	nodes: Vec<Node>,
}

impl Template {
	/// Iterate over the placeholders of the template, in order of appearance.
	pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
		self.nodes.iter().filter_map(|node| match node {
			Node::Placeholder(x) => Some(x),
			_ => None,
		})
	}
}

/// One piece of a parsed template.
#[derive(Debug, Clone)]
enum Node {
	/// A literal string to be used verbatim from the original source.
	Literal(Literal),

	/// An escaped percent sign (`%%`).
	Percent,

	/// A placeholder to be replaced by a rendered argument.
	Placeholder(Placeholder),
}

/// A literal string to be used verbatim from the original source.
#[derive(Debug, Clone)]
struct Literal {
	/// The range of the literal in the original source.
	///
	/// The literal does not contain any percent signs.
	range: std::ops::Range<usize>,
}

/// A parsed placeholder: everything between the `%` and the conversion character.
///
/// The general syntax is `%[argument][+][pad][-][width][.precision]conversion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
	/// The byte range of the entire placeholder in the template.
	pub range: std::ops::Range<usize>,

	/// The argument that the placeholder renders.
	pub argument: Argument,

	/// Always render a sign for numbers, also when they are positive (`+`).
	pub force_sign: bool,

	/// The character used to pad the rendered value up to the width.
	pub pad: Option<Pad>,

	/// Pad on the right instead of on the left (`-`).
	pub left_justify: bool,

	/// The minimum width of the rendered value, in characters.
	pub width: Option<usize>,

	/// The number of decimals for numbers, or the maximum length for text.
	pub precision: Option<usize>,

	/// How the argument is converted to text.
	pub conversion: Conversion,
}

/// The argument selected by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
	/// The next argument in line (`%s`).
	Next,

	/// An explicit argument, counting from 1 (`%2$s`).
	Index(usize),

	/// A path into the next argument in line (`%(user.name)s`).
	Path(Vec<PathSegment>),
}

/// A segment of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
	/// A named field (`.name`, or the leading name of the path).
	Field(String),

	/// An element index (`[0]`).
	Index(usize),
}

impl std::fmt::Display for PathSegment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Field(name) => f.write_str(name),
			Self::Index(index) => write!(f, "{index}"),
		}
	}
}

/// The pad specifier of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
	/// Pad with zeros between the sign and the digits (`0`).
	Zero,

	/// Pad with a custom character (`'*`).
	///
	/// A quoted `'0` pads with zeros in the same position as [`Pad::Zero`].
	Char(char),
}

impl Pad {
	/// Get the character used for padding.
	pub fn character(self) -> char {
		match self {
			Self::Zero => '0',
			Self::Char(c) => c,
		}
	}
}

/// The conversion applied to the argument of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
	/// An integer in base 2 (`b`).
	Binary,

	/// The character with the integer as code point (`c`).
	Char,

	/// A signed decimal integer (`d` or `i`).
	Decimal,

	/// A number in exponential notation (`e`).
	Exponential,

	/// A number in fixed notation (`f`).
	Float,

	/// A number with a number of significant digits (`g`).
	General,

	/// A JSON dump of the argument (`j`).
	Json,

	/// An integer in base 8 (`o`).
	Octal,

	/// The argument as text (`s`).
	String,

	/// The truthiness of the argument as `true` or `false` (`t`).
	Bool,

	/// The type name of the argument (`T`).
	TypeName,

	/// An integer wrapped to 32 bit unsigned (`u`).
	Unsigned,

	/// The argument as text, without calling deferred values (`v`).
	Primitive,

	/// An integer in base 16 with lowercase digits (`x`).
	HexLower,

	/// An integer in base 16 with uppercase digits (`X`).
	HexUpper,
}

impl Conversion {
	/// Get the conversion for a conversion character.
	pub fn from_char(c: char) -> Option<Self> {
		match c {
			'b' => Some(Self::Binary),
			'c' => Some(Self::Char),
			'd' | 'i' => Some(Self::Decimal),
			'e' => Some(Self::Exponential),
			'f' => Some(Self::Float),
			'g' => Some(Self::General),
			'j' => Some(Self::Json),
			'o' => Some(Self::Octal),
			's' => Some(Self::String),
			't' => Some(Self::Bool),
			'T' => Some(Self::TypeName),
			'u' => Some(Self::Unsigned),
			'v' => Some(Self::Primitive),
			'x' => Some(Self::HexLower),
			'X' => Some(Self::HexUpper),
			_ => None,
		}
	}

	/// Get the conversion character.
	pub fn as_char(self) -> char {
		match self {
			Self::Binary => 'b',
			Self::Char => 'c',
			Self::Decimal => 'd',
			Self::Exponential => 'e',
			Self::Float => 'f',
			Self::General => 'g',
			Self::Json => 'j',
			Self::Octal => 'o',
			Self::String => 's',
			Self::Bool => 't',
			Self::TypeName => 'T',
			Self::Unsigned => 'u',
			Self::Primitive => 'v',
			Self::HexLower => 'x',
			Self::HexUpper => 'X',
		}
	}

	/// Check if the conversion requires a numeric argument.
	pub fn is_numeric(self) -> bool {
		match self {
			Self::Binary | Self::Char | Self::Decimal | Self::Exponential | Self::Float | Self::General => true,
			Self::Octal | Self::Unsigned | Self::HexLower | Self::HexUpper => true,
			Self::Json | Self::String | Self::Bool | Self::TypeName | Self::Primitive => false,
		}
	}

	/// Check if the conversion formats the integer part of its argument.
	pub fn is_integer(self) -> bool {
		match self {
			Self::Binary | Self::Char | Self::Decimal | Self::Octal | Self::Unsigned | Self::HexLower | Self::HexUpper => true,
			Self::Exponential | Self::Float | Self::General => false,
			Self::Json | Self::String | Self::Bool | Self::TypeName | Self::Primitive => false,
		}
	}

	/// Check if deferred values are called before converting them.
	pub fn calls_deferred(self) -> bool {
		!matches!(self, Self::TypeName | Self::Primitive)
	}
}
