//! Decoding of property strings like `key=value;other=value`.

use indexmap::IndexMap;

/// Decode a property string into an ordered map.
///
/// Pairs are separated by `;` and keys are separated from values by `=`.
/// Keys are trimmed, values are kept as they are.
/// A key without `=` gets an empty value, and the last pair does not need a terminating `;`.
/// If a key occurs more than once, the last value wins, but the key keeps its first position.
///
/// A backslash escapes the next character: `\t`, `\n` and `\r` produce a tab, newline and carriage return,
/// and any other character (including `\`, `=` and `;`) is taken literally.
/// A backslash at the end of the input is ignored.
///
/// The decoder never fails: stray separators are skipped.
/// A `=` at the very start of a pair is ignored,
/// and another unescaped `=` in a value makes the text before it the new key.
///
/// ```
/// let properties = pformat::properties::decode(r"name=Ann;motto=a\=b\;c;flag");
/// assert_eq!(properties["name"], "Ann");
/// assert_eq!(properties["motto"], "a=b;c");
/// assert_eq!(properties["flag"], "");
/// ```
pub fn decode(source: &str) -> IndexMap<String, String> {
	let mut result = IndexMap::new();
	let mut chars = source.chars();
	let mut part: Option<String> = None;
	let mut key: Option<String> = None;

	while let Some(c) = chars.next() {
		match (&mut part, c) {
			(None, ';') => {
				if let Some(key) = key.take() {
					commit(&mut result, key, String::new());
				}
			},
			(None, '=') => part = Some(String::new()),
			(None, '\\') => part = Some(unescape(chars.next()).into_iter().collect()),
			(None, c) => part = Some(c.into()),
			(Some(text), '=') => {
				key = Some(text.trim().to_owned());
				part = None;
			},
			(Some(text), ';') => {
				let text = std::mem::take(text);
				match key.take() {
					Some(key) => commit(&mut result, key, text),
					None => commit(&mut result, text.trim().to_owned(), String::new()),
				}
				part = None;
			},
			(Some(text), '\\') => text.extend(unescape(chars.next())),
			(Some(text), c) => text.push(c),
		}
	}

	match (key, part) {
		(Some(key), part) => commit(&mut result, key, part.unwrap_or_default()),
		(None, Some(part)) => commit(&mut result, part.trim().to_owned(), String::new()),
		(None, None) => (),
	}

	result
}

/// Resolve the character after a backslash.
fn unescape(c: Option<char>) -> Option<char> {
	match c? {
		't' => Some('\t'),
		'n' => Some('\n'),
		'r' => Some('\r'),
		other => Some(other),
	}
}

fn commit(result: &mut IndexMap<String, String>, key: String, value: String) {
	if !key.is_empty() {
		result.insert(key, value);
	}
}
