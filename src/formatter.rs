//! Formatting with a cache of parsed templates.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, ParseError};
use crate::{Template, Value};

/// A formatting engine that parses each distinct template only once.
///
/// Parsed templates are cached by their exact source text for the lifetime of the formatter.
/// There is no eviction: if you generate templates dynamically, the cache grows with every distinct template.
///
/// The formatter can be shared between threads.
/// When two threads render the same new template at the same time,
/// both may parse it, but only one parsed template is kept.
#[derive(Default)]
pub struct Formatter {
	cache: DashMap<String, Arc<Template>>,
}

impl std::fmt::Debug for Formatter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Formatter")
			.field("cached_templates", &self.cache.len())
			.finish()
	}
}

impl Formatter {
	/// Create a formatter with an empty cache.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the parsed template for a source string, parsing it if it is not cached yet.
	///
	/// Templates that fail to parse are not cached.
	pub fn parse(&self, source: &str) -> Result<Arc<Template>, ParseError> {
		if let Some(template) = self.cache.get(source) {
			tracing::trace!(source, "template cache hit");
			return Ok(Arc::clone(template.value()));
		}

		let template = match Template::parse(source) {
			Ok(template) => Arc::new(template),
			Err(e) => {
				tracing::debug!(source, error = %e, "failed to parse template");
				return Err(e);
			},
		};
		tracing::debug!(source, placeholders = template.placeholders().count(), "parsed new template");

		// Another thread may have inserted the same template in the meantime: keep the first one.
		let cached = self.cache.entry(source.to_owned()).or_insert(template);
		Ok(Arc::clone(cached.value()))
	}

	/// Render a template with the given arguments, parsing it only if it is not cached yet.
	///
	/// See [`Template::render()`] for details.
	pub fn render<I, V>(&self, template: &str, args: I) -> Result<String, Error>
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Ok(self.parse(template)?.render(args)?)
	}

	/// Render a template with an existing list of arguments, parsing it only if it is not cached yet.
	pub fn render_list(&self, template: &str, args: &[Value]) -> Result<String, Error> {
		Ok(self.parse(template)?.render_list(args)?)
	}

	/// Get the number of cached templates.
	pub fn cached_templates(&self) -> usize {
		self.cache.len()
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::args;
	use crate::error::RenderError;
	use assert2::{assert, check, let_assert};

	#[test]
	fn test_empty_on_construction() {
		let formatter = Formatter::new();
		assert!(formatter.cached_templates() == 0);
		assert!(format!("{formatter:?}") == "Formatter { cached_templates: 0 }");
	}

	#[test]
	fn test_parse_once() {
		let formatter = Formatter::new();
		let_assert!(Ok(a) = formatter.parse("%s and %s"));
		let_assert!(Ok(b) = formatter.parse("%s and %s"));
		assert!(Arc::ptr_eq(&a, &b));
		assert!(formatter.cached_templates() == 1);

		let_assert!(Ok(_) = formatter.parse("%s or %s"));
		assert!(formatter.cached_templates() == 2);
	}

	#[test]
	fn test_render_is_idempotent() {
		let formatter = Formatter::new();
		let args = args!["Ann", 3.5, true];
		let_assert!(Ok(first) = formatter.render_list("%s: %5.2f %t", &args));
		let_assert!(Ok(second) = formatter.render_list("%s: %5.2f %t", &args));
		assert!(first == "Ann:  3.50 true");
		assert!(first == second);
		assert!(formatter.cached_templates() == 1);
	}

	#[test]
	fn test_parse_errors_are_not_cached() {
		let formatter = Formatter::new();
		let_assert!(Err(Error::Parse(e)) = formatter.render("%(name)s %s", [1]));
		assert!(let ParseError::MixedPlaceholders(_) = e);
		assert!(formatter.cached_templates() == 0);
	}

	#[test]
	fn test_render_errors_keep_the_template() {
		let formatter = Formatter::new();
		let_assert!(Err(Error::Render(RenderError::TypeCoercion(_))) = formatter.render("%d", ["nope"]));
		assert!(formatter.cached_templates() == 1);
		check!(let Ok("42") = formatter.render("%d", ["42"]).as_deref());
	}

	#[test]
	fn test_concurrent_use() {
		let formatter = Formatter::new();
		std::thread::scope(|scope| {
			for i in 0..8 {
				let formatter = &formatter;
				scope.spawn(move || {
					for j in 0..50 {
						let_assert!(Ok(rendered) = formatter.render("%d-%d", [i, j % 5]));
						assert!(rendered == format!("{}-{}", i, j % 5));
						let_assert!(Ok(_) = formatter.parse(&format!("%{}$d", j % 5 + 1)));
					}
				});
			}
		});
		assert!(formatter.cached_templates() == 6);
	}
}
