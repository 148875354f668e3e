use serde::{
	de::{Error, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::Template;

struct TemplateVisitor;

impl<'de> Visitor<'de> for TemplateVisitor {
	type Value = Template;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a format template string")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		self.visit_string(v.to_owned())
	}

	fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Template::parse(v).map_err(E::custom)
	}
}

impl Serialize for Template {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.source())
	}
}

impl<'de> Deserialize<'de> for Template {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_string(TemplateVisitor)
	}
}

#[cfg(test)]
mod test {
	use assert2::{assert, let_assert};
	use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, assert_tokens, Token};

	use crate::Template;

	const SOURCE: &str = "Hello %(name)s!";

	#[test]
	fn template_ser_de() {
		let_assert!(Ok(template) = Template::parse(SOURCE));
		assert_tokens(&template, &[Token::Str(SOURCE)]);
		assert_de_tokens(&template, &[Token::String(SOURCE)]);
		assert_de_tokens(&template, &[Token::BorrowedStr(SOURCE)]);
	}

	#[test]
	fn template_serializes_as_source() {
		let_assert!(Ok(template) = Template::parse("%5.2f%%"));
		assert_ser_tokens(&template, &[Token::Str("%5.2f%%")]);
	}

	#[test]
	fn template_de_rejects_invalid_source() {
		assert_de_tokens_error::<Template>(&[Token::Str("%1$s %(name)s")], "Mixing positional and named placeholders is not supported");
	}

	#[test]
	fn template_from_json() {
		#[derive(serde::Deserialize)]
		struct Config {
			greeting: Template,
		}

		let_assert!(Ok(config) = serde_json::from_str::<Config>(r#"{"greeting": "Hi %s"}"#));
		let_assert!(Ok(rendered) = config.greeting.render(["Ann"]));
		assert!(rendered == "Hi Ann");
	}
}
