use std::borrow::Cow;

/// Any error that may happen while parsing or validating a schema
///
/// Constructed internally while parsing the schema JSON document and
/// resolving named-type references; never constructed by calling code.
#[derive(thiserror::Error)]
#[error("{}", inner.value)]
pub struct SchemaError {
	inner: Box<ErrorInner>,
}

impl std::fmt::Debug for SchemaError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&*self.inner.value, f)
	}
}

struct ErrorInner {
	value: Cow<'static, str>,
}

impl SchemaError {
	pub(crate) fn new(s: &'static str) -> Self {
		Self {
			inner: Box::new(ErrorInner {
				value: Cow::Borrowed(s),
			}),
		}
	}
	pub(crate) fn msg(args: std::fmt::Arguments<'_>) -> Self {
		Self {
			inner: Box::new(ErrorInner {
				value: Cow::Owned(args.to_string()),
			}),
		}
	}
	pub(crate) fn serde_json(e: serde_json::Error) -> Self {
		Self::msg(format_args!("Failed to parse schema JSON: {e}"))
	}
}
