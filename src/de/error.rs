use std::borrow::Cow;

/// Any error that may happen while decoding a datum from a byte stream
///
/// Carries a path of schema positions (e.g. `record field \`b\`: array
/// item 2`) accumulated as the decoder unwinds back out of the recursive
/// descent, so the message identifies where in the schema the failure
/// occurred.
#[derive(thiserror::Error)]
#[error("{}", inner.value)]
pub struct DeError {
	inner: Box<ErrorInner>,
}

impl std::fmt::Debug for DeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&*self.inner.value, f)
	}
}

struct ErrorInner {
	value: Cow<'static, str>,
}

impl DeError {
	pub(crate) fn new(s: &'static str) -> Self {
		Self {
			inner: Box::new(ErrorInner {
				value: Cow::Borrowed(s),
			}),
		}
	}
	pub(crate) fn custom(args: std::fmt::Arguments<'_>) -> Self {
		Self {
			inner: Box::new(ErrorInner {
				value: Cow::Owned(args.to_string()),
			}),
		}
	}
	pub(crate) fn io(e: std::io::Error) -> Self {
		Self::custom(format_args!("IO error while decoding: {e}"))
	}
	pub(crate) fn unexpected_eof() -> Self {
		Self::new("Unexpected end of input while decoding")
	}

	/// Prepend a schema-position segment to this error's message, building up
	/// a dotted path as the recursive decoder unwinds
	pub(crate) fn with_context(self, segment: impl std::fmt::Display) -> Self {
		Self::custom(format_args!("{segment}: {}", self.inner.value))
	}
}
