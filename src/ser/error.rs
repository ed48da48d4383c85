use std::borrow::Cow;

/// Any error that may happen while encoding a datum to a byte stream
///
/// Carries a path of schema positions accumulated as the encoder unwinds back
/// out of the recursive descent, so the message identifies where in the
/// schema the failure occurred.
#[derive(thiserror::Error)]
#[error("{}", inner.value)]
pub struct SerError {
	inner: Box<ErrorInner>,
}

impl std::fmt::Debug for SerError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&*self.inner.value, f)
	}
}

struct ErrorInner {
	value: Cow<'static, str>,
}

impl SerError {
	/// If you need a dynamic string use `SerError::custom(format_args!(...))`
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
	pub(crate) fn io(io_error: std::io::Error) -> Self {
		Self::custom(format_args!(
			"Encountered IO error when attempting to write for serialization: {io_error}"
		))
	}

	/// Prepend a schema-position segment to this error's message, building up
	/// a dotted path as the recursive encoder unwinds
	pub(crate) fn with_context(self, segment: impl std::fmt::Display) -> Self {
		Self::custom(format_args!("{segment}: {}", self.inner.value))
	}
}
