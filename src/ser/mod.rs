//! Encode one [`Value`](crate::Value) into an Avro datum byte stream
//!
//! You'll typically go through [`Codec::encode`](crate::Codec::encode)
//! rather than this module directly; it's exposed for callers who want to
//! encode against a [`Schema`](crate::Schema) without building a full
//! [`Codec`](crate::Codec).
//!
//! ```
//! let schema: avro_fast_codec::Schema = r#"{"type": "string"}"#
//! 	.parse()
//! 	.expect("Failed to parse schema");
//! let value = avro_fast_codec::Value::String("foo".to_owned());
//! let serialized = avro_fast_codec::ser::encode_to_vec(&schema, &value)
//! 	.expect("Failed to encode");
//! assert_eq!(serialized, &[6, 102, 111, 111]);
//! ```

mod encode;
mod error;

pub use error::SerError;

use crate::{schema::Schema, Value};

/// Encode one datum into a [`Vec<u8>`]
pub fn encode_to_vec(schema: &Schema, value: &Value) -> Result<Vec<u8>, SerError> {
	let mut buf = Vec::new();
	encode::encode(schema, &mut buf, value)?;
	Ok(buf)
}

/// Encode one datum, appending it to an existing [`impl Write`](std::io::Write)
///
/// Reusing the same writer (e.g. a `Vec<u8>` that gets cleared between calls)
/// across encodings avoids repeated allocations.
pub fn encode_to_writer<W: std::io::Write>(
	schema: &Schema,
	writer: &mut W,
	value: &Value,
) -> Result<(), SerError> {
	encode::encode(schema, writer, value)
}
