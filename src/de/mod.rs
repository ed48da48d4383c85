//! Decode one Avro datum from a byte stream into a [`Value`](crate::Value)
//!
//! You'll typically go through [`Codec::decode`](crate::Codec::decode)
//! rather than this module directly; it's exposed for callers who need to
//! tune the DOS-prevention knobs below, or who want to decode against a
//! [`Schema`](crate::Schema) without building a full [`Codec`](crate::Codec).
//!
//! ```
//! let schema: avro_fast_codec::Schema = r#"{"type": "string"}"#
//! 	.parse()
//! 	.expect("Failed to parse schema");
//! let avro_datum: &[u8] = &[6, 102, 111, 111];
//! let mut config = avro_fast_codec::de::DecoderConfig::default();
//! config.max_seq_size = 1_000_000;
//! let value = avro_fast_codec::de::decode_from_slice(&schema, avro_datum, &config)
//! 	.expect("Failed to decode");
//! assert_eq!(value, avro_fast_codec::Value::String("foo".to_owned()));
//! ```

mod allowed_depth;
mod decode;
mod error;
pub mod read;

pub(crate) use allowed_depth::AllowedDepth;
pub use error::DeError;

use crate::{schema::Schema, Value};
use read::{Read, ReaderRead, SliceRead};

/// DOS-prevention knobs for decoding
///
/// The defaults are generous enough to never trigger on legitimate data, and
/// only guard against a corrupt or adversarial stream driving the decoder
/// into unbounded memory use or unbounded recursion.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct DecoderConfig {
	/// Caps the cumulative element count read out of array/map blocks
	///
	/// Without this, a single corrupt block-length claim could make the
	/// decoder try to allocate/loop an unreasonable number of times.
	///
	/// Default is `1_000_000_000`.
	pub max_seq_size: usize,
	/// Caps the recursion depth while decoding composite schema nodes
	/// (record/array/map/union)
	///
	/// Default is `64`.
	pub allowed_depth: usize,
	/// Caps a single length-delimited allocation (string/bytes/fixed) when
	/// decoding from an `impl Read` rather than a slice
	///
	/// Has no effect when decoding from a slice, since the allocation is
	/// already naturally bounded by the slice's remaining length there.
	///
	/// Default is `512 * 1024 * 1024`.
	pub max_alloc_size: usize,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self {
			max_seq_size: 1_000_000_000,
			allowed_depth: 64,
			max_alloc_size: 512 * 1024 * 1024,
		}
	}
}

/// Decode one datum from a `&[u8]`
pub fn decode_from_slice(
	schema: &Schema,
	slice: &[u8],
	config: &DecoderConfig,
) -> Result<Value, DeError> {
	let mut reader = SliceRead::new(slice);
	decode::decode(schema, &mut reader, config.max_seq_size, config.allowed_depth)
}

/// Decode one datum from an [`impl Read`](std::io::Read)
pub fn decode_from_reader<R: std::io::Read>(
	schema: &Schema,
	reader: R,
	config: &DecoderConfig,
) -> Result<Value, DeError> {
	let mut reader = ReaderRead::new(reader);
	reader.max_alloc_size = config.max_alloc_size;
	decode::decode(schema, &mut reader, config.max_seq_size, config.allowed_depth)
}

pub(crate) fn decode_with<R: Read>(
	schema: &Schema,
	reader: &mut R,
	config: &DecoderConfig,
) -> Result<Value, DeError> {
	decode::decode(schema, reader, config.max_seq_size, config.allowed_depth)
}
