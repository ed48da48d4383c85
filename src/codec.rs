//! The top-level, schema-bound entry point for encoding and decoding datums

use crate::{
	de::{self, DecoderConfig},
	schema::{Schema, SchemaError},
	ser, Value,
};

/// A compiled schema bound together with the knobs that govern decoding
///
/// Building a [`Codec`] parses and validates the schema eagerly, so a
/// [`Codec`] that exists is always ready to [`encode`](Codec::encode) and
/// [`decode`](Codec::decode) - neither call can fail because of a malformed
/// schema, only because of a mismatch between the schema and the data at
/// hand.
#[derive(Clone, Debug)]
pub struct Codec {
	schema: Schema,
	decoder_config: DecoderConfig,
}

impl Codec {
	/// Compile a schema from its JSON text representation
	pub fn from_str(schema: &str) -> Result<Self, SchemaError> {
		Ok(Self::compile(schema.parse()?))
	}

	/// Wrap an already-parsed [`Schema`]
	pub fn compile(schema: Schema) -> Self {
		Self {
			schema,
			decoder_config: DecoderConfig::default(),
		}
	}

	/// The schema this codec encodes and decodes against
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Override the DOS-prevention knobs used by [`Codec::decode`] and
	/// [`Codec::decode_reader`]
	pub fn set_decoder_config(&mut self, decoder_config: DecoderConfig) {
		self.decoder_config = decoder_config;
	}

	/// Decode one datum from a `&[u8]`
	pub fn decode(&self, datum: &[u8]) -> Result<Value, de::DeError> {
		de::decode_from_slice(&self.schema, datum, &self.decoder_config)
	}

	/// Decode one datum from an [`impl Read`](std::io::Read)
	pub fn decode_reader<R: std::io::Read>(&self, reader: R) -> Result<Value, de::DeError> {
		de::decode_from_reader(&self.schema, reader, &self.decoder_config)
	}

	/// Encode one datum into a newly allocated [`Vec<u8>`]
	pub fn encode(&self, value: &Value) -> Result<Vec<u8>, ser::SerError> {
		ser::encode_to_vec(&self.schema, value)
	}

	/// Encode one datum, appending it to an existing [`impl Write`](std::io::Write)
	pub fn encode_to_writer<W: std::io::Write>(
		&self,
		writer: &mut W,
		value: &Value,
	) -> Result<(), ser::SerError> {
		ser::encode_to_writer(&self.schema, writer, value)
	}
}

impl std::str::FromStr for Codec {
	type Err = SchemaError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_str(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_an_int() {
		let codec = Codec::from_str(r#""int""#).unwrap();
		let datum = codec.encode(&Value::Int(-65)).unwrap();
		assert_eq!(datum, &[129, 1]);
		assert_eq!(codec.decode(&datum).unwrap(), Value::Int(-65));
	}

	#[test]
	fn rejects_malformed_schema_eagerly() {
		assert!(Codec::from_str(r#"{"type": "not_a_type"}"#).is_err());
	}
}
