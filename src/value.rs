//! The host-side representation of an Avro datum
//!
//! [`Value`] is the boundary type that crosses in and out of [`Codec`](crate::Codec):
//! [`Codec::decode`](crate::Codec::decode) produces one, [`Codec::encode`](crate::Codec::encode)
//! consumes one. It's a plain tagged union rather than a `serde`-style trait
//! so that a caller never needs a matching Rust type for the schema at hand -
//! dynamically built schemas (e.g. read from a config file at runtime) are
//! just as usable as schemas known at compile time.

/// One Avro datum, tagged with the kind of schema node it was produced from
///
/// Field and map entries preserve declaration/insertion order rather than
/// being a `HashMap`, since record field order is significant on the wire and
/// stable iteration order makes round-trip assertions straightforward.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Value {
	Null,
	Boolean(bool),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Bytes(Vec<u8>),
	String(String),
	Array(Vec<Value>),
	Map(Vec<(String, Value)>),
	Record(Vec<(String, Value)>),
	/// A symbol chosen from the enum schema's symbol list
	Enum(String),
	/// The selected branch's zero-based index together with the value
	/// encoded/decoded through that branch's schema
	Union { index: usize, value: Box<Value> },
	/// Exactly the schema-declared number of bytes
	Fixed(Vec<u8>),
}

impl Value {
	/// A short, human readable description of this value's kind, for use in
	/// error messages
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Boolean(_) => "boolean",
			Value::Int(_) => "int",
			Value::Long(_) => "long",
			Value::Float(_) => "float",
			Value::Double(_) => "double",
			Value::Bytes(_) => "bytes",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Map(_) => "map",
			Value::Record(_) => "record",
			Value::Enum(_) => "enum",
			Value::Union { .. } => "union",
			Value::Fixed(_) => "fixed",
		}
	}

	/// Build a union value selecting the branch at `index`
	pub fn union(index: usize, value: Value) -> Self {
		Value::Union {
			index,
			value: Box::new(value),
		}
	}

	/// Look up a field by name if this is a [`Value::Record`]
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Value::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}
impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v)
	}
}
impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Long(v)
	}
}
impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(v)
	}
}
impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Double(v)
	}
}
impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}
impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_owned())
	}
}
impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}
