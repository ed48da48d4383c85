//! Untyped representation of a schema JSON document, as it comes straight out
//! of `serde_json`, before fullnames are resolved and references are fixed up.
//!
//! Unlike the datum codec (which borrows from the input slice for
//! performance, see [`de::read`](crate::de::read)), schema compilation is a
//! one-off cost paid once per [`Codec`](crate::Codec), so everything here is
//! owned - there's no benefit in threading a lifetime through the whole
//! schema parser for a tree that's thrown away right after [`SchemaNode`]s are
//! registered into the arena.

use serde::de::*;

pub(super) enum SchemaNode {
	Type(Type),
	Ref(String),
	Object(Box<SchemaNodeObject>),
	Union(Vec<SchemaNode>),
}

#[derive(serde_derive::Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "kebab-case")]
pub(super) enum Type {
	Null,
	Boolean,
	Int,
	Long,
	Float,
	Double,
	Bytes,
	String,
	Array,
	Map,
	Record,
	Enum,
	Fixed,
}

#[derive(serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SchemaNodeObject {
	#[serde(rename = "type")]
	pub(super) type_: SchemaNode,
	/// For named types
	pub(super) name: Option<String>,
	/// For named types
	pub(super) namespace: Option<String>,
	/// For record type
	pub(super) fields: Option<Vec<Field>>,
	/// For enum type
	pub(super) symbols: Option<Vec<String>>,
	/// For array type
	pub(super) items: Option<SchemaNode>,
	/// For map type
	pub(super) values: Option<SchemaNode>,
	/// For fixed type
	pub(super) size: Option<usize>,
	/// Parsed and stored, never consulted for encoding
	#[serde(default)]
	pub(super) aliases: Vec<String>,
	/// Parsed and stored, never consulted - schema evolution via aliases is
	/// not implemented
	#[serde(default)]
	pub(super) doc: Option<String>,
}

#[derive(serde_derive::Deserialize)]
pub(super) struct Field {
	pub(super) name: String,
	#[serde(rename = "type")]
	pub(super) type_: SchemaNode,
	/// Only meaningful at the source level; ignored for encoding
	#[serde(default)]
	pub(super) default: Option<serde_json::Value>,
	#[serde(default)]
	pub(super) order: Option<FieldOrder>,
	#[serde(default)]
	pub(super) aliases: Vec<String>,
}

#[derive(serde_derive::Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub(super) enum FieldOrder {
	Ascending,
	Descending,
	Ignore,
}

impl<'de> Deserialize<'de> for SchemaNode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct SchemaNodeVisitor;
		impl<'de> Visitor<'de> for SchemaNodeVisitor {
			type Value = SchemaNode;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(
					formatter,
					"A string (type) or an object with a `type` field or an array (union)"
				)
			}

			fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				Ok(SchemaNode::Object(Deserialize::deserialize(
					serde::de::value::MapAccessDeserializer::new(map),
				)?))
			}

			fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
			where
				A: SeqAccess<'de>,
			{
				Ok(SchemaNode::Union(Deserialize::deserialize(
					serde::de::value::SeqAccessDeserializer::new(seq),
				)?))
			}

			fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(
					match Type::deserialize(value::StrDeserializer::<FailedDeserialization>::new(v))
					{
						Ok(type_) => SchemaNode::Type(type_),
						Err(FailedDeserialization) => SchemaNode::Ref(v.to_owned()),
					},
				)
			}

			fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(
					match Type::deserialize(value::StrDeserializer::<FailedDeserialization>::new(
						v.as_str(),
					)) {
						Ok(type_) => SchemaNode::Type(type_),
						Err(FailedDeserialization) => SchemaNode::Ref(v),
					},
				)
			}
		}
		deserializer.deserialize_any(SchemaNodeVisitor)
	}
}

#[derive(thiserror::Error, Debug)]
#[error("Failed to deserialize")]
struct FailedDeserialization;
impl Error for FailedDeserialization {
	fn custom<T: std::fmt::Display>(_msg: T) -> Self {
		FailedDeserialization
	}
}
