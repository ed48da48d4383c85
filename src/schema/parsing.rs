//! Turns [`raw`](super::raw) schema nodes into a validated [`Schema`] arena
//!
//! This mirrors the construction algorithm of [`Schema::from_str`]: a single
//! forward pass over the JSON tree that registers each node into the arena,
//! threading the enclosing namespace down and recording named-type
//! definitions into a lookup table as they're encountered. References to a
//! name that hasn't been seen yet are left as a sentinel key and fixed up in
//! a second pass once every name is known, so declaration order of named
//! types doesn't matter.

use super::{
	raw, Array, Enum, Fixed, FieldOrder, Map, Name, Record, RecordField, Schema, SchemaError,
	SchemaKey, SchemaNode, Union,
};
use std::collections::HashMap;

/// Set on a not-yet-resolved [`SchemaKey`]'s index to mark it as pointing
/// into `unresolved_names` rather than `nodes`, until the fixup pass runs.
const LATE_NAME_LOOKUP_REMAP_BIT: usize = 1usize << (usize::BITS - 1);

pub(super) fn parse(s: &str) -> Result<Schema, SchemaError> {
	let raw_schema: raw::SchemaNode = serde_json::from_str(s).map_err(SchemaError::serde_json)?;

	let mut state = SchemaConstructionState {
		nodes: Vec::new(),
		names: HashMap::new(),
		unresolved_names: Vec::new(),
	};
	state.register_node(&raw_schema, None)?;

	if !state.unresolved_names.is_empty() {
		let resolved_names: Vec<SchemaKey> = state
			.unresolved_names
			.iter()
			.map(|name_key| {
				state
					.names
					.get(name_key)
					.copied()
					.ok_or_else(|| {
						SchemaError::msg(format_args!(
							"The schema contains an unknown reference: {name_key}",
						))
					})
					.map(SchemaKey::from_idx)
			})
			.collect::<Result<_, _>>()?;
		let fix_key = |key: &mut SchemaKey| {
			if key.idx() & LATE_NAME_LOOKUP_REMAP_BIT != 0 {
				*key = resolved_names[key.idx() ^ LATE_NAME_LOOKUP_REMAP_BIT];
			}
		};
		for node in &mut state.nodes {
			match node {
				SchemaNode::Array(Array { items: key }) | SchemaNode::Map(Map { values: key }) => {
					fix_key(key)
				}
				SchemaNode::Union(union) => union.variants.iter_mut().for_each(fix_key),
				SchemaNode::Record(record) => {
					record.fields.iter_mut().for_each(|f| fix_key(&mut f.type_))
				}
				SchemaNode::Null
				| SchemaNode::Boolean
				| SchemaNode::Int
				| SchemaNode::Long
				| SchemaNode::Float
				| SchemaNode::Double
				| SchemaNode::Bytes
				| SchemaNode::String
				| SchemaNode::Enum(_)
				| SchemaNode::Fixed(_) => {}
			}
		}
	}

	for node in &state.nodes {
		if let SchemaNode::Union(union) = node {
			validate_union(&state.nodes, union)?;
		}
	}

	let json = String::from_utf8({
		let mut serializer = serde_json::Serializer::new(Vec::new());
		serde_transcode::transcode(&mut serde_json::Deserializer::from_str(s), &mut serializer)
			.map_err(SchemaError::serde_json)?;
		serializer.into_inner()
	})
	.map_err(|e| {
		SchemaError::msg(format_args!(
			"serde_json should not emit invalid UTF-8 but got {e}"
		))
	})?;

	Ok(Schema {
		nodes: state.nodes,
		json,
	})
}

struct SchemaConstructionState {
	nodes: Vec<SchemaNode>,
	names: HashMap<NameKey, usize>,
	unresolved_names: Vec<NameKey>,
}

impl SchemaConstructionState {
	fn register_node(
		&mut self,
		raw_node: &raw::SchemaNode,
		enclosing_namespace: Option<&str>,
	) -> Result<SchemaKey, SchemaError> {
		Ok(match raw_node {
			raw::SchemaNode::Type(type_) => {
				let idx = self.nodes.len();
				self.nodes.push(match type_ {
					raw::Type::Null => SchemaNode::Null,
					raw::Type::Boolean => SchemaNode::Boolean,
					raw::Type::Int => SchemaNode::Int,
					raw::Type::Long => SchemaNode::Long,
					raw::Type::Float => SchemaNode::Float,
					raw::Type::Double => SchemaNode::Double,
					raw::Type::Bytes => SchemaNode::Bytes,
					raw::Type::String => SchemaNode::String,
					complex @ (raw::Type::Array
					| raw::Type::Map
					| raw::Type::Record
					| raw::Type::Enum
					| raw::Type::Fixed) => {
						return Err(SchemaError::msg(format_args!(
							"Expected a primitive type name, but got {complex:?} which is a \
								complex type, so should be declared as an object",
						)))
					}
				});
				SchemaKey::from_idx(idx)
			}
			raw::SchemaNode::Ref(reference) => {
				let name_key = NameKey::parse(reference, enclosing_namespace);
				match self.names.get(&name_key) {
					Some(&idx) => SchemaKey::from_idx(idx),
					None => {
						let idx = self.unresolved_names.len();
						self.unresolved_names.push(name_key);
						SchemaKey::from_idx(idx | LATE_NAME_LOOKUP_REMAP_BIT)
					}
				}
			}
			raw::SchemaNode::Union(variants) => {
				if variants
					.iter()
					.any(|v| matches!(v, raw::SchemaNode::Union(_)))
				{
					return Err(SchemaError::new("Unions may not immediately contain other unions"));
				}
				let idx = self.nodes.len();
				self.nodes.push(SchemaNode::Null); // reserve our spot
				let variants = variants
					.iter()
					.map(|v| self.register_node(v, enclosing_namespace))
					.collect::<Result<_, _>>()?;
				self.nodes[idx] = SchemaNode::Union(Union { variants });
				SchemaKey::from_idx(idx)
			}
			raw::SchemaNode::Object(object) => {
				let idx = self.nodes.len();

				let name_key = match &object.name {
					Some(name) => {
						let name_key = NameKey::parse(name, object.namespace.as_deref().or(enclosing_namespace));
						if self.names.insert(name_key.clone(), idx).is_some() {
							return Err(SchemaError::msg(format_args!(
								"The schema contains duplicate definitions for {name_key}",
							)));
						}
						Some(name_key)
					}
					None => None,
				};
				let require_name = |kind: raw::Type| match &name_key {
					Some(name_key) => Ok(name_key.clone()),
					None => Err(SchemaError::msg(format_args!(
						"Missing `name` field on {kind:?} type",
					))),
				};

				self.nodes.push(SchemaNode::Null); // reserve our spot

				macro_rules! field {
					($kind:expr, $name:ident) => {
						match &object.$name {
							Some(v) => v,
							None => {
								return Err(SchemaError::msg(format_args!(
									concat!("Missing `", stringify!($name), "` field on {:?} type"),
									$kind
								)))
							}
						}
					};
				}

				let new_node = match object.type_ {
					raw::SchemaNode::Type(t @ raw::Type::Array) => SchemaNode::Array(Array {
						items: self.register_node(field!(t, items), enclosing_namespace)?,
					}),
					raw::SchemaNode::Type(t @ raw::Type::Map) => SchemaNode::Map(Map {
						values: self.register_node(field!(t, values), enclosing_namespace)?,
					}),
					raw::SchemaNode::Type(t @ raw::Type::Enum) => {
						let name_key = require_name(t)?;
						let symbols = field!(t, symbols).clone();
						validate_enum_symbols(&symbols)?;
						SchemaNode::Enum(Enum {
							name: name_key.into_name(),
							symbols,
							aliases: object.aliases.clone(),
						})
					}
					raw::SchemaNode::Type(t @ raw::Type::Fixed) => {
						let name_key = require_name(t)?;
						SchemaNode::Fixed(Fixed {
							name: name_key.into_name(),
							size: *field!(t, size),
							aliases: object.aliases.clone(),
						})
					}
					raw::SchemaNode::Type(t @ raw::Type::Record) => {
						let name_key = require_name(t)?;
						let inner_namespace = name_key.namespace.clone();
						let raw_fields = field!(t, fields);
						let mut seen_field_names = std::collections::HashSet::with_capacity(raw_fields.len());
						let fields = raw_fields
							.iter()
							.map(|raw_field| {
								if !seen_field_names.insert(raw_field.name.as_str()) {
									return Err(SchemaError::msg(format_args!(
										"Duplicate field name `{}` in record `{}`",
										raw_field.name,
										name_key,
									)));
								}
								Ok(RecordField {
									name: raw_field.name.clone(),
									type_: self.register_node(&raw_field.type_, inner_namespace.as_deref())?,
									default: raw_field.default.clone(),
									order: match raw_field.order {
										Some(raw::FieldOrder::Ascending) | None => FieldOrder::Ascending,
										Some(raw::FieldOrder::Descending) => FieldOrder::Descending,
										Some(raw::FieldOrder::Ignore) => FieldOrder::Ignore,
									},
									aliases: raw_field.aliases.clone(),
								})
							})
							.collect::<Result<_, SchemaError>>()?;
						SchemaNode::Record(Record {
							name: name_key.into_name(),
							fields,
							aliases: object.aliases.clone(),
						})
					}
					ref inner @ (raw::SchemaNode::Type(
						raw::Type::Null
						| raw::Type::Boolean
						| raw::Type::Int
						| raw::Type::Long
						| raw::Type::Float
						| raw::Type::Double
						| raw::Type::Bytes
						| raw::Type::String,
					)
					| raw::SchemaNode::Ref(_)
					| raw::SchemaNode::Object(_)
					| raw::SchemaNode::Union(_)) => {
						// Allow `{"type": {"type": "string"}}`: an object whose only
						// meaningful key is `type` just wraps another schema. Anything
						// else set alongside it would silently be ignored, so reject it.
						if object.fields.is_some()
							|| object.symbols.is_some()
							|| object.items.is_some()
							|| object.values.is_some()
							|| object.size.is_some()
						{
							return Err(SchemaError::new(
								"Got an unnecessarily-nested type, but other properties are \
									set alongside it - those would be ignored",
							));
						}
						self.nodes.pop();
						let inner_namespace = match &name_key {
							Some(name_key) => {
								self.names.remove(name_key);
								name_key.namespace.clone()
							}
							None => None,
						};
						return self.register_node(
							inner,
							inner_namespace.as_deref().or(enclosing_namespace),
						);
					}
				};
				self.nodes[idx] = new_node;
				SchemaKey::from_idx(idx)
			}
		})
	}
}

fn validate_enum_symbols(symbols: &[String]) -> Result<(), SchemaError> {
	let mut seen = std::collections::HashSet::with_capacity(symbols.len());
	for symbol in symbols {
		if symbol.is_empty()
			|| !symbol
				.chars()
				.next()
				.is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
			|| !symbol
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_')
		{
			return Err(SchemaError::msg(format_args!(
				"Invalid enum symbol `{symbol}`: must match [A-Za-z_][A-Za-z0-9_]*",
			)));
		}
		if !seen.insert(symbol.as_str()) {
			return Err(SchemaError::msg(format_args!(
				"Duplicate enum symbol `{symbol}`",
			)));
		}
	}
	Ok(())
}

/// Unions may not directly contain two schemas of the same category, except
/// that named types (record/enum/fixed) are distinguished by fullname rather
/// than by category.
fn validate_union(nodes: &[SchemaNode], union: &Union) -> Result<(), SchemaError> {
	let mut seen_categories = std::collections::HashSet::new();
	let mut seen_names = std::collections::HashSet::new();
	for &variant in &union.variants {
		let node = &nodes[variant.idx()];
		match node.name() {
			Some(name) => {
				if !seen_names.insert(name.fully_qualified_name()) {
					return Err(SchemaError::msg(format_args!(
						"Union contains more than one member named `{name}`",
					)));
				}
			}
			None => {
				if !seen_categories.insert(node.kind_name()) {
					return Err(SchemaError::msg(format_args!(
						"Union contains more than one `{}` member - unions may not contain \
							more than one schema of the same type, except for named types",
						node.kind_name(),
					)));
				}
			}
		}
	}
	Ok(())
}

#[derive(PartialEq, Eq, Hash, Clone)]
struct NameKey {
	namespace: Option<String>,
	name: String,
}

impl NameKey {
	/// Builds the lookup key for a `name` field as written in the schema
	/// JSON, resolving it against the given enclosing namespace: if `name`
	/// itself contains a `.` it's treated as already fully qualified, per the
	/// Avro name resolution rule.
	fn parse(name: &str, enclosing_namespace: Option<&str>) -> Self {
		match name.rsplit_once('.') {
			Some((namespace, name)) => NameKey {
				namespace: Some(namespace).filter(|s| !s.is_empty()).map(str::to_owned),
				name: name.to_owned(),
			},
			None => NameKey {
				namespace: enclosing_namespace.map(str::to_owned),
				name: name.to_owned(),
			},
		}
	}

	fn into_name(self) -> Name {
		Name::new(self.namespace.as_deref(), &self.name)
	}
}

impl std::fmt::Display for NameKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.namespace {
			Some(namespace) => write!(f, "{namespace}.{}", self.name),
			None => f.write_str(&self.name),
		}
	}
}
