//! The recursive encoder: turns a [`Value`] into bytes by walking the schema
//! arena node by node

use super::SerError;
use crate::{
	schema::{Schema, SchemaKey, SchemaNode},
	Value,
};
use std::io::Write;

pub(crate) fn encode<W: Write>(schema: &Schema, writer: &mut W, value: &Value) -> Result<(), SerError> {
	encode_node(schema, schema.root(), writer, value)
}

fn encode_node<W: Write>(
	schema: &Schema,
	key: SchemaKey,
	writer: &mut W,
	value: &Value,
) -> Result<(), SerError> {
	let node = schema.node(key);
	macro_rules! mismatch {
		() => {
			return Err(SerError::custom(format_args!(
				"Expected a value conforming to `{}`, got `{}`",
				node.kind_name(),
				value.kind_name(),
			)))
		};
	}
	match node {
		SchemaNode::Null => match value {
			Value::Null => {}
			_ => mismatch!(),
		},
		SchemaNode::Boolean => match value {
			Value::Boolean(b) => writer
				.write_all(&[if *b { 1 } else { 0 }])
				.map_err(SerError::io)?,
			_ => mismatch!(),
		},
		SchemaNode::Int => match value {
			Value::Int(n) => write_zigzag(writer, i64::from(*n))?,
			_ => mismatch!(),
		},
		SchemaNode::Long => match value {
			Value::Long(n) => write_zigzag(writer, *n)?,
			_ => mismatch!(),
		},
		SchemaNode::Float => match value {
			Value::Float(f) => writer.write_all(&f.to_le_bytes()).map_err(SerError::io)?,
			_ => mismatch!(),
		},
		SchemaNode::Double => match value {
			Value::Double(f) => writer.write_all(&f.to_le_bytes()).map_err(SerError::io)?,
			_ => mismatch!(),
		},
		SchemaNode::Bytes => match value {
			Value::Bytes(bytes) => write_len_prefixed(writer, bytes)?,
			_ => mismatch!(),
		},
		SchemaNode::String => match value {
			Value::String(s) => write_len_prefixed(writer, s.as_bytes())?,
			_ => mismatch!(),
		},
		SchemaNode::Array(array) => match value {
			Value::Array(items) => {
				if !items.is_empty() {
					write_zigzag(writer, items.len() as i64)?;
					for (i, item) in items.iter().enumerate() {
						encode_node(schema, array.items, writer, item)
							.map_err(|e| e.with_context(format_args!("items[{i}]")))?;
					}
				}
				write_zigzag(writer, 0)?;
			}
			_ => mismatch!(),
		},
		SchemaNode::Map(map) => match value {
			Value::Map(entries) => {
				if !entries.is_empty() {
					write_zigzag(writer, entries.len() as i64)?;
					for (key, item) in entries {
						write_len_prefixed(writer, key.as_bytes())?;
						encode_node(schema, map.values, writer, item)
							.map_err(|e| e.with_context(format_args!("values[{key:?}]")))?;
					}
				}
				write_zigzag(writer, 0)?;
			}
			_ => mismatch!(),
		},
		SchemaNode::Union(union) => match value {
			Value::Union { index, value } => {
				let &branch = union.variants.get(*index).ok_or_else(|| {
					SerError::custom(format_args!(
						"Union discriminant {index} is out of range (union has {} branches)",
						union.variants.len()
					))
				})?;
				write_zigzag(writer, *index as i64)?;
				encode_node(schema, branch, writer, value)
					.map_err(|e| e.with_context(format_args!("union branch {index}")))?;
			}
			_ => mismatch!(),
		},
		SchemaNode::Record(record) => match value {
			Value::Record(_) => {
				for field in &record.fields {
					let field_value = match value.field(&field.name) {
						Some(v) => std::borrow::Cow::Borrowed(v),
						None => std::borrow::Cow::Owned(default_value(field, schema)?),
					};
					encode_node(schema, field.type_, writer, &field_value)
						.map_err(|e| e.with_context(format_args!("field `{}`", field.name)))?;
				}
			}
			_ => mismatch!(),
		},
		SchemaNode::Enum(enum_) => match value {
			Value::Enum(symbol) => {
				let index = enum_.index_of(symbol).ok_or_else(|| {
					SerError::custom(format_args!(
						"`{symbol}` is not among the declared symbols of this enum",
					))
				})?;
				write_zigzag(writer, index as i64)?;
			}
			_ => mismatch!(),
		},
		SchemaNode::Fixed(fixed) => match value {
			Value::Fixed(bytes) => {
				if bytes.len() != fixed.size {
					return Err(SerError::custom(format_args!(
						"Expected exactly {} bytes for this fixed type, got {}",
						fixed.size,
						bytes.len()
					)));
				}
				writer.write_all(bytes).map_err(SerError::io)?;
			}
			_ => mismatch!(),
		},
	}
	Ok(())
}

/// Builds a [`Value`] out of a record field's JSON-encoded schema default,
/// used when the caller-supplied [`Value::Record`] is missing that field
fn default_value(field: &crate::schema::RecordField, schema: &Schema) -> Result<Value, SerError> {
	let default = field.default.as_ref().ok_or_else(|| {
		SerError::custom(format_args!(
			"Missing field `{}` with no schema default to fall back on",
			field.name,
		))
	})?;
	json_to_value(default, schema, field.type_)
}

fn json_to_value(
	json: &serde_json::Value,
	schema: &Schema,
	key: SchemaKey,
) -> Result<Value, SerError> {
	Ok(match (schema.node(key), json) {
		(SchemaNode::Null, serde_json::Value::Null) => Value::Null,
		(SchemaNode::Boolean, serde_json::Value::Bool(b)) => Value::Boolean(*b),
		(SchemaNode::Int, n) => Value::Int(json_number(n)? as i32),
		(SchemaNode::Long, n) => Value::Long(json_number(n)?),
		(SchemaNode::Float, n) => Value::Float(json_number(n)? as f32),
		(SchemaNode::Double, n) => Value::Double(json_number(n)? as f64),
		(SchemaNode::Bytes, serde_json::Value::String(s)) => Value::Bytes(s.clone().into_bytes()),
		(SchemaNode::String, serde_json::Value::String(s)) => Value::String(s.clone()),
		(SchemaNode::Fixed(_), serde_json::Value::String(s)) => Value::Fixed(s.clone().into_bytes()),
		(SchemaNode::Enum(_), serde_json::Value::String(s)) => Value::Enum(s.clone()),
		(SchemaNode::Array(array), serde_json::Value::Array(items)) => Value::Array(
			items
				.iter()
				.map(|v| json_to_value(v, schema, array.items))
				.collect::<Result<_, _>>()?,
		),
		(SchemaNode::Map(map), serde_json::Value::Object(entries)) => Value::Map(
			entries
				.iter()
				.map(|(k, v)| Ok((k.clone(), json_to_value(v, schema, map.values)?)))
				.collect::<Result<_, SerError>>()?,
		),
		(SchemaNode::Record(record), serde_json::Value::Object(entries)) => Value::Record(
			record
				.fields
				.iter()
				.map(|f| {
					let v = entries.get(&f.name).ok_or_else(|| {
						SerError::custom(format_args!(
							"Default value is missing field `{}`",
							f.name
						))
					})?;
					Ok((f.name.clone(), json_to_value(v, schema, f.type_)?))
				})
				.collect::<Result<_, SerError>>()?,
		),
		(SchemaNode::Union(union), _) => {
			// The default's type is the union's first branch, per the Avro
			// specification.
			let &first = union.variants.first().ok_or_else(|| {
				SerError::new("Union schema default refers to an empty union")
			})?;
			Value::union(0, json_to_value(json, schema, first)?)
		}
		(node, _) => {
			return Err(SerError::custom(format_args!(
				"Default value does not match declared `{}` type",
				node.kind_name()
			)))
		}
	})
}

fn json_number(json: &serde_json::Value) -> Result<i64, SerError> {
	json.as_i64()
		.or_else(|| json.as_f64().map(|f| f as i64))
		.ok_or_else(|| SerError::custom(format_args!("Expected a number in default value, got {json}")))
}

fn write_zigzag<W: Write>(writer: &mut W, n: i64) -> Result<(), SerError> {
	let mut raw = ((n << 1) ^ (n >> 63)) as u64;
	let mut buf = [0u8; 10];
	let mut i = 0;
	loop {
		let byte = (raw & 0x7f) as u8;
		raw >>= 7;
		if raw == 0 {
			buf[i] = byte;
			i += 1;
			break;
		} else {
			buf[i] = byte | 0x80;
			i += 1;
		}
	}
	writer.write_all(&buf[..i]).map_err(SerError::io)
}

fn write_len_prefixed<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), SerError> {
	write_zigzag(writer, bytes.len() as i64)?;
	writer.write_all(bytes).map_err(SerError::io)
}
