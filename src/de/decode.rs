//! The recursive decoder: turns a byte stream into a [`Value`] by walking the
//! schema arena node by node

use super::{read::Read, AllowedDepth, DeError};
use crate::{
	schema::{Schema, SchemaKey, SchemaNode},
	Value,
};

pub(crate) fn decode<R: Read>(
	schema: &Schema,
	reader: &mut R,
	max_seq_size: usize,
	allowed_depth: usize,
) -> Result<Value, DeError> {
	decode_node(
		schema,
		schema.root(),
		reader,
		AllowedDepth::new(allowed_depth),
		max_seq_size,
	)
}

fn decode_node<R: Read>(
	schema: &Schema,
	key: SchemaKey,
	reader: &mut R,
	depth: AllowedDepth,
	max_seq_size: usize,
) -> Result<Value, DeError> {
	Ok(match schema.node(key) {
		SchemaNode::Null => Value::Null,
		SchemaNode::Boolean => match reader.read_u8()? {
			0 => Value::Boolean(false),
			1 => Value::Boolean(true),
			other => {
				return Err(DeError::custom(format_args!(
					"Invalid boolean byte: expected 0x00 or 0x01, got {other:#04x}",
				)))
			}
		},
		SchemaNode::Int => Value::Int(reader.read_zigzag(5)? as i32),
		SchemaNode::Long => Value::Long(reader.read_zigzag(10)?),
		SchemaNode::Float => Value::Float(f32::from_le_bytes(reader.read_const_size_buf()?)),
		SchemaNode::Double => Value::Double(f64::from_le_bytes(reader.read_const_size_buf()?)),
		SchemaNode::Bytes => Value::Bytes(reader.read_len_prefixed(read_nonneg_len(reader, 10)?)?),
		SchemaNode::String => {
			let bytes = reader.read_len_prefixed(read_nonneg_len(reader, 10)?)?;
			Value::String(
				String::from_utf8(bytes)
					.map_err(|e| DeError::custom(format_args!("String is not valid UTF-8: {e}")))?,
			)
		}
		SchemaNode::Array(array) => {
			let depth = depth.dec()?;
			let mut items = Vec::new();
			let mut total_read = 0usize;
			while let Some(count) = read_block_len(reader, &mut total_read, max_seq_size)? {
				items.reserve(count.min(max_seq_size));
				for i in 0..count {
					items.push(
						decode_node(schema, array.items, reader, depth, max_seq_size)
							.map_err(|e| e.with_context(format_args!("items[{i}]")))?,
					);
				}
			}
			Value::Array(items)
		}
		SchemaNode::Map(map) => {
			let depth = depth.dec()?;
			let mut entries = Vec::new();
			let mut total_read = 0usize;
			while let Some(count) = read_block_len(reader, &mut total_read, max_seq_size)? {
				entries.reserve(count.min(max_seq_size));
				for _ in 0..count {
					let key_bytes = reader.read_len_prefixed(read_nonneg_len(reader, 10)?)?;
					let key = String::from_utf8(key_bytes).map_err(|e| {
						DeError::custom(format_args!("Map key is not valid UTF-8: {e}"))
					})?;
					let value = decode_node(schema, map.values, reader, depth, max_seq_size)
						.map_err(|e| e.with_context(format_args!("values[{key:?}]")))?;
					entries.push((key, value));
				}
			}
			Value::Map(entries)
		}
		SchemaNode::Union(union) => {
			let depth = depth.dec()?;
			let index = read_nonneg_len(reader, 10)?;
			let &branch = union.variants.get(index).ok_or_else(|| {
				DeError::custom(format_args!(
					"Union discriminant {index} is out of range (union has {} branches)",
					union.variants.len()
				))
			})?;
			let value = decode_node(schema, branch, reader, depth, max_seq_size)
				.map_err(|e| e.with_context(format_args!("union branch {index}")))?;
			Value::union(index, value)
		}
		SchemaNode::Record(record) => {
			let depth = depth.dec()?;
			let mut fields = Vec::with_capacity(record.fields.len());
			for field in &record.fields {
				let value = decode_node(schema, field.type_, reader, depth, max_seq_size)
					.map_err(|e| e.with_context(format_args!("field `{}`", field.name)))?;
				fields.push((field.name.clone(), value));
			}
			Value::Record(fields)
		}
		SchemaNode::Enum(enum_) => {
			let index = read_nonneg_len(reader, 5)?;
			let symbol = enum_.symbols.get(index).ok_or_else(|| {
				DeError::custom(format_args!(
					"Enum discriminant {index} is out of range (enum has {} symbols)",
					enum_.symbols.len()
				))
			})?;
			Value::Enum(symbol.clone())
		}
		SchemaNode::Fixed(fixed) => Value::Fixed(reader.read_len_prefixed(fixed.size)?),
	})
}

/// Reads a zig-zag varint capped at `max_bytes` and checks it's
/// non-negative, for contexts where a negative value (lengths,
/// discriminants) is always invalid
fn read_nonneg_len<R: Read>(reader: &mut R, max_bytes: usize) -> Result<usize, DeError> {
	let len = reader.read_zigzag(max_bytes)?;
	usize::try_from(len)
		.map_err(|_| DeError::custom(format_args!("Expected a non-negative length, got {len}")))
}

/// Reads one array/map block-count prefix, transparently handling the
/// negative-count "skip block" form (a negative count is followed by a
/// long-encoded byte-length of the block, which we read and discard since we
/// always decode rather than skip)
///
/// Returns `None` once the terminating zero-length block is reached.
fn read_block_len<R: Read>(
	reader: &mut R,
	total_read: &mut usize,
	max_seq_size: usize,
) -> Result<Option<usize>, DeError> {
	let count = reader.read_zigzag(10)?;
	if count == 0 {
		return Ok(None);
	}
	let count = if count < 0 {
		let _byte_len = reader.read_zigzag(10)?;
		// `count == i64::MIN` would overflow plain negation; this handles it.
		(count as i128).unsigned_abs() as u64
	} else {
		count as u64
	};
	let count = usize::try_from(count)
		.map_err(|_| DeError::custom(format_args!("Invalid block length in stream: {count}")))?;
	*total_read = total_read.saturating_add(count);
	if *total_read > max_seq_size {
		return Err(DeError::new(
			"Exceeding configured max_seq_size while decoding a block-encoded sequence",
		));
	}
	Ok(Some(count))
}
