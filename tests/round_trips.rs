use {avro_fast_codec::Codec, pretty_assertions::assert_eq};

fn round_trip(schema: &str, value: avro_fast_codec::Value, expected_bytes: &[u8]) {
	let codec = Codec::from_str(schema).expect("Failed to compile schema");
	let encoded = codec.encode(&value).expect("Failed to encode");
	assert_eq!(encoded, expected_bytes);
	let decoded = codec.decode(&encoded).expect("Failed to decode");
	assert_eq!(decoded, value);
}

#[test]
fn null() {
	round_trip(r#""null""#, avro_fast_codec::Value::Null, &[]);
}

#[test]
fn boolean() {
	round_trip(r#""boolean""#, avro_fast_codec::Value::Boolean(true), &[1]);
	round_trip(r#""boolean""#, avro_fast_codec::Value::Boolean(false), &[0]);
}

#[test]
fn negative_int_zigzag() {
	round_trip(r#""int""#, avro_fast_codec::Value::Int(-65), &[129, 1]);
}

#[test]
fn long() {
	round_trip(r#""long""#, avro_fast_codec::Value::Long(-1), &[1]);
}

#[test]
fn float_and_double() {
	round_trip(
		r#""float""#,
		avro_fast_codec::Value::Float(1234.0),
		&1234f32.to_le_bytes(),
	);
	round_trip(
		r#""double""#,
		avro_fast_codec::Value::Double(1234.0),
		&1234f64.to_le_bytes(),
	);
}

#[test]
fn string() {
	round_trip(
		r#""string""#,
		avro_fast_codec::Value::String("foo".to_owned()),
		&[6, 102, 111, 111],
	);
}

#[test]
fn bytes() {
	round_trip(
		r#""bytes""#,
		avro_fast_codec::Value::Bytes(vec![1, 2, 3]),
		&[6, 1, 2, 3],
	);
}

#[test]
fn fixed() {
	round_trip(
		r#"{"type": "fixed", "name": "Md5", "size": 2}"#,
		avro_fast_codec::Value::Fixed(vec![0xab, 0xcd]),
		&[0xab, 0xcd],
	);
}

#[test]
fn enum_() {
	round_trip(
		r#"{"type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS"]}"#,
		avro_fast_codec::Value::Enum("HEARTS".to_owned()),
		&[2],
	);
}

#[test]
fn array_of_long() {
	round_trip(
		r#"{"type": "array", "items": "long"}"#,
		avro_fast_codec::Value::Array(vec![
			avro_fast_codec::Value::Long(3),
			avro_fast_codec::Value::Long(27),
		]),
		&[4, 6, 54, 0],
	);
}

#[test]
fn empty_array() {
	round_trip(
		r#"{"type": "array", "items": "long"}"#,
		avro_fast_codec::Value::Array(vec![]),
		&[0],
	);
}

#[test]
fn map_of_long() {
	let codec = Codec::from_str(r#"{"type": "map", "values": "long"}"#).unwrap();
	let value = avro_fast_codec::Value::Map(vec![("a".to_owned(), avro_fast_codec::Value::Long(1))]);
	let encoded = codec.encode(&value).unwrap();
	assert_eq!(encoded, [2, 2, 97, 2, 0]);
	assert_eq!(codec.decode(&encoded).unwrap(), value);
}

#[test]
fn union_null_or_string() {
	round_trip(
		r#"["null", "string"]"#,
		avro_fast_codec::Value::union(1, avro_fast_codec::Value::String("a".to_owned())),
		&[2, 2, 97],
	);
	round_trip(
		r#"["null", "string"]"#,
		avro_fast_codec::Value::union(0, avro_fast_codec::Value::Null),
		&[0],
	);
}

#[test]
fn record() {
	let codec = Codec::from_str(
		r#"{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "a", "type": "long"},
				{"name": "b", "type": "string"}
			]
		}"#,
	)
	.unwrap();
	let value = avro_fast_codec::Value::Record(vec![
		("a".to_owned(), avro_fast_codec::Value::Long(27)),
		("b".to_owned(), avro_fast_codec::Value::String("foo".to_owned())),
	]);
	let encoded = codec.encode(&value).unwrap();
	assert_eq!(encoded, [54, 6, 102, 111, 111]);
	assert_eq!(codec.decode(&encoded).unwrap(), value);
}

#[test]
fn record_missing_field_falls_back_to_default() {
	let codec = Codec::from_str(
		r#"{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "a", "type": "long", "default": 42}
			]
		}"#,
	)
	.unwrap();
	let encoded = codec.encode(&avro_fast_codec::Value::Record(vec![])).unwrap();
	assert_eq!(
		codec.decode(&encoded).unwrap(),
		avro_fast_codec::Value::Record(vec![("a".to_owned(), avro_fast_codec::Value::Long(42))])
	);
}

#[test]
fn recursive_schema_round_trips() {
	let codec = Codec::from_str(
		r#"{
			"type": "record",
			"name": "LinkedList",
			"fields": [
				{"name": "value", "type": "long"},
				{"name": "next", "type": ["null", "LinkedList"]}
			]
		}"#,
	)
	.unwrap();
	let value = avro_fast_codec::Value::Record(vec![
		("value".to_owned(), avro_fast_codec::Value::Long(1)),
		(
			"next".to_owned(),
			avro_fast_codec::Value::union(
				1,
				avro_fast_codec::Value::Record(vec![
					("value".to_owned(), avro_fast_codec::Value::Long(2)),
					(
						"next".to_owned(),
						avro_fast_codec::Value::union(0, avro_fast_codec::Value::Null),
					),
				]),
			),
		),
	]);
	let encoded = codec.encode(&value).unwrap();
	assert_eq!(codec.decode(&encoded).unwrap(), value);
}

#[test]
fn decoding_is_prefix_free_per_datum() {
	// Encoding two datums back to back and decoding from the same slice twice,
	// each call only consuming its own datum's bytes, is what makes object
	// container files (back-to-back datums with no separators) possible.
	let codec = Codec::from_str(r#""long""#).unwrap();
	let mut buf = Vec::new();
	codec
		.encode_to_writer(&mut buf, &avro_fast_codec::Value::Long(3))
		.unwrap();
	codec
		.encode_to_writer(&mut buf, &avro_fast_codec::Value::Long(-4))
		.unwrap();
	let first = codec.decode(&buf).unwrap();
	assert_eq!(first, avro_fast_codec::Value::Long(3));
	let first_len = codec.encode(&first).unwrap().len();
	let second = codec.decode(&buf[first_len..]).unwrap();
	assert_eq!(second, avro_fast_codec::Value::Long(-4));
}

#[test]
fn rejects_value_that_does_not_match_schema() {
	let codec = Codec::from_str(r#""long""#).unwrap();
	assert!(codec.encode(&avro_fast_codec::Value::String("nope".to_owned())).is_err());
}

#[test]
fn rejects_truncated_datum() {
	let codec = Codec::from_str(r#""string""#).unwrap();
	// Claims a 6-byte string but only 2 bytes follow.
	assert!(codec.decode(&[6, 102, 111]).is_err());
}
