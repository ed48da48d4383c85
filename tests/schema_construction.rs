use avro_fast_codec::schema::{Schema, SchemaNode};

#[test]
fn resolves_forward_reference() {
	// `first` references `B` before its definition is reached in declaration order.
	let schema: Schema = r#"
		{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "first", "type": "B"},
				{"name": "second", "type": {"type": "fixed", "name": "B", "size": 4}}
			]
		}
	"#
	.parse()
	.unwrap();
	let SchemaNode::Record(record) = schema.node(schema.root()) else {
		panic!("expected a record at the root");
	};
	assert!(matches!(
		schema.node(record.fields[0].type_),
		SchemaNode::Fixed(_)
	));
	assert_eq!(record.fields[0].type_, record.fields[1].type_);
}

#[test]
fn resolves_recursive_reference() {
	let schema: Schema = r#"
		{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "b", "type": ["null", "Test"]}
			]
		}
	"#
	.parse()
	.unwrap();
	let SchemaNode::Record(record) = schema.node(schema.root()) else {
		panic!("expected a record at the root");
	};
	let SchemaNode::Union(union) = schema.node(record.fields[0].type_) else {
		panic!("expected a union for field `b`");
	};
	// The second branch refers back to the record itself.
	assert_eq!(union.variants[1], schema.root());
}

#[test]
fn fullname_uses_enclosing_namespace() {
	let schema: Schema = r#"
		{
			"type": "record",
			"name": "Test",
			"namespace": "com.example",
			"fields": [
				{
					"name": "inner",
					"type": {"type": "fixed", "name": "Inner", "size": 1}
				}
			]
		}
	"#
	.parse()
	.unwrap();
	let SchemaNode::Record(record) = schema.node(schema.root()) else {
		panic!("expected a record at the root");
	};
	assert_eq!(record.name.fully_qualified_name(), "com.example.Test");
	let SchemaNode::Fixed(inner) = schema.node(record.fields[0].type_) else {
		panic!("expected a fixed type for field `inner`");
	};
	assert_eq!(inner.name.fully_qualified_name(), "com.example.Inner");
}

#[test]
fn leading_dot_strips_namespace() {
	let name = avro_fast_codec::schema::Name::from_fully_qualified_name(".Foo");
	assert_eq!(name.namespace(), None);
	assert_eq!(name.name(), "Foo");
}

#[test]
fn unwraps_unnecessarily_nested_type() {
	let schema: Schema = r#"{"type": {"type": "string"}}"#.parse().unwrap();
	assert!(matches!(schema.node(schema.root()), SchemaNode::String));
}

#[test]
fn rejects_unknown_reference() {
	assert!("\"DoesNotExist\"".parse::<Schema>().is_err());
}

#[test]
fn rejects_duplicate_fullname() {
	let err = r#"
		[
			{"type": "fixed", "name": "Dup", "size": 1},
			{"type": "fixed", "name": "Dup", "size": 2}
		]
	"#
	.parse::<Schema>()
	.unwrap_err();
	assert!(err.to_string().contains("Dup"));
}

#[test]
fn rejects_duplicate_field_name() {
	assert!(r#"
		{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "a", "type": "long"},
				{"name": "a", "type": "string"}
			]
		}
	"#
	.parse::<Schema>()
	.is_err());
}

#[test]
fn rejects_duplicate_enum_symbol() {
	assert!(
		r#"{"type": "enum", "name": "Test", "symbols": ["A", "A"]}"#
			.parse::<Schema>()
			.is_err()
	);
}

#[test]
fn rejects_invalid_enum_symbol() {
	assert!(
		r#"{"type": "enum", "name": "Test", "symbols": ["0bad"]}"#
			.parse::<Schema>()
			.is_err()
	);
}

#[test]
fn rejects_union_with_two_members_of_same_category() {
	assert!(r#"["string", "string"]"#.parse::<Schema>().is_err());
}

#[test]
fn allows_union_with_two_distinctly_named_types() {
	assert!(r#"
		[
			{"type": "fixed", "name": "A", "size": 1},
			{"type": "fixed", "name": "B", "size": 1}
		]
	"#
	.parse::<Schema>()
	.is_ok());
}

#[test]
fn rejects_nested_union() {
	assert!(r#"["null", ["int", "string"]]"#.parse::<Schema>().is_err());
}
