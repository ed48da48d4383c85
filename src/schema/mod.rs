//! Parse, navigate and validate an [`Avro schema`](https://avro.apache.org/docs/current/specification/#schema-declaration)
//!
//! A [`Schema`] is an arena of [`SchemaNode`]s: due to how referencing via
//! [Names](https://avro.apache.org/docs/current/specification/#names) works
//! in Avro, the natural shape of an Avro schema is not a tree but a possibly
//! self-referential directed graph, so nodes reference each other through
//! [`SchemaKey`] indices into the arena rather than through ownership.

mod error;
mod parsing;
mod raw;

pub use error::SchemaError;

/// A fully parsed and validated Avro schema
///
/// Built by parsing a JSON schema document (see [`std::str::FromStr`]). The
/// first node of the arena (index `0`, [`Schema::root`]) is the root of the
/// schema.
///
/// This is intentionally a plain, safe arena (`Vec<SchemaNode>` indexed by
/// [`SchemaKey`]) rather than a tree: named-type references are resolved into
/// back-edges (indices that may point at an ancestor, or even at the node
/// itself), which is how Avro expresses recursive schemas.
#[derive(Clone, Debug)]
pub struct Schema {
	nodes: Vec<SchemaNode>,
	json: String,
}

impl Schema {
	/// The root of the schema
	pub fn root(&self) -> SchemaKey {
		SchemaKey { idx: 0 }
	}

	/// All nodes of the schema, indexable through [`SchemaKey`]
	pub fn nodes(&self) -> &[SchemaNode] {
		&self.nodes
	}

	/// Look up a node by key
	///
	/// # Panics
	/// If the key does not belong to this schema.
	pub fn node(&self, key: SchemaKey) -> &SchemaNode {
		&self.nodes[key.idx]
	}

	/// The JSON text this schema was parsed from
	pub fn json(&self) -> &str {
		&self.json
	}
}

impl std::ops::Index<SchemaKey> for Schema {
	type Output = SchemaNode;
	fn index(&self, key: SchemaKey) -> &Self::Output {
		&self.nodes[key.idx]
	}
}

impl std::str::FromStr for Schema {
	type Err = SchemaError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parsing::parse(s)
	}
}

/// The location of a node in a [`Schema`]
///
/// Obtained by parsing a schema, or by indexing into the children of another
/// node ([`Array::items`], [`Map::values`], [`Union::variants`],
/// [`RecordField::type_`]).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaKey {
	idx: usize,
}
impl SchemaKey {
	pub(crate) const fn from_idx(idx: usize) -> Self {
		Self { idx }
	}
	pub(crate) const fn idx(self) -> usize {
		self.idx
	}
}
impl std::fmt::Debug for SchemaKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&self.idx, f)
	}
}

/// A node of a [`Schema`] arena
///
/// See the [Avro specification](https://avro.apache.org/docs/current/specification/)
/// for the meaning of each variant.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum SchemaNode {
	Null,
	Boolean,
	Int,
	Long,
	Float,
	Double,
	Bytes,
	String,
	Array(Array),
	Map(Map),
	Union(Union),
	Record(Record),
	Enum(Enum),
	Fixed(Fixed),
}

impl SchemaNode {
	/// The fullname of this node, if it is a named type (record/enum/fixed)
	pub fn name(&self) -> Option<&Name> {
		match self {
			SchemaNode::Record(r) => Some(&r.name),
			SchemaNode::Enum(e) => Some(&e.name),
			SchemaNode::Fixed(f) => Some(&f.name),
			_ => None,
		}
	}

	/// A short, human readable description of the kind of node this is, for
	/// use in error messages (e.g. `"int"`, `"record"`, `"union"`)
	pub fn kind_name(&self) -> &'static str {
		match self {
			SchemaNode::Null => "null",
			SchemaNode::Boolean => "boolean",
			SchemaNode::Int => "int",
			SchemaNode::Long => "long",
			SchemaNode::Float => "float",
			SchemaNode::Double => "double",
			SchemaNode::Bytes => "bytes",
			SchemaNode::String => "string",
			SchemaNode::Array(_) => "array",
			SchemaNode::Map(_) => "map",
			SchemaNode::Union(_) => "union",
			SchemaNode::Record(_) => "record",
			SchemaNode::Enum(_) => "enum",
			SchemaNode::Fixed(_) => "fixed",
		}
	}
}

/// Component of [`SchemaNode::Array`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Array {
	/// The schema of each element of the array
	pub items: SchemaKey,
}

/// Component of [`SchemaNode::Map`]
///
/// Avro map keys are always strings.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Map {
	/// The schema of each value of the map
	pub values: SchemaKey,
}

/// Component of [`SchemaNode::Union`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Union {
	/// The schema of each branch of the union, in declaration order - this
	/// order is what the zero-based discriminant indexes into on the wire.
	pub variants: Vec<SchemaKey>,
}

/// Component of [`SchemaNode::Record`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Record {
	/// The fullname of the record
	pub name: Name,
	/// Fields, in declared order - this order is the binary encoding order.
	pub fields: Vec<RecordField>,
	/// Alternate fullnames this record may be known by - recorded but never
	/// consulted, since schema evolution (resolving a reader alias against a
	/// writer fullname) is not implemented.
	pub aliases: Vec<String>,
}

impl Record {
	/// Find a field by name
	pub fn field(&self, name: &str) -> Option<(usize, &RecordField)> {
		self.fields
			.iter()
			.enumerate()
			.find(|(_, f)| f.name == name)
	}
}

/// Component of [`Record`]
///
/// Only [`name`](Self::name) and [`type_`](Self::type_) affect the binary
/// encoding; [`default`](Self::default), [`order`](Self::order) and
/// [`aliases`](Self::aliases) are parsed and stored, never consulted.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct RecordField {
	pub name: String,
	pub type_: SchemaKey,
	pub default: Option<serde_json::Value>,
	pub order: FieldOrder,
	pub aliases: Vec<String>,
}

/// Component of [`RecordField`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldOrder {
	#[default]
	Ascending,
	Descending,
	Ignore,
}

/// Component of [`SchemaNode::Enum`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Enum {
	pub name: Name,
	/// Symbols in declared order - this order defines each symbol's index,
	/// which is what's used on the wire.
	pub symbols: Vec<String>,
	/// Alternate fullnames this enum may be known by - recorded but never
	/// consulted, since schema evolution is not implemented.
	pub aliases: Vec<String>,
}

impl Enum {
	/// The index of a symbol, if present
	pub fn index_of(&self, symbol: &str) -> Option<usize> {
		self.symbols.iter().position(|s| s == symbol)
	}
}

/// Component of [`SchemaNode::Fixed`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Fixed {
	pub name: Name,
	pub size: usize,
	/// Alternate fullnames this fixed type may be known by - recorded but
	/// never consulted, since schema evolution is not implemented.
	pub aliases: Vec<String>,
}

/// The fullname of a record/enum/fixed: `namespace.name`, or just `name` if
/// there is no namespace
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name {
	fully_qualified_name: String,
	namespace_delimiter_idx: Option<usize>,
}

impl std::fmt::Debug for Name {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Debug::fmt(&self.fully_qualified_name, f)
	}
}
impl std::fmt::Display for Name {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.fully_qualified_name)
	}
}

impl Name {
	/// The rightmost component of the fully qualified name
	///
	/// e.g. in `a.b.c` it's `c`
	pub fn name(&self) -> &str {
		match self.namespace_delimiter_idx {
			None => &self.fully_qualified_name,
			Some(delimiter_idx) => &self.fully_qualified_name[delimiter_idx + 1..],
		}
	}

	/// The namespace component of the fully qualified name
	///
	/// e.g. in `a.b.c` it's `a.b`
	pub fn namespace(&self) -> Option<&str> {
		self.namespace_delimiter_idx
			.map(|idx| &self.fully_qualified_name[..idx])
	}

	/// The fully qualified name
	///
	/// e.g. in `a.b.c` it's `a.b.c`
	pub fn fully_qualified_name(&self) -> &str {
		&self.fully_qualified_name
	}

	/// Build a [`Name`] from a fully qualified name
	///
	/// Side note if doing weird stuff: If the only `.` in the fully qualified
	/// name is at the beginning of the string, it will be stripped, that is,
	/// we will parse `namespace: None, name: "anything_behind_the_dot"`. This
	/// is for consistency with the parsing logic, but that would imply that
	/// what would be returned by
	/// [`fully_qualified_name`](Name::fully_qualified_name) is not equal to
	/// what was provided here, because it would not contain the dot.
	pub fn from_fully_qualified_name(fully_qualified_name: impl Into<String>) -> Self {
		fn non_generic_inner(mut fully_qualified_name: String) -> Name {
			Name {
				namespace_delimiter_idx: match fully_qualified_name.rfind('.') {
					Some(0) => {
						// Let's parse ".x" as {namespace: None, name: "x"}
						fully_qualified_name.remove(0);
						None
					}
					other => other,
				},
				fully_qualified_name,
			}
		}
		non_generic_inner(fully_qualified_name.into())
	}

	/// Build a [`Name`] from an already-split (namespace, name) pair, neither
	/// of which contains a `.`
	pub(crate) fn new(namespace: Option<&str>, name: &str) -> Self {
		match namespace {
			None => Self {
				fully_qualified_name: name.to_owned(),
				namespace_delimiter_idx: None,
			},
			Some(namespace) => Self {
				fully_qualified_name: format!("{namespace}.{name}"),
				namespace_delimiter_idx: Some(namespace.len()),
			},
		}
	}
}
