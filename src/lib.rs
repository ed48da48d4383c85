//! # Getting started
//!
//! ```
//! let codec = avro_fast_codec::Codec::from_str(
//! 	r#"
//! 	{
//! 		"namespace": "test",
//! 		"type": "record",
//! 		"name": "Test",
//! 		"fields": [
//! 			{
//! 				"type": {
//! 					"type": "string"
//! 				},
//! 				"name": "field"
//! 			}
//! 		]
//! 	}
//! 	"#,
//! )
//! .expect("Failed to compile schema");
//!
//! let value = avro_fast_codec::Value::Record(vec![(
//! 	"field".to_owned(),
//! 	avro_fast_codec::Value::String("foo".to_owned()),
//! )]);
//! let avro_datum = &[6, 102, 111, 111];
//!
//! // Avro datum decoding
//! assert_eq!(codec.decode(avro_datum).expect("Failed to decode"), value);
//!
//! // Avro datum encoding
//! assert_eq!(codec.encode(&value).expect("Failed to encode"), avro_datum);
//! ```
//!
//! # What this crate is
//!
//! This is a schema compiler and binary datum codec for the
//! [Avro specification](https://avro.apache.org/docs/current/specification/):
//! it turns a JSON schema document into a validated, navigable [`Schema`], and
//! uses that schema to encode [`Value`]s to Avro's binary encoding and decode
//! them back.
//!
//! [`Value`] is a plain tagged enum rather than a `serde`-derived Rust type,
//! so a schema read at runtime (from a config file, a schema registry...) is
//! just as usable as one known ahead of time: there is no Rust struct to
//! derive against, because none needs to exist.
//!
//! Object container files, the single-object encoding, and schema evolution
//! (reader/writer schema resolution, aliases) are out of scope - this crate
//! only handles one schema, used both to write and to read a datum.
//!
//! # An idiomatic Rust implementation
//!
//! Named-type references in Avro schemas can point forward or can form
//! cycles (a record can recursively contain itself), so the natural shape of
//! a compiled schema is not a tree but a graph. Rather than reach for
//! unsafe self-referential pointers or reference counting, [`Schema`] stores
//! its nodes in a flat arena and represents references as plain
//! [`SchemaKey`](schema::SchemaKey) indices - the usual way to express this
//! kind of graph safely in Rust.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod de;
mod codec;
pub mod schema;
pub mod ser;
mod value;

pub use codec::Codec;
pub use schema::Schema;
pub use value::Value;
