use avro_fast_codec::Codec;

#[test]
fn prevents_stack_overflow() {
	let codec = Codec::from_str(
		r#"{
			"type": "record",
			"name": "Test",
			"fields": [
				{"name": "b", "type": ["null", "Test"]}
			]
		}"#,
	)
	.unwrap();

	struct LongReader;
	impl std::io::Read for LongReader {
		fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
			// Every union discriminant reads as `1` (the recursive branch),
			// so this never stops recursing on its own.
			buf.fill(2);
			Ok(buf.len())
		}
	}

	let err = codec.decode_reader(LongReader).unwrap_err();
	// The message is prefixed with one schema-position segment per
	// unwound stack frame, so check for the root cause rather than the
	// exact string.
	assert!(err
		.to_string()
		.contains("Decoding recursion limit reached (stack overflow prevention)"));
}
