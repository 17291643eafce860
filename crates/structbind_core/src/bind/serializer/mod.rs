use std::fmt::Write as _;

use serde::Serialize;

use crate::bind::{Map, Result, Struct, Value, to_wire_style};

/// Controls instance-to-map output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
	/// Emit keys in wire style (`user_name`) instead of declared style.
	pub wire_style: bool,
	/// Render nested structs as maps and enum values as their labels.
	pub flatten_nested: bool,
}

impl Default for ArrayOptions {
	fn default() -> Self {
		Self {
			wire_style: true,
			flatten_nested: true,
		}
	}
}

impl ArrayOptions {
	/// Declared-name keys, nested values flattened.
	pub fn declared() -> Self {
		Self {
			wire_style: false,
			flatten_nested: true,
		}
	}

	/// Declared-name keys, values passed through unchanged.
	pub fn raw() -> Self {
		Self {
			wire_style: false,
			flatten_nested: false,
		}
	}
}

/// Controls JSON text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
	/// Emit non-ASCII characters as `\uXXXX` escapes.
	pub escape_unicode: bool,
	/// Indent the output.
	pub pretty: bool,
}

/// Produce an ordered map from `item` in field declaration order.
///
/// Unset fields and nulls are omitted. A field whose getter fails is
/// omitted as well.
pub fn to_map(item: &dyn Struct, opt: &ArrayOptions) -> Map {
	let schema = item.schema();
	let mut out = Map::with_capacity(schema.fields().len());

	for (index, field) in schema.fields().iter().enumerate() {
		let read = if item.has_getter(index) {
			item.call_getter(index)
		} else {
			Ok(item.read_field(index))
		};
		let value = match read {
			Ok(Some(value)) if !value.is_null() => value,
			Ok(_) => continue,
			Err(error) => {
				tracing::debug!(type_name = schema.name(), field = &*field.name, %error, "getter failed; field omitted");
				continue;
			}
		};

		let key = if opt.wire_style { to_wire_style(&field.name) } else { field.name.to_string() };
		let value = if opt.flatten_nested { flatten(value, opt) } else { value };
		out.insert(key, value);
	}

	out
}

fn flatten(value: Value, opt: &ArrayOptions) -> Value {
	match value {
		Value::Struct(item) => Value::Map(to_map(item.as_ref(), opt)),
		Value::Enum(item) => Value::String(item.label().to_owned()),
		other => other,
	}
}

/// Encode `item` as JSON using wire-style keys and flattened nested values.
pub fn to_json(item: &dyn Struct, opt: &JsonOptions) -> Result<String> {
	encode_json(&to_map(item, &ArrayOptions::default()), opt)
}

/// Encode any serializable value as JSON text.
pub fn encode_json<T: Serialize + ?Sized>(value: &T, opt: &JsonOptions) -> Result<String> {
	let text = if opt.pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	Ok(if opt.escape_unicode { escape_non_ascii(&text) } else { text })
}

/// `"<TypeName> (<json>)"`; the JSON part is `{}` if encoding fails.
pub fn display_string(item: &dyn Struct) -> String {
	let json = to_json(item, &JsonOptions::default()).unwrap_or_else(|error| {
		tracing::debug!(type_name = item.schema().name(), %error, "display encoding failed");
		String::from("{}")
	});
	format!("{} ({json})", item.schema().name())
}

// Non-ASCII only appears inside JSON string literals, so escaping every
// such char keeps the document valid.
fn escape_non_ascii(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut units = [0u16; 2];
	for ch in text.chars() {
		if ch.is_ascii() {
			out.push(ch);
			continue;
		}
		for unit in ch.encode_utf16(&mut units).iter() {
			let _ = write!(out, "\\u{unit:04x}");
		}
	}
	out
}
