use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::bind::{ArrayOptions, Struct, to_map};

/// Dynamic value flowing between input maps, instances and output maps.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker. Never stored in a field.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar too large for `I64`.
	U64(u64),
	/// Floating point scalar.
	F64(f64),
	/// UTF-8 string.
	String(String),
	/// Ordered sequence.
	List(Vec<Value>),
	/// Ordered string-keyed mapping.
	Map(Map),
	/// Nested struct instance.
	Struct(Box<dyn Struct>),
	/// Resolved enum case.
	Enum(EnumValue),
}

impl Value {
	/// Stable lowercase kind label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::I64(_) | Self::U64(_) => "int",
			Self::F64(_) => "float",
			Self::String(_) => "string",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Struct(_) => "struct",
			Self::Enum(_) => "enum",
		}
	}

	/// Whether this is the null marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Read an integer payload as `i64` when it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Borrow the map payload.
	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow the nested struct payload.
	pub fn as_struct(&self) -> Option<&dyn Struct> {
		match self {
			Self::Struct(value) => Some(value.as_ref()),
			_ => None,
		}
	}

	/// Borrow the enum payload.
	pub fn as_enum(&self) -> Option<&EnumValue> {
		match self {
			Self::Enum(value) => Some(value),
			_ => None,
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(number) => {
				if let Some(value) = number.as_i64() {
					Self::I64(value)
				} else if let Some(value) = number.as_u64() {
					Self::U64(value)
				} else {
					Self::F64(number.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(value) => Self::String(value),
			serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(entries) => Self::Map(entries.into_iter().map(|(key, value)| (key, Self::from(value))).collect()),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::I64(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Self::Map(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::List(value)
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::I64(value) => serializer.serialize_i64(*value),
			Self::U64(value) => serializer.serialize_u64(*value),
			Self::F64(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::List(items) => serializer.collect_seq(items),
			Self::Map(map) => map.serialize(serializer),
			Self::Struct(item) => to_map(item.as_ref(), &ArrayOptions::default()).serialize(serializer),
			Self::Enum(item) => serializer.serialize_str(item.label()),
		}
	}
}

/// Ordered string-keyed mapping.
///
/// Keeps insertion order. Inserting an existing key replaces its value in
/// place. Equality compares entries in order.
#[derive(Debug, Clone, Default)]
pub struct Map {
	entries: IndexMap<String, Value>,
}

impl Map {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty map with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: IndexMap::with_capacity(capacity),
		}
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Insert or replace, returning the previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.entries.insert(key.into(), value)
	}

	/// Remove a key, returning its value. Later entries keep their order.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.shift_remove(key)
	}

	/// Iterate entries in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Iterate keys in order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

impl PartialEq for Map {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut map = Self::with_capacity(iter.size_hint().0);
		for (key, value) in iter {
			map.insert(key, value);
		}
		map
	}
}

impl IntoIterator for Map {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl Serialize for Map {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_map(self.iter())
	}
}

/// One resolved enum case.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
	enum_name: Box<str>,
	label: Box<str>,
	value: Box<Value>,
}

impl EnumValue {
	/// Create an enum value from its enum name, case label and underlying value.
	pub fn new(enum_name: &str, label: &str, value: Value) -> Self {
		Self {
			enum_name: enum_name.into(),
			label: label.into(),
			value: Box::new(value),
		}
	}

	/// Owning enum type name.
	pub fn enum_name(&self) -> &str {
		&self.enum_name
	}

	/// Case label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Underlying case value.
	pub fn value(&self) -> &Value {
		&self.value
	}
}
