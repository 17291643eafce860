use std::any::Any;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::bind::{
	AccessorError, Diagnostic, EnumSchema, EnumValue, FieldType, Map, MergeOptions, Result, StructSchema, Value, display_string, merge, merge_json,
};

/// Instance side of the descriptor table.
///
/// Fields are addressed by their index in [`Struct::schema`]. Implemented by
/// [`structure!`](crate::structure) types and by [`Record`](crate::bind::Record).
pub trait Struct: Any + fmt::Debug + Send + Sync {
	/// Descriptor table of this instance's type.
	fn schema(&self) -> &StructSchema;

	/// Read a field directly. `None` when unset.
	fn read_field(&self, index: usize) -> Option<Value>;

	/// Write a field directly. The value has already been resolved against
	/// the declared type; `None` clears the field.
	fn write_field(&mut self, index: usize, value: Option<Value>) -> std::result::Result<(), AccessorError>;

	/// Whether the field has an explicit getter.
	fn has_getter(&self, _index: usize) -> bool {
		false
	}

	/// Whether the field has an explicit setter.
	fn has_setter(&self, _index: usize) -> bool {
		false
	}

	/// Read through the explicit getter, falling back to [`Struct::read_field`].
	fn call_getter(&self, index: usize) -> std::result::Result<Option<Value>, AccessorError> {
		Ok(self.read_field(index))
	}

	/// Write through the explicit setter, falling back to [`Struct::write_field`].
	fn call_setter(&mut self, index: usize, value: Option<Value>) -> std::result::Result<(), AccessorError> {
		self.write_field(index, value)
	}

	/// Clone into a new boxed instance.
	fn clone_boxed(&self) -> Box<dyn Struct>;

	/// Upcast for downcasting to the concrete type.
	fn as_any(&self) -> &dyn Any;

	/// Owned upcast for downcasting to the concrete type.
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for Box<dyn Struct> {
	fn clone(&self) -> Self {
		self.clone_boxed()
	}
}

impl PartialEq for dyn Struct {
	fn eq(&self, other: &Self) -> bool {
		ptr::eq(self.schema(), other.schema()) && (0..self.schema().fields().len()).all(|index| self.read_field(index) == other.read_field(index))
	}
}

impl fmt::Display for dyn Struct {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&display_string(self))
	}
}

/// Compile-time struct type with a process-wide descriptor table.
pub trait StructType: Struct + Default + Sized {
	/// Shared descriptor table for this type.
	fn type_schema() -> &'static Arc<StructSchema>;

	/// Build an instance from a map, discarding diagnostics.
	fn from_map(data: Map) -> Self {
		Self::from_map_with(data, &MergeOptions::default()).0
	}

	/// Build an instance from a map, returning what was skipped.
	///
	/// Diagnostics of nested struct fields carry a dotted path. Elements of
	/// `list` fields are converted when the field is assigned, so input they
	/// skip is logged at `debug` and not returned here.
	fn from_map_with(data: Map, opt: &MergeOptions) -> (Self, Vec<Diagnostic>) {
		let mut out = Self::default();
		let diagnostics = merge(&mut out, data, opt);
		(out, diagnostics)
	}

	/// Build an instance from JSON object text.
	fn from_json(json: &str) -> Result<(Self, Vec<Diagnostic>)> {
		let mut out = Self::default();
		let diagnostics = merge_json(&mut out, json, &MergeOptions::default())?;
		Ok((out, diagnostics))
	}
}

/// Conversion between a Rust field type and [`Value`].
pub trait Bind: Sized {
	/// Declared type reported in the descriptor table.
	fn field_type() -> FieldType;

	/// Unpack a value already resolved against [`Bind::field_type`].
	fn from_value(value: Value) -> std::result::Result<Self, AccessorError>;

	/// Pack into a value.
	fn to_value(&self) -> Value;
}

/// Compile-time enum with string case labels.
pub trait Enumerable: Copy + 'static {
	/// Shared enum descriptor.
	fn enum_schema() -> &'static Arc<EnumSchema>;

	/// Case label.
	fn label(self) -> &'static str;

	/// Case by label.
	fn from_label(label: &str) -> Option<Self>;
}

fn mismatch(expected: impl Into<String>, value: &Value) -> AccessorError {
	AccessorError::TypeMismatch {
		expected: expected.into(),
		got: value.kind(),
	}
}

impl Bind for bool {
	fn field_type() -> FieldType {
		FieldType::Bool
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::Bool(value) => Ok(value),
			other => Err(mismatch("bool", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}
}

impl Bind for i64 {
	fn field_type() -> FieldType {
		FieldType::Int
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		value.as_i64().ok_or_else(|| mismatch("int", &value))
	}

	fn to_value(&self) -> Value {
		Value::I64(*self)
	}
}

impl Bind for i32 {
	fn field_type() -> FieldType {
		FieldType::Int
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		value.as_i64().and_then(|item| i32::try_from(item).ok()).ok_or_else(|| mismatch("int", &value))
	}

	fn to_value(&self) -> Value {
		Value::I64(i64::from(*self))
	}
}

impl Bind for u32 {
	fn field_type() -> FieldType {
		FieldType::Int
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		value.as_i64().and_then(|item| u32::try_from(item).ok()).ok_or_else(|| mismatch("int", &value))
	}

	fn to_value(&self) -> Value {
		Value::I64(i64::from(*self))
	}
}

impl Bind for u64 {
	fn field_type() -> FieldType {
		FieldType::Int
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::U64(value) => Ok(value),
			Value::I64(value) if value >= 0 => Ok(value as u64),
			other => Err(mismatch("int", &other)),
		}
	}

	fn to_value(&self) -> Value {
		match i64::try_from(*self) {
			Ok(value) => Value::I64(value),
			Err(_) => Value::U64(*self),
		}
	}
}

impl Bind for f64 {
	fn field_type() -> FieldType {
		FieldType::Float
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::F64(value) => Ok(value),
			Value::I64(value) => Ok(value as f64),
			Value::U64(value) => Ok(value as f64),
			other => Err(mismatch("float", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::F64(*self)
	}
}

impl Bind for String {
	fn field_type() -> FieldType {
		FieldType::String
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::String(value) => Ok(value),
			other => Err(mismatch("string", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::String(self.clone())
	}
}

impl<T: Bind> Bind for Vec<T> {
	fn field_type() -> FieldType {
		FieldType::List
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(mismatch("list", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::List(self.iter().map(Bind::to_value).collect())
	}
}

impl Bind for Map {
	fn field_type() -> FieldType {
		FieldType::Map
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		match value {
			Value::Map(value) => Ok(value),
			other => Err(mismatch("map", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::Map(self.clone())
	}
}

impl Bind for Value {
	fn field_type() -> FieldType {
		FieldType::Any
	}

	fn from_value(value: Value) -> std::result::Result<Self, AccessorError> {
		Ok(value)
	}

	fn to_value(&self) -> Value {
		self.clone()
	}
}

/// Factory used by generated descriptor tables.
pub fn boxed_default<S: Struct + Default>() -> Box<dyn Struct> {
	Box::new(S::default())
}

/// Unpack a nested struct value into `S`.
///
/// Accepts an instance of `S` or a map, which is merged into a fresh
/// instance. Diagnostics of that merge are logged and dropped, which is
/// how struct elements inside `Vec<S>` fields are built.
pub fn struct_from_value<S: StructType>(value: Value) -> std::result::Result<S, AccessorError> {
	match value {
		Value::Struct(item) => item.into_any().downcast::<S>().map(|item| *item).map_err(|_| AccessorError::TypeMismatch {
			expected: S::type_schema().name().to_owned(),
			got: "struct",
		}),
		Value::Map(data) => {
			let (out, diagnostics) = S::from_map_with(data, &MergeOptions::default());
			for diagnostic in &diagnostics {
				tracing::debug!(type_name = S::type_schema().name(), %diagnostic, "nested conversion skipped input");
			}
			Ok(out)
		}
		other => Err(mismatch(S::type_schema().name(), &other)),
	}
}

/// Unpack an enum case value or label into `E`.
pub fn enum_from_value<E: Enumerable>(value: Value) -> std::result::Result<E, AccessorError> {
	let schema = E::enum_schema();
	let label = match &value {
		Value::Enum(item) if item.enum_name() == schema.name() => item.label(),
		Value::String(label) => label.as_str(),
		other => return Err(mismatch(schema.name(), other)),
	};
	E::from_label(label).ok_or_else(|| AccessorError::UnknownCase {
		enum_name: schema.name().to_owned(),
		label: label.to_owned(),
	})
}

/// Pack an enum case into a value.
pub fn enum_to_value<E: Enumerable>(item: E) -> Value {
	let schema = E::enum_schema();
	match schema.resolve(item.label()) {
		Some(value) => Value::Enum(value),
		None => Value::Enum(EnumValue::new(schema.name(), item.label(), Value::String(item.label().to_owned()))),
	}
}
