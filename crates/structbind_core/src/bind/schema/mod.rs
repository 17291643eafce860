use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::bind::{EnumValue, Record, Struct, Value};

mod file;

pub use file::SchemaSet;

/// Declared type of one field.
#[derive(Debug, Clone)]
pub enum FieldType {
	/// Accepts any value.
	Any,
	/// Boolean.
	Bool,
	/// Signed or unsigned integer.
	Int,
	/// Float; integers widen.
	Float,
	/// String.
	String,
	/// Untyped list.
	List,
	/// Untyped map.
	Map,
	/// Nested struct type.
	Struct(Arc<StructSchema>),
	/// Enum type.
	Enum(Arc<EnumSchema>),
}

impl FieldType {
	/// Parse a builtin type name as written in schema files.
	pub fn builtin(name: &str) -> Option<Self> {
		Some(match name {
			"any" => Self::Any,
			"bool" => Self::Bool,
			"int" => Self::Int,
			"float" => Self::Float,
			"string" => Self::String,
			"list" => Self::List,
			"map" => Self::Map,
			_ => return None,
		})
	}

	/// Whether this is a builtin (non-struct, non-enum) type.
	pub fn is_builtin(&self) -> bool {
		!matches!(self, Self::Struct(_) | Self::Enum(_))
	}

	/// Type name: builtin keyword or declared struct/enum name.
	pub fn name(&self) -> &str {
		match self {
			Self::Any => "any",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::List => "list",
			Self::Map => "map",
			Self::Struct(schema) => schema.name(),
			Self::Enum(schema) => schema.name(),
		}
	}

	/// Whether a resolved value may be stored in a field of this type.
	pub fn accepts(&self, value: &Value) -> bool {
		match (self, value) {
			(Self::Any, _) => true,
			(Self::Bool, Value::Bool(_)) => true,
			(Self::Int, Value::I64(_) | Value::U64(_)) => true,
			(Self::Float, Value::F64(_) | Value::I64(_) | Value::U64(_)) => true,
			(Self::String, Value::String(_)) => true,
			(Self::List, Value::List(_)) => true,
			(Self::Map, Value::Map(_)) => true,
			(Self::Struct(schema), Value::Struct(item)) => ptr::eq(item.schema(), &**schema),
			(Self::Enum(schema), Value::Enum(item)) => item.enum_name() == schema.name() && schema.case(item.label()).is_some(),
			_ => false,
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One field declaration.
#[derive(Debug, Clone)]
pub struct FieldSchema {
	/// Declared field name.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: FieldType,
}

impl FieldSchema {
	/// Create a field declaration.
	pub fn new(name: &str, ty: FieldType) -> Self {
		Self { name: name.into(), ty }
	}
}

#[derive(Debug, Clone, Copy)]
enum Factory {
	Native(fn() -> Box<dyn Struct>),
	Record,
}

/// Descriptor table of one struct type: name and fields in declaration order.
#[derive(Debug)]
pub struct StructSchema {
	name: Box<str>,
	fields: Vec<FieldSchema>,
	factory: Factory,
}

impl StructSchema {
	/// Descriptor for a compile-time type; `factory` builds an empty instance.
	pub fn native(name: &str, fields: Vec<FieldSchema>, factory: fn() -> Box<dyn Struct>) -> Self {
		Self {
			name: name.into(),
			fields,
			factory: Factory::Native(factory),
		}
	}

	/// Descriptor whose instances are [`Record`]s.
	pub fn record(name: &str, fields: Vec<FieldSchema>) -> Self {
		Self {
			name: name.into(),
			fields,
			factory: Factory::Record,
		}
	}

	/// Struct type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldSchema] {
		&self.fields
	}

	/// Field by index.
	pub fn field(&self, index: usize) -> Option<&FieldSchema> {
		self.fields.get(index)
	}

	/// Index of the field with this exact declared name.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| &*field.name == name)
	}

	/// Whether instances are schema-driven records.
	pub fn is_record(&self) -> bool {
		matches!(self.factory, Factory::Record)
	}
}

/// Create an empty instance of the struct type described by `schema`.
pub fn instantiate(schema: &Arc<StructSchema>) -> Box<dyn Struct> {
	match schema.factory {
		Factory::Native(make) => make(),
		Factory::Record => Box::new(Record::new(Arc::clone(schema))),
	}
}

/// One enum case: label and underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
	/// Case label.
	pub label: Box<str>,
	/// Underlying value.
	pub value: Value,
}

impl EnumCase {
	/// Case whose underlying value is its label.
	pub fn labeled(label: &str) -> Self {
		Self::new(label, Value::String(label.to_owned()))
	}

	/// Case with an explicit underlying value.
	pub fn new(label: &str, value: Value) -> Self {
		Self { label: label.into(), value }
	}
}

/// Descriptor of one enum type.
#[derive(Debug)]
pub struct EnumSchema {
	name: Box<str>,
	cases: Vec<EnumCase>,
}

impl EnumSchema {
	/// Create an enum descriptor.
	pub fn new(name: &str, cases: Vec<EnumCase>) -> Self {
		Self { name: name.into(), cases }
	}

	/// Enum type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Cases in declaration order.
	pub fn cases(&self) -> &[EnumCase] {
		&self.cases
	}

	/// Case by label.
	pub fn case(&self, label: &str) -> Option<&EnumCase> {
		self.cases.iter().find(|case| &*case.label == label)
	}

	/// Resolve a label to an enum value.
	pub fn resolve(&self, label: &str) -> Option<EnumValue> {
		self.case(label).map(|case| EnumValue::new(&self.name, &case.label, case.value.clone()))
	}
}
