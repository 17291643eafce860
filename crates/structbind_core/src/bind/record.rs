use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::bind::{AccessorError, Diagnostic, Map, MergeOptions, Struct, StructSchema, Value, display_string, merge};

/// Struct instance whose descriptor table is runtime data.
///
/// Field values are stored in declaration order. Direct writes are checked
/// against the declared field type.
#[derive(Debug, Clone)]
pub struct Record {
	schema: Arc<StructSchema>,
	slots: Vec<Option<Value>>,
}

impl Record {
	/// Create a record with every field unset.
	pub fn new(schema: Arc<StructSchema>) -> Self {
		let slots = vec![None; schema.fields().len()];
		Self { schema, slots }
	}

	/// Create a record and merge `data` into it.
	pub fn from_map(schema: Arc<StructSchema>, data: Map, opt: &MergeOptions) -> (Self, Vec<Diagnostic>) {
		let mut out = Self::new(schema);
		let diagnostics = merge(&mut out, data, opt);
		(out, diagnostics)
	}

	/// Shared descriptor table.
	pub fn schema_arc(&self) -> &Arc<StructSchema> {
		&self.schema
	}
}

impl Struct for Record {
	fn schema(&self) -> &StructSchema {
		&self.schema
	}

	fn read_field(&self, index: usize) -> Option<Value> {
		self.slots.get(index).cloned().flatten()
	}

	fn write_field(&mut self, index: usize, value: Option<Value>) -> Result<(), AccessorError> {
		let field = self.schema.field(index).ok_or(AccessorError::NoSuchField { index })?;
		if let Some(value) = &value
			&& !field.ty.accepts(value)
		{
			return Err(AccessorError::TypeMismatch {
				expected: field.ty.name().to_owned(),
				got: value.kind(),
			});
		}
		self.slots[index] = value;
		Ok(())
	}

	fn clone_boxed(&self) -> Box<dyn Struct> {
		Box::new(self.clone())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}

impl fmt::Display for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&display_string(self))
	}
}
