use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::bind::{BindError, EnumCase, EnumSchema, FieldSchema, FieldType, Record, Result, StructSchema, Value};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchemaFile {
	#[serde(default)]
	enums: Vec<RawEnum>,
	#[serde(default)]
	structs: Vec<RawStruct>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
	name: String,
	cases: Vec<RawCase>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCase {
	Label(String),
	Valued { label: String, value: serde_json::Value },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStruct {
	name: String,
	fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
	name: String,
	#[serde(rename = "type")]
	ty: String,
}

/// Struct and enum descriptors loaded from a JSON schema file.
#[derive(Debug)]
pub struct SchemaSet {
	structs: Vec<Arc<StructSchema>>,
	enums: Vec<Arc<EnumSchema>>,
}

impl SchemaSet {
	/// Read and resolve a schema file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path.as_ref())?;
		Self::parse(&text)
	}

	/// Parse and resolve schema JSON text.
	///
	/// Struct fields may reference types declared later in the file. Builtin
	/// type names are `any`, `bool`, `int`, `float`, `string`, `list` and
	/// `map`.
	pub fn parse(json: &str) -> Result<Self> {
		let raw: RawSchemaFile = serde_json::from_str(json)?;

		let enums = resolve_enums(raw.enums)?;
		let structs = resolve_structs(&raw.structs, &enums)?;

		tracing::debug!(structs = structs.len(), enums = enums.len(), "schema loaded");
		Ok(Self { structs, enums })
	}

	/// Struct descriptors in file order.
	pub fn structs(&self) -> &[Arc<StructSchema>] {
		&self.structs
	}

	/// Enum descriptors in file order.
	pub fn enums(&self) -> &[Arc<EnumSchema>] {
		&self.enums
	}

	/// Struct descriptor by name.
	pub fn struct_by_name(&self, name: &str) -> Option<&Arc<StructSchema>> {
		self.structs.iter().find(|item| item.name() == name)
	}

	/// Enum descriptor by name.
	pub fn enum_by_name(&self, name: &str) -> Option<&Arc<EnumSchema>> {
		self.enums.iter().find(|item| item.name() == name)
	}

	/// Create an empty record of the named struct type.
	pub fn record(&self, name: &str) -> Result<Record> {
		let schema = self.struct_by_name(name).ok_or_else(|| BindError::SchemaTypeNotFound { name: name.to_owned() })?;
		Ok(Record::new(Arc::clone(schema)))
	}
}

fn resolve_enums(raw: Vec<RawEnum>) -> Result<Vec<Arc<EnumSchema>>> {
	let mut enums: Vec<Arc<EnumSchema>> = Vec::with_capacity(raw.len());
	for item in raw {
		check_type_name(&item.name, enums.iter().any(|known| known.name() == item.name))?;

		let mut cases: Vec<EnumCase> = Vec::with_capacity(item.cases.len());
		for case in item.cases {
			let case = match case {
				RawCase::Label(label) => EnumCase::labeled(&label),
				RawCase::Valued { label, value } => EnumCase::new(&label, Value::from(value)),
			};
			if cases.iter().any(|known| known.label == case.label) {
				return Err(BindError::SchemaDuplicateCase {
					type_name: item.name,
					label: case.label.into(),
				});
			}
			cases.push(case);
		}

		enums.push(Arc::new(EnumSchema::new(&item.name, cases)));
	}
	Ok(enums)
}

fn resolve_structs(raw: &[RawStruct], enums: &[Arc<EnumSchema>]) -> Result<Vec<Arc<StructSchema>>> {
	let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(raw.len());
	for (idx, item) in raw.iter().enumerate() {
		let clashes = by_name.contains_key(item.name.as_str()) || enums.iter().any(|known| known.name() == item.name);
		check_type_name(&item.name, clashes)?;
		by_name.insert(&item.name, idx);
	}

	let mut state = ResolveState {
		raw,
		by_name,
		enums,
		resolved: vec![None; raw.len()],
		visiting: vec![false; raw.len()],
	};
	for idx in 0..raw.len() {
		state.resolve(idx)?;
	}

	Ok(state.resolved.into_iter().flatten().collect())
}

fn check_type_name(name: &str, already_declared: bool) -> Result<()> {
	if already_declared || FieldType::builtin(name).is_some() {
		return Err(BindError::SchemaDuplicateType { name: name.to_owned() });
	}
	Ok(())
}

struct ResolveState<'a> {
	raw: &'a [RawStruct],
	by_name: HashMap<&'a str, usize>,
	enums: &'a [Arc<EnumSchema>],
	resolved: Vec<Option<Arc<StructSchema>>>,
	visiting: Vec<bool>,
}

impl ResolveState<'_> {
	fn resolve(&mut self, idx: usize) -> Result<Arc<StructSchema>> {
		if let Some(done) = &self.resolved[idx] {
			return Ok(Arc::clone(done));
		}

		let raw = self.raw;
		let item = &raw[idx];
		if self.visiting[idx] {
			return Err(BindError::SchemaRecursiveType { name: item.name.clone() });
		}
		self.visiting[idx] = true;

		let mut fields: Vec<FieldSchema> = Vec::with_capacity(item.fields.len());
		for field in &item.fields {
			if fields.iter().any(|known| *known.name == *field.name) {
				return Err(BindError::SchemaDuplicateField {
					type_name: item.name.clone(),
					field: field.name.clone(),
				});
			}
			let ty = self.field_type(&field.ty)?;
			fields.push(FieldSchema::new(&field.name, ty));
		}

		self.visiting[idx] = false;
		let schema = Arc::new(StructSchema::record(&item.name, fields));
		self.resolved[idx] = Some(Arc::clone(&schema));
		Ok(schema)
	}

	fn field_type(&mut self, name: &str) -> Result<FieldType> {
		if let Some(ty) = FieldType::builtin(name) {
			return Ok(ty);
		}
		if let Some(&idx) = self.by_name.get(name) {
			return Ok(FieldType::Struct(self.resolve(idx)?));
		}
		if let Some(item) = self.enums.iter().find(|item| item.name() == name) {
			return Ok(FieldType::Enum(Arc::clone(item)));
		}
		Err(BindError::SchemaTypeNotFound { name: name.to_owned() })
	}
}
