use std::path::{Path, PathBuf};

use structbind::bind::{BindError, EnumSchema, JsonOptions, Result, SchemaSet, StructSchema, to_wire_style};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print a schema file summary, or the fields/cases of one type.
pub fn run(args: Args) -> Result<()> {
	let Args { schema: path, type_name, json } = args;
	let schemas = SchemaSet::open(&path)?;

	let Some(name) = type_name else {
		return summary(&path, &schemas, json);
	};

	if let Some(item) = schemas.struct_by_name(&name) {
		return struct_detail(item, json);
	}
	if let Some(item) = schemas.enum_by_name(&name) {
		return enum_detail(item, json);
	}
	Err(BindError::SchemaTypeNotFound { name })
}

fn summary(path: &Path, schemas: &SchemaSet, json: bool) -> Result<()> {
	if json {
		let payload = SummaryJson {
			path: path.display().to_string(),
			structs: schemas.structs().iter().map(|item| item.name().to_owned()).collect(),
			enums: schemas.enums().iter().map(|item| item.name().to_owned()).collect(),
		};
		return emit_json(&payload, &JsonOptions::default());
	}

	println!("path: {}", path.display());
	println!("structs: {}", schemas.structs().len());
	for item in schemas.structs() {
		println!("  {} ({} fields)", item.name(), item.fields().len());
	}
	println!("enums: {}", schemas.enums().len());
	for item in schemas.enums() {
		println!("  {} ({} cases)", item.name(), item.cases().len());
	}
	Ok(())
}

fn struct_detail(item: &StructSchema, json: bool) -> Result<()> {
	if json {
		let payload = StructJson {
			name: item.name().to_owned(),
			fields: item
				.fields()
				.iter()
				.map(|field| FieldJson {
					name: field.name.to_string(),
					wire: to_wire_style(&field.name),
					ty: field.ty.to_string(),
				})
				.collect(),
		};
		return emit_json(&payload, &JsonOptions::default());
	}

	println!("struct: {}", item.name());
	println!("field_count: {}", item.fields().len());
	for field in item.fields() {
		println!("  {} {} ({})", field.ty, field.name, to_wire_style(&field.name));
	}
	Ok(())
}

fn enum_detail(item: &EnumSchema, json: bool) -> Result<()> {
	if json {
		let payload = EnumJson {
			name: item.name().to_owned(),
			cases: item
				.cases()
				.iter()
				.map(|case| {
					Ok(CaseJson {
						label: case.label.to_string(),
						value: serde_json::to_value(&case.value)?,
					})
				})
				.collect::<std::result::Result<Vec<_>, serde_json::Error>>()?,
		};
		return emit_json(&payload, &JsonOptions::default());
	}

	println!("enum: {}", item.name());
	println!("case_count: {}", item.cases().len());
	for case in item.cases() {
		println!("  {} = {}", case.label, serde_json::to_string(&case.value)?);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct SummaryJson {
	path: String,
	structs: Vec<String>,
	enums: Vec<String>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	wire: String,
	#[serde(rename = "type")]
	ty: String,
}

#[derive(serde::Serialize)]
struct StructJson {
	name: String,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct CaseJson {
	label: String,
	value: serde_json::Value,
}

#[derive(serde::Serialize)]
struct EnumJson {
	name: String,
	cases: Vec<CaseJson>,
}
