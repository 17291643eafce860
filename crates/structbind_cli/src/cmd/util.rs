use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use structbind::bind::{BindError, Diagnostic, JsonOptions, MergeOptions, Record, Result, SchemaSet, encode_json, merge_json};

/// Schema, type and input selection shared by record commands.
#[derive(clap::Args)]
pub struct InstanceArgs {
	/// Schema file (JSON).
	pub schema: PathBuf,
	/// Struct type to instantiate.
	#[arg(long = "type")]
	pub type_name: String,
	/// JSON object to merge into the record; `-` reads stdin.
	#[arg(long)]
	pub input: Option<PathBuf>,
	/// Maximum nesting depth of constructed struct values.
	#[arg(long = "max-depth", default_value_t = MergeOptions::default().max_depth)]
	pub max_depth: u32,
	/// Fail when the merge skipped any input.
	#[arg(long)]
	pub strict: bool,
}

/// Build a record of the selected type and merge the input into it.
///
/// Diagnostics are printed to stderr as warnings.
pub(crate) fn load_instance(args: &InstanceArgs) -> Result<Record> {
	let schemas = SchemaSet::open(&args.schema)?;
	let mut record = schemas.record(&args.type_name)?;

	let Some(input) = &args.input else {
		return Ok(record);
	};

	let text = read_input(input)?;
	let opt = MergeOptions { max_depth: args.max_depth };
	let diagnostics = merge_json(&mut record, &text, &opt)?;
	report(&diagnostics);

	if args.strict && !diagnostics.is_empty() {
		return Err(BindError::StrictRejected { count: diagnostics.len() });
	}
	Ok(record)
}

fn read_input(path: &Path) -> Result<String> {
	if path == Path::new("-") {
		let mut text = String::new();
		io::stdin().read_to_string(&mut text)?;
		return Ok(text);
	}
	Ok(fs::read_to_string(path)?)
}

fn report(diagnostics: &[Diagnostic]) {
	for diagnostic in diagnostics {
		tracing::warn!("{diagnostic}");
	}
}

/// Print a serializable payload as one JSON document.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T, opt: &JsonOptions) -> Result<()> {
	println!("{}", encode_json(payload, opt)?);
	Ok(())
}
