use structbind::bind::{ArrayOptions, JsonOptions, Result, to_map};

use crate::cmd::util::{InstanceArgs, emit_json, load_instance};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub instance: InstanceArgs,
	/// Emit declared field names instead of wire-style keys.
	#[arg(long = "declared-keys")]
	pub declared_keys: bool,
	/// Keep nested structs and enum values unflattened.
	#[arg(long = "keep-nested")]
	pub keep_nested: bool,
	/// Indent the JSON output.
	#[arg(long)]
	pub pretty: bool,
	/// Write non-ASCII characters as `\uXXXX` escapes.
	#[arg(long = "escape-unicode")]
	pub escape_unicode: bool,
}

/// Merge input into a record and print its mapping as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		instance,
		declared_keys,
		keep_nested,
		pretty,
		escape_unicode,
	} = args;

	let record = load_instance(&instance)?;
	let map = to_map(
		&record,
		&ArrayOptions {
			wire_style: !declared_keys,
			flatten_nested: !keep_nested,
		},
	);

	emit_json(&map, &JsonOptions { escape_unicode, pretty })
}
