use structbind::bind::Result;

use crate::cmd::util::{InstanceArgs, load_instance};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub instance: InstanceArgs,
}

/// Print `<TypeName> (<json>)` for the merged record.
pub fn run(args: Args) -> Result<()> {
	let record = load_instance(&args.instance)?;
	println!("{record}");
	Ok(())
}
