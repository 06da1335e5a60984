//! `cgm-convert`: binary CGM to clear text command line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use cgm_types::{Metafile, Severity};

/// Convert a binary CGM file (ISO/IEC 8632-3) to clear text (ISO/IEC 8632-4).
#[derive(Debug, Parser)]
#[command(name = "cgm-convert", version, about)]
struct Args {
	/// Binary CGM input file
	input: PathBuf,

	/// Clear-text output file; defaults to the input path with a `.txt`
	/// extension
	output: Option<PathBuf>,

	/// Write the diagnostic list as JSON to this path
	#[arg(long)]
	report: Option<PathBuf>,

	/// Only log warnings and errors
	#[arg(short, long)]
	quiet: bool,
}

fn main() -> ExitCode {
	let args = Args::parse();

	let default_level = if args.quiet { "warn" } else { "info" };
	env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));

	let metafile = match Metafile::open(&args.input) {
		Ok(metafile) => metafile,
		Err(e) => {
			error!("cannot read {}: {e}", args.input.display());
			return ExitCode::FAILURE;
		}
	};

	let (text, emit_diagnostics) = metafile.to_clear_text();

	let output = args.output.unwrap_or_else(|| args.input.with_extension("txt"));
	if let Err(e) = std::fs::write(&output, &text) {
		error!("cannot write {}: {e}", output.display());
		return ExitCode::FAILURE;
	}

	let mut diagnostics: Vec<_> = metafile.diagnostics().iter().cloned().collect();
	diagnostics.extend(emit_diagnostics);

	info!(
		"converted {} ({} commands, {} diagnostics) -> {}",
		metafile.name(),
		metafile.commands().len(),
		diagnostics.len(),
		output.display()
	);
	for diagnostic in &diagnostics {
		match diagnostic.severity {
			Severity::Info => info!("{diagnostic}"),
			Severity::Unsupported | Severity::Unimplemented => warn!("{diagnostic}"),
			Severity::Fatal => error!("{diagnostic}"),
		}
	}

	if let Some(report) = args.report {
		match serde_json::to_string_pretty(&diagnostics) {
			Ok(json) => {
				if let Err(e) = std::fs::write(&report, json) {
					error!("cannot write report {}: {e}", report.display());
					return ExitCode::FAILURE;
				}
			}
			Err(e) => {
				error!("cannot serialise report: {e}");
				return ExitCode::FAILURE;
			}
		}
	}

	ExitCode::SUCCESS
}
