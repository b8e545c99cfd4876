use std::io::Write;

use anyhow::Result;

use crate::cli::DumpArgs;
use crate::commands::{ExitStatus, load_config};
use crate::printer::Printer;

/// Print the legacy configuration as JSON.
pub fn dump(args: &DumpArgs, printer: Printer) -> Result<ExitStatus> {
    let loaded = load_config(&args.source, printer)?;
    let json = serde_json::to_string_pretty(&loaded.config)?;

    let mut stdout = anstream::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(ExitStatus::Success)
}
