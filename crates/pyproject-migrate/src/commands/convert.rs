use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::ConvertArgs;
use crate::commands::{ExitStatus, load_config};
use crate::manifest::{ReadmeStyle, WriterOptions};
use crate::printer::Printer;
use crate::translate::{TranslateOptions, Translator};

/// Translate the legacy configuration and write `pyproject.toml`.
pub fn convert(args: &ConvertArgs, printer: Printer) -> Result<ExitStatus> {
    let loaded = load_config(&args.source, printer)?;

    let translator = Translator::new(TranslateOptions {
        project_root: loaded.project_root,
        readme_content_type: args
            .readme_content_type
            .clone()
            .and_then(|content_type| content_type.into_override()),
    });
    let manifest = translator
        .translate(&loaded.config)
        .context("Failed to translate the setuptools configuration")?;

    let options = WriterOptions {
        line_width: args.line_width,
        readme: if args.embed_readme {
            ReadmeStyle::Embed
        } else {
            ReadmeStyle::Reference
        },
    };

    match &args.output {
        Some(path) => {
            manifest.write_to(path, &options)?;
            printer.info(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = anstream::stdout().lock();
            write!(stdout, "{}", manifest.to_toml_string(&options))?;
        }
    }
    Ok(ExitStatus::Success)
}
