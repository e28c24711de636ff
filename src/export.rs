use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::utils::{ExportConfig, ExportError};
use crate::{archive, importer, renderer};

/// The main entry point for the export pipeline:
/// resolve the source, load every entry, render the page, write it out.
///
/// All-or-nothing: the first failure aborts before the output file is
/// created, so a failed run leaves no partial page behind.
pub fn execute(config: ExportConfig) -> Result<()> {
    // An explicit output path is checked before touching the source, so a
    // collision aborts before any extraction happens.
    if let Some(output) = &config.output {
        if output.exists() {
            return Err(ExportError::OutputCollision(output.clone()).into());
        }
    }

    let entry_dir = archive::resolve_source(&config.source)?;

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| entry_dir.join("index.html"));
    if output.exists() {
        return Err(ExportError::OutputCollision(output).into());
    }

    let entries = importer::load_entries(&entry_dir, config.order)?;
    if !config.quiet {
        eprintln!("Found {} entries in {}", entries.len(), entry_dir.display());
    }
    if config.verbose {
        for entry in &entries {
            eprintln!("Loaded:  {} ({})", entry.file_name, entry.display_date);
        }
    }

    let file = File::create(&output)
        .wrap_err_with(|| format!("Failed to create: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    renderer::render_document(&mut writer, &entries, &config)
        .wrap_err_with(|| format!("Failed to write: {}", output.display()))?;
    writer.flush().wrap_err("Failed to flush output file")?;

    if !config.quiet {
        eprintln!("Done. {} entries -> {}", entries.len(), output.display());
    }

    Ok(())
}
