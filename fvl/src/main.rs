use anyhow::{bail, Context, Result};
use clap::Parser;
use fvl::config::{load_settings, FileSettings, FvlConfig, Overrides};
use fvl::report::render_text;
use fvl::select::select_candidates;
use ios_config_core::{scan, ScanError};
use log::debug;

mod cli;

use cli::{Cli, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => FileSettings::default(),
    };
    let config = FvlConfig::resolve(
        Overrides {
            cfg_dir: cli.cfg_dir,
            source: cli.src_ip,
            destination: cli.dst_ip,
            verbose: cli.debug,
            max_block_lines: cli.max_block_lines,
        },
        settings,
    )?;
    debug!(
        "source={} destination={} cfg_dir={}",
        config.source,
        config.destination,
        config.cfg_dir.display()
    );

    // Reject bad addresses before the directory is touched.
    config.scan_request(Vec::new()).targets()?;

    let files = select_candidates(&config.cfg_dir, &config.skip_extensions)
        .with_context(|| format!("failed to list {}", config.cfg_dir.display()))?;
    debug!("scan files: {files:?}");

    let outcome = match scan(&config.scan_request(files)) {
        Ok(outcome) => outcome,
        Err(ScanError::NoCandidateFiles) => bail!(
            "no text configuration backups found in {}",
            config.cfg_dir.display()
        ),
        Err(err) => return Err(err.into()),
    };

    match cli.format {
        OutputFormat::Text => {
            println!(
                "{}",
                render_text(&outcome, &config.source, &config.destination)
            );
            if config.verbose {
                eprintln!(
                    "scanned {} files, skipped {}",
                    outcome.files_scanned,
                    outcome.skipped.len()
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
