use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fvl")]
#[command(about = "Find VLAN by IP: locate the interface owning an address in config backups")]
pub struct Cli {
    /// Source IP address to look up.
    #[arg(value_name = "SRC_IP")]
    pub src_ip: String,
    /// Optional destination IP address.
    #[arg(value_name = "DST_IP")]
    pub dst_ip: Option<String>,
    /// Directory with configuration backups.
    #[arg(long, env = "CISCONFS")]
    pub cfg_dir: Option<PathBuf>,
    /// Optional TOML settings file (cfg_dir, max_block_lines, skip_extensions).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Safety limit on lines scanned per interface stanza.
    #[arg(long)]
    pub max_block_lines: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
