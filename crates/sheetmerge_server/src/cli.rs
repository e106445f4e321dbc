use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sheetmerge_io_xlsx::C_SHEET_NAME_DEFAULT;

#[derive(Parser)]
#[command(
    name = "sheetmerge",
    about = "Concatenate the rows of many spreadsheets into one workbook",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP merge service
    Serve(ServeArgs),
    /// Merge local workbooks into one file
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Listen address, overrides the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Request body limit in bytes, overrides the config file
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Workbook files or directories (expanded one level deep)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    #[arg(short, long, default_value = "merged.xlsx")]
    pub output: PathBuf,
    /// File-name glob for directory inputs; repeatable
    #[arg(long = "include")]
    pub patterns: Vec<String>,
    #[arg(long, default_value = C_SHEET_NAME_DEFAULT)]
    pub sheet_name: String,
}
