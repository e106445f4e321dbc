use anyhow::Context;
use sheetmerge_io_xlsx::{EnumMergeOutcome, SpecMergeOptions, merge_workbooks};
use sheetmerge_server::{MergeServer, ServerConfig, collect_input_files};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(n_bytes) = args.max_upload_bytes {
        config.max_upload_bytes = n_bytes;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(MergeServer::new(config).serve())?;
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let l_files = collect_input_files(&args.inputs, &args.patterns)?;
    if l_files.is_empty() {
        anyhow::bail!("no input workbooks found");
    }

    let options = SpecMergeOptions {
        sheet_name: args.sheet_name,
    };
    let output = merge_workbooks(l_files, &options)?;
    std::fs::write(&args.output, &output.content)
        .with_context(|| format!("write {}", args.output.display()))?;

    for file_report in &output.report.files {
        match &file_report.outcome {
            EnumMergeOutcome::Merged => println!(
                "  merged  {} ({} rows)",
                file_report.file_name,
                file_report.rows_copied()
            ),
            EnumMergeOutcome::Skipped(reason) => {
                println!("  skipped {}: {reason}", file_report.file_name)
            }
        }
    }
    println!("{}", output.report);
    println!("Wrote {}", args.output.display());
    Ok(())
}
