// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::fn_params_excessive_bools
)]

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizx::cli::commands::{Cli, Command};
use quizx::cli::output;
use quizx::config::{Config, UserSettings};
use quizx::models::DocumentReport;
use quizx::operations::{self, FilesFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the JSON output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> CmdResult {
    match cli.command {
        Command::Extract {
            paths,
            strict,
            pretty,
            out,
        } => cmd_extract(&paths, strict, pretty, out.as_deref()),
        Command::Files {
            path,
            skipped_only,
            supported_only,
        } => cmd_files(&path, skipped_only, supported_only),
        Command::Stats { path } => cmd_stats(&path),
        Command::Markers => cmd_markers(),
        Command::Init { force } => cmd_init(force),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

fn cmd_extract(paths: &[PathBuf], strict: bool, pretty: bool, out: Option<&Path>) -> CmdResult {
    let config = get_config()?;
    let extractor = config.extractor().map_err(map_err)?;
    let strict = strict || config.settings.extraction.strict;
    let pretty = pretty || config.settings.output.is_pretty();

    let reads_stdin = paths
        .iter()
        .any(|p| p.as_os_str() == operations::extract::STDIN_SOURCE);
    let reports: Vec<DocumentReport> = if reads_stdin {
        if paths.len() > 1 {
            return Err(map_err("stdin (`-`) must be the only input"));
        }
        let report = operations::process_stdin(&config, &extractor, strict);
        println!("{}", output::format_output(&report, pretty));
        vec![report]
    } else if paths.len() == 1 && paths[0].is_file() {
        let report = operations::process_file(&paths[0], &config, &extractor, strict);
        println!("{}", output::format_output(&report, pretty));
        vec![report]
    } else {
        let result =
            operations::process_paths(paths, &config, &extractor, strict).map_err(map_err)?;
        println!("{}", output::format_output(&result, pretty));
        result.documents
    };

    if let Some(dir) = out {
        for report in &reports {
            operations::export_questions(report, dir, pretty).map_err(map_err)?;
        }
    }

    let failed = reports.iter().filter(|r| !r.is_completed()).count();
    if failed > 0 {
        return Err(map_err(format!(
            "{failed} of {} document(s) failed",
            reports.len()
        )));
    }
    Ok(())
}

fn cmd_files(path: &Path, skipped_only: bool, supported_only: bool) -> CmdResult {
    let config = get_config()?;
    let filter = FilesFilter {
        skipped_only,
        supported_only,
    };
    let result = operations::list_files(path, &config.settings.scan, &filter).map_err(map_err)?;
    println!(
        "{}",
        output::format_output(&result, config.settings.output.is_pretty())
    );
    Ok(())
}

fn cmd_stats(path: &Path) -> CmdResult {
    let config = get_config()?;
    let stats = operations::file_stats(path, &config).map_err(map_err)?;
    println!(
        "{}",
        output::format_output(&stats, config.settings.output.is_pretty())
    );
    Ok(())
}

fn cmd_markers() -> CmdResult {
    let config = get_config()?;
    let extractor = config.extractor().map_err(map_err)?;
    println!(
        "{}",
        output::format_output(extractor.markers(), config.settings.output.is_pretty())
    );
    Ok(())
}

fn cmd_init(force: bool) -> CmdResult {
    let mut config = get_config()?;
    if config.config_exists() && !force {
        return Err(map_err(format!(
            "config already exists: {} (use --force to overwrite)",
            config.config_path.display()
        )));
    }
    config.settings = UserSettings::default();
    config.save_settings().map_err(map_err)?;
    println!(
        "{}",
        output::format_json(&serde_json::json!({
            "created": config.config_path.to_string_lossy()
        }))
    );
    Ok(())
}
