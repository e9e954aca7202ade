use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use voc2labelstudio::io::append_summary_log;
use voc2labelstudio::utils::create_progress_bar;
use voc2labelstudio::{process_directory, Args, LogReporter};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let dirname = PathBuf::from(&args.file_dir);
    if !dirname.is_dir() {
        error!("The specified file_dir does not exist: {}", args.file_dir);
        return ExitCode::FAILURE;
    }

    info!("Starting the conversion process...");

    let mut reporter = LogReporter::new(create_progress_bar(0, "Convert"));
    let stats = match process_directory(&args, &mut reporter) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Conversion aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };
    reporter.finish();

    stats.print_summary();
    info!(
        "Conversion finished, {} file(s) converted",
        stats.successful_conversions
    );
    if let Err(e) = append_summary_log(Path::new(&args.log_file), &stats) {
        error!("Failed to write log file {}: {}", args.log_file, e);
    }

    ExitCode::SUCCESS
}
