//! Print the first lines of each input file.

use clap::Parser;
use linecat_rs::{Input, OutputMode, PipelineDriver, TransformConfig};
use std::io::{self, Write};
use std::process;

/// Print the first N lines of each FILE to standard output.
///
/// With more than one FILE, each is preceded by a ==> FILE <== header.
#[derive(Parser)]
#[command(name = "head-run", version)]
struct Cli {
    /// Number of lines to print from each input
    #[arg(short = 'n', long = "lines", value_name = "N", default_value_t = 10)]
    lines: usize,

    /// Files to read; with no FILE, or when FILE is -, standard input
    /// is read
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let inputs: Vec<Input> = if cli.files.is_empty() {
        vec![Input::Stdin]
    } else {
        cli.files.iter().map(|f| Input::from_arg(f)).collect()
    };
    let with_headers = inputs.len() > 1;

    let mut out = io::stdout().lock();
    let mut failed = false;
    let mut first_file = true;

    for input in &inputs {
        // Open before the header so a missing file gets an error line,
        // not a banner.
        let reader = match input.open() {
            Ok(reader) => reader,
            Err(e) => {
                eprintln!("head-run: {e}");
                failed = true;
                continue;
            }
        };

        if with_headers {
            let separator = if first_file { "" } else { "\n" };
            if writeln!(out, "{separator}==> {} <==", input.name()).is_err() {
                eprintln!("head-run: write error");
                process::exit(1);
            }
        }
        first_file = false;

        // The quota is per file, so each input gets its own driver; the
        // writer is shared.
        let mut driver = PipelineDriver::new(
            TransformConfig::default(),
            OutputMode::Head(cli.lines),
            &mut out,
        );
        if let Err(e) = driver.feed(&input.name(), reader) {
            if e.is_per_file() {
                eprintln!("head-run: {e}");
                failed = true;
            } else {
                eprintln!("head-run: {e}");
                process::exit(1);
            }
        }
        if let Err(e) = driver.finish() {
            eprintln!("head-run: {e}");
            process::exit(1);
        }
    }

    if failed {
        process::exit(1);
    }
}
