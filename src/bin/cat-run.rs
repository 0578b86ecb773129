//! Concatenate files to standard output with optional line transforms.

use clap::Parser;
use linecat_rs::{
    DEFAULT_WINDOW_LINES, Input, OutputMode, PipelineDriver, TransformConfig,
};
use std::io::{self, BufWriter};
use std::process;

/// Concatenate FILE(s), or standard input, to standard output.
#[derive(Parser)]
#[command(name = "cat-run", version)]
struct Cli {
    /// Number all output lines
    #[arg(short = 'n', long = "number")]
    number: bool,

    /// Number nonempty output lines, overrides -n
    #[arg(short = 'b', long = "number-nonblank")]
    number_nonblank: bool,

    /// Display $ at end of each line
    #[arg(short = 'E', long = "show-ends")]
    show_ends: bool,

    /// Display TAB characters as ^I
    #[arg(short = 'T', long = "show-tabs")]
    show_tabs: bool,

    /// Use ^ and M- notation, except for LFD and TAB
    #[arg(short = 'v', long = "show-nonprinting")]
    show_nonprinting: bool,

    /// Suppress repeated empty output lines
    #[arg(short = 's', long = "squeeze-blank")]
    squeeze_blank: bool,

    /// Equivalent to -vET
    #[arg(short = 'A', long = "show-all")]
    show_all: bool,

    /// Equivalent to -vE
    #[arg(short = 'e')]
    ends_and_nonprinting: bool,

    /// Equivalent to -vT
    #[arg(short = 't')]
    tabs_and_nonprinting: bool,

    /// Print only the first N lines (default 10); a negative N or a
    /// lone - prints the last N instead
    #[arg(
        short = 'l',
        long = "lines",
        value_name = "[-]N",
        num_args = 0..=1,
        default_missing_value = "10",
        allow_hyphen_values = true
    )]
    lines: Option<String>,

    /// Files to concatenate; with no FILE, or when FILE is -, standard
    /// input is read
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

impl Cli {
    fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            number_all: self.number,
            number_nonblank: self.number_nonblank,
            show_ends: self.show_ends || self.show_all || self.ends_and_nonprinting,
            show_tabs: self.show_tabs || self.show_all || self.tabs_and_nonprinting,
            show_nonprinting: self.show_nonprinting
                || self.show_all
                || self.ends_and_nonprinting
                || self.tabs_and_nonprinting,
            squeeze_blank: self.squeeze_blank,
        }
    }

    fn output_mode(&self) -> Result<OutputMode, String> {
        let Some(lines) = self.lines.as_deref() else {
            return Ok(OutputMode::All);
        };
        if lines == "-" {
            return Ok(OutputMode::Tail(DEFAULT_WINDOW_LINES));
        }
        let n: i64 = lines
            .parse()
            .map_err(|_| format!("invalid line count '{lines}'"))?;
        if n >= 0 {
            Ok(OutputMode::Head(n as usize))
        } else {
            Ok(OutputMode::Tail(n.unsigned_abs() as usize))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mode = match cli.output_mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("cat-run: {e}");
            process::exit(1);
        }
    };

    let inputs: Vec<Input> = if cli.files.is_empty() {
        vec![Input::Stdin]
    } else {
        cli.files.iter().map(|f| Input::from_arg(f)).collect()
    };

    let out = BufWriter::new(io::stdout().lock());
    let mut driver = PipelineDriver::new(cli.transform_config(), mode, out);

    let report = match driver.run(&inputs) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("cat-run: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = driver.finish() {
        eprintln!("cat-run: {e}");
        process::exit(1);
    }

    for failure in &report.failures {
        eprintln!("cat-run: {failure}");
    }
    if !report.success() {
        process::exit(1);
    }
}
