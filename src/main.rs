use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, info_span, warn};
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use ratpi::chudnovsky::{ChudnovskySeries, Config};
use ratpi::digits::to_decimal_string;
use ratpi::sqrt::SQRT_ITERATIONS;

#[derive(Parser, Debug)]
#[command(name = "ratpi", version)]
#[command(about = "Digits of pi from the Chudnovsky series in exact rational arithmetic")]
struct Cli {
    /// Digits after the decimal point, `_` separators allowed
    #[arg(value_parser = parse_digits, default_value = "60")]
    digits: usize,

    /// Series terms to sum after the first
    #[arg(long, default_value_t = 400)]
    terms: u32,

    /// Newton iterations for sqrt(10005)
    #[arg(long, default_value_t = SQRT_ITERATIONS)]
    sqrt_iterations: u32,

    /// Digits read off per extraction step
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    block_width: u32,

    /// Write a Chrome trace of the computation to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            terms: self.terms,
            sqrt_iterations: self.sqrt_iterations,
            block_width: self.block_width,
        }
    }
}

fn parse_digits(arg: &str) -> Result<usize, String> {
    arg.replace('_', "")
        .parse()
        .map_err(|e| format!("digits should be a valid number: {e}"))
}

fn init_tracing(cli: &Cli) -> Option<FlushGuard> {
    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_filter(level);

    let (chrome_layer, guard) = match &cli.trace {
        Some(path) => {
            let (layer, guard) = ChromeLayerBuilder::new().file(path).build();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(chrome_layer)
        .init();

    guard
}

fn progress_bar(cli: &Cli, terms: u32) -> ProgressBar {
    if cli.no_progress {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(terms as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} terms ({elapsed})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("summing");
    bar
}

fn spinner(cli: &Cli, message: &'static str) -> ProgressBar {
    if cli.no_progress {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner().with_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn run(cli: &Cli) -> ratpi::Result<String> {
    let config = cli.config();
    let supported = config.supported_digits();
    if cli.digits > supported {
        warn!(
            digits = cli.digits,
            supported, "more digits requested than the series supports; the tail may be wrong"
        );
    }

    let mut series = ChudnovskySeries::new();
    let bar = progress_bar(cli, config.terms);
    info_span!("series", terms = config.terms).in_scope(|| -> ratpi::Result<()> {
        while series.terms() < config.terms {
            series.next_term()?;
            bar.inc(1);
        }
        Ok(())
    })?;
    bar.finish_and_clear();
    info!("Done summing");

    let spinner = spinner(cli, "sqrt(10005) and final division");
    let pi = series.pi(config.sqrt_iterations)?;
    spinner.set_message("extracting digits");
    let digits = to_decimal_string(&pi, cli.digits, config.block_width)?;
    spinner.finish_and_clear();
    info!("Done digits");

    Ok(digits)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    match run(&cli) {
        Ok(pi) => {
            println!("{pi}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn digits_accept_separators() {
        assert_eq!(parse_digits("10_000"), Ok(10_000));
        assert_eq!(parse_digits("60"), Ok(60));
        assert!(parse_digits("ten").is_err());
        assert!(parse_digits("-5").is_err());
    }

    #[test]
    fn defaults_match_engine() {
        let cli = Cli::try_parse_from(["ratpi"]).unwrap();
        assert_eq!(cli.digits, 60);
        assert_eq!(cli.config(), Config::default());
    }

    #[test]
    fn options_map_onto_config() {
        let cli = Cli::try_parse_from([
            "ratpi",
            "1_000",
            "--terms",
            "80",
            "--sqrt-iterations",
            "14",
            "--block-width",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.digits, 1000);
        assert_eq!(
            cli.config(),
            Config {
                terms: 80,
                sqrt_iterations: 14,
                block_width: 4,
            }
        );
    }

    #[test]
    fn zero_block_width_is_rejected() {
        assert!(Cli::try_parse_from(["ratpi", "--block-width", "0"]).is_err());
    }

    #[test]
    fn short_run() {
        let cli = Cli::try_parse_from(["ratpi", "20", "--terms", "2", "--no-progress"]).unwrap();
        assert_eq!(run(&cli).unwrap(), "3.14159265358979323846");
    }
}
