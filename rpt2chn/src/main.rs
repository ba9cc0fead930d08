use std::process::ExitCode;

use clap::{builder::NonEmptyStringValueParser, Parser};
use log::{debug, LevelFilter};
use rpt2chn::{ConversionPipeline, ConvertConfig};

#[derive(Parser, Debug)]
#[command(
    name = "rpt2chn",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert RPT spectrum reports to CHN spectrum format",
    long_about = None,
)]
struct Cli {
    /// RPT file to read from
    #[arg(long = "if", value_name = "PATH", value_parser = NonEmptyStringValueParser::new())]
    input: String,
    /// CHN file to write to
    #[arg(long = "of", value_name = "PATH", value_parser = NonEmptyStringValueParser::new())]
    output: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG переопределяет уровень по умолчанию
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .init();

    debug!("{cli:?}");

    let result = ConvertConfig::new(cli.input, cli.output)
        .and_then(|config| ConversionPipeline::new(config).run());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
