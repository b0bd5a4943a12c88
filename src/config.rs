//! Configuration

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// Input file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Line-based text: batch count, then per batch the color count,
    /// customer count and one `k c1 f1 ... ck fk` line per customer.
    #[default]
    Text,

    /// YAML batch set, as used by the fixtures.
    Yaml,
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Paint shop command line configuration
#[derive(Debug, Parser)]
#[command(
    name = "paintshop",
    about = "Choose glossy or matte for every color so each customer gets a finish they asked for, using as few matte colors as possible",
    long_about = None
)]
pub struct Config {
    /// Input file with the batches to resolve
    pub input: PathBuf,

    /// Input file format
    #[arg(short, long, value_enum, default_value_t = InputFormat::Text)]
    pub format: InputFormat,

    /// Also write the plain report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report as a table instead of plain lines
    #[arg(short, long)]
    pub table: bool,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults() -> TestResult {
        let config = Config::try_parse_from(["paintshop", "batches.txt"])?;

        assert_eq!(config.input, PathBuf::from("batches.txt"));
        assert_eq!(config.format, InputFormat::Text);
        assert_eq!(config.output, None);
        assert!(!config.table);
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn all_options() -> TestResult {
        let config = Config::try_parse_from([
            "paintshop",
            "batches.yml",
            "--format",
            "yaml",
            "--output",
            "out.txt",
            "--table",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.format, InputFormat::Yaml);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert!(config.table);
        assert_eq!(config.logging.log_level, "debug");
        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn input_is_required() {
        assert!(Config::try_parse_from(["paintshop"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;

        Config::command().debug_assert();
    }
}
