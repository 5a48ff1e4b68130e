use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wellnus")]
#[command(
    author,
    version,
    about = "A command-line wellness assistant: atomic habits and a focus timer"
)]
pub struct Cli {
    /// Path to config file (defaults to wellnus.toml in the user config directory)
    #[arg(long, env = "WELLNUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding saved habits (overrides config)
    #[arg(long, env = "WELLNUS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "wellnus",
            "--data-dir",
            "/tmp/wellnus",
            "-v",
            "--log-file",
            "wellnus.log",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/wellnus")));
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("wellnus.log")));
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["wellnus", "hb"]).is_err());
    }
}
