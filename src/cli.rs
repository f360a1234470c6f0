use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "code-input")]
#[command(version)]
#[command(about = "Verification code input for the terminal")]
pub struct Cli {
    /// Number of digit cells
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub length: u16,

    /// Initial code; characters that are not digits leave their cell empty
    #[arg(short, long, default_value = "")]
    pub value: String,

    /// Cell style to start with
    #[arg(short, long, default_value = "Boxed")]
    pub style: String,

    /// Write logs to this file (filtered with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn length(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.length as usize).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["code-input"]).unwrap();
        assert_eq!(cli.length().get(), 6);
        assert_eq!(cli.value, "");
        assert_eq!(cli.style, "Boxed");
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::try_parse_from([
            "code-input",
            "--length",
            "4",
            "--value",
            "12",
            "--style",
            "Underlined",
            "--log-file",
            "/tmp/code-input.log",
        ])
        .unwrap();
        assert_eq!(cli.length().get(), 4);
        assert_eq!(cli.value, "12");
        assert_eq!(cli.style, "Underlined");
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/code-input.log")));
    }

    #[test]
    fn length_must_be_in_range() {
        assert!(Cli::try_parse_from(["code-input", "--length", "0"]).is_err());
        assert!(Cli::try_parse_from(["code-input", "--length", "17"]).is_err());
        assert!(Cli::try_parse_from(["code-input", "--length", "six"]).is_err());
    }
}
