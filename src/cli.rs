use std::path::PathBuf;

use clap::Parser;

/// Render a pull-request review prompt for an LLM agent.
///
/// All review settings come from `PLUGIN_*` environment variables (falling
/// back to `DRONE_*` where the CI platform provides one). Flags here override
/// the environment.
#[derive(Debug, Parser)]
#[command(name = "ai-review-prompt", version, about)]
pub struct Cli {
    /// Where to write the prompt (overrides PLUGIN_OUTPUT_FILE).
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Where the agent should write its review JSON
    /// (overrides PLUGIN_REVIEW_OUTPUT_FILE; default: review.json next to
    /// the prompt file).
    #[arg(long)]
    pub review_output_file: Option<PathBuf>,

    /// Print the rendered prompt to stdout instead of writing the file.
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Log level filter (default: "info"). Supports tracing directives.
    /// Falls back to PLUGIN_LOG_LEVEL; overridden by REVIEW_PROMPT_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also append structured JSON logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_without_arguments() {
        let cli = Cli::try_parse_from(["ai-review-prompt"]).expect("no args is the CI default");
        assert_eq!(cli.output_file, None);
        assert_eq!(cli.review_output_file, None);
        assert!(!cli.stdout);
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "ai-review-prompt",
            "--output-file",
            "/tmp/x/task.txt",
            "--review-output-file",
            "/tmp/x/findings.json",
            "--stdout",
            "--log-level",
            "ai_review_prompt=debug",
            "--log-file",
            "/tmp/x/plugin.log",
        ])
        .expect("should parse all flags");

        assert_eq!(cli.output_file, Some(PathBuf::from("/tmp/x/task.txt")));
        assert_eq!(
            cli.review_output_file,
            Some(PathBuf::from("/tmp/x/findings.json"))
        );
        assert!(cli.stdout);
        assert_eq!(cli.log_level.as_deref(), Some("ai_review_prompt=debug"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/x/plugin.log")));
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = Cli::try_parse_from(["ai-review-prompt", "--plan", "p.md"])
            .expect_err("unknown flag should be rejected");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn rejects_positional_arguments() {
        let err = Cli::try_parse_from(["ai-review-prompt", "extra"])
            .expect_err("positional args are not accepted");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
