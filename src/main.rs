use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ai_review_prompt::cli::Cli;
use ai_review_prompt::config::{self, ReviewConfig};
use ai_review_prompt::logging::{self, LogSettings};
use ai_review_prompt::{prompt, summary, writer};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(&LogSettings::resolve(&cli, config::real_env_var))?;

    let config = ReviewConfig::load(&cli);
    let stdout = std::io::stdout();
    emit(&cli, &config, &mut stdout.lock())
}

/// Print the summary and write the prompt file, or with `--stdout` print
/// only the rendered prompt.
fn emit(cli: &Cli, config: &ReviewConfig, out: &mut impl Write) -> anyhow::Result<()> {
    info!(
        repo = %config.repo_name,
        merge_base = %config.merge_base_sha,
        source_sha = %config.source_sha,
        output_file = %config.output_file.display(),
        "config loaded"
    );

    if cli.stdout {
        let rendered = prompt::render_review_prompt(config)?;
        out.write_all(rendered.as_bytes())
            .context("failed to write prompt to stdout")?;
        return Ok(());
    }

    out.write_all(summary::config_summary(config).as_bytes())
        .context("failed to write summary")?;

    let path = writer::write_prompt_file(config).context("failed to write prompt file")?;

    out.write_all(summary::success_message(&path).as_bytes())
        .context("failed to write summary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_for(output_file: &Path) -> ReviewConfig {
        let output_file = output_file.to_str().unwrap().to_owned();
        ReviewConfig::from_lookup(move |key| match key {
            "PLUGIN_REPO_NAME" => Some("acme/widgets".to_owned()),
            "PLUGIN_MERGE_BASE_SHA" => Some("abc123".to_owned()),
            "PLUGIN_SOURCE_SHA" => Some("def456".to_owned()),
            "PLUGIN_ENABLE_PERFORMANCE" => Some("false".to_owned()),
            "PLUGIN_ENABLE_SCALABILITY" => Some("false".to_owned()),
            "PLUGIN_COMMENT_COUNT" => Some("15".to_owned()),
            "PLUGIN_OUTPUT_FILE" => Some(output_file.clone()),
            _ => None,
        })
    }

    #[test]
    fn emit_prints_summary_then_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("x").join("task.txt");
        let cli = Cli::try_parse_from(["ai-review-prompt"]).unwrap();
        let cfg = config_for(&output_file);

        let mut out = Vec::new();
        emit(&cli, &cfg, &mut out).expect("should succeed");

        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.starts_with("Drone AI Review Plugin\n"));
        assert!(stdout.contains("Repository: acme/widgets\n"));
        assert!(stdout.ends_with(&format!(
            "Successfully generated prompt file at: {}\nPlugin execution completed successfully!\n",
            output_file.display()
        )));

        let prompt = fs::read_to_string(&output_file).unwrap();
        assert!(prompt.contains("abc123...def456"));
        assert!(prompt.contains("Look for critical bugs"));
        assert!(prompt.contains("Look for code smells"));
        assert!(!prompt.contains("Look for performance issues"));
        assert!(!prompt.contains("Look for scalability issues"));
        assert!(prompt.contains("15 comments"));
    }

    #[test]
    fn emit_with_stdout_flag_prints_prompt_only() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("task.txt");
        let cli = Cli::try_parse_from(["ai-review-prompt", "--stdout"]).unwrap();
        let cfg = config_for(&output_file);

        let mut out = Vec::new();
        emit(&cli, &cfg, &mut out).unwrap();

        let stdout = String::from_utf8(out).unwrap();
        assert_eq!(stdout, prompt::render_review_prompt(&cfg).unwrap());
        assert!(!output_file.exists(), "--stdout must not write the file");
    }

    #[test]
    fn emit_fails_when_output_dir_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let cli = Cli::try_parse_from(["ai-review-prompt"]).unwrap();
        let cfg = config_for(&blocker.join("task.txt"));

        let mut out = Vec::new();
        let err = emit(&cli, &cfg, &mut out).unwrap_err();
        let msg = format!("{err:#}");
        assert!(
            msg.contains("failed to create output directory"),
            "unexpected error: {msg}"
        );
        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.contains("Drone AI Review Plugin"), "summary precedes the write");
        assert!(!stdout.contains("Successfully generated"));
    }
}
