use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::Cli;

// Precedence: CLI > plugin env > platform env > defaults.

const DEFAULT_COMMENT_COUNT: i64 = 10;
const DEFAULT_OUTPUT_FILE: &str = "../output/task.txt";
const DEFAULT_CUSTOM_RULES_PATH: &str = ".harness/rules/review.md";

/// File name of the review results the agent is told to write, placed next
/// to the prompt file unless overridden.
pub const REVIEW_FILE_NAME: &str = "review.json";

/// Resolved configuration for one plugin invocation.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    pub repo_name: String,
    pub source_branch: String,
    pub target_branch: String,
    /// May be empty when the CI platform has no merge base for the build.
    pub merge_base_sha: String,
    pub source_sha: String,

    pub enable_bugs: bool,
    pub enable_performance: bool,
    pub enable_scalability: bool,
    pub enable_code_smell: bool,

    /// Soft cap on comments per PR, rendered into the prompt. Not bounded.
    pub comment_count: i64,
    /// Where the rendered prompt is written. Its parent is the output directory.
    pub output_file: PathBuf,
    /// Where the agent is told to write its review JSON.
    pub review_output_file: PathBuf,
    /// Referenced by name inside the prompt; never opened here.
    pub custom_rules_path: String,
}

impl ReviewConfig {
    /// Load configuration from the process environment with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        Self::load_with_env(cli, real_env_var)
    }

    /// Build configuration from an arbitrary key-value snapshot.
    ///
    /// `lookup` receives the full variable name (e.g. `PLUGIN_REPO_NAME`).
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(&lookup, None, None)
    }

    fn load_with_env<F>(cli: &Cli, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(
            &lookup,
            cli.output_file.clone(),
            cli.review_output_file.clone(),
        )
    }

    fn resolve<F>(
        lookup: &F,
        output_override: Option<PathBuf>,
        review_override: Option<PathBuf>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSnapshot { lookup };

        let output_file = output_override
            .or_else(|| env.string("PLUGIN_OUTPUT_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
        let review_output_file = review_override
            .or_else(|| env.string("PLUGIN_REVIEW_OUTPUT_FILE").map(PathBuf::from))
            .unwrap_or_else(|| sibling_review_file(&output_file));

        ReviewConfig {
            repo_name: env.string_or("PLUGIN_REPO_NAME", "DRONE_REPO_NAME"),
            source_branch: env.string_or("PLUGIN_SOURCE_BRANCH", "DRONE_SOURCE_BRANCH"),
            target_branch: env.string_or("PLUGIN_TARGET_BRANCH", "DRONE_TARGET_BRANCH"),
            merge_base_sha: env.string_or("PLUGIN_MERGE_BASE_SHA", "DRONE_COMMIT_BEFORE"),
            source_sha: env.string_or("PLUGIN_SOURCE_SHA", "DRONE_COMMIT_SHA"),

            enable_bugs: env.bool_or("PLUGIN_ENABLE_BUGS", true),
            enable_performance: env.bool_or("PLUGIN_ENABLE_PERFORMANCE", true),
            enable_scalability: env.bool_or("PLUGIN_ENABLE_SCALABILITY", true),
            enable_code_smell: env.bool_or("PLUGIN_ENABLE_CODE_SMELL", true),

            comment_count: env.int_or("PLUGIN_COMMENT_COUNT", DEFAULT_COMMENT_COUNT),
            output_file,
            review_output_file,
            custom_rules_path: env
                .string("PLUGIN_CUSTOM_RULES_PATH")
                .unwrap_or_else(|| DEFAULT_CUSTOM_RULES_PATH.to_owned()),
        }
    }

    /// Directory that must exist before the prompt file can be written.
    ///
    /// `None` when the output file is a bare file name (current directory).
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// `review.json` in the same directory as `output_file`.
pub fn sibling_review_file(output_file: &Path) -> PathBuf {
    output_file.with_file_name(REVIEW_FILE_NAME)
}

/// Read a variable from the process environment, treating empty as unset.
pub fn real_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

struct EnvSnapshot<'a, F> {
    lookup: &'a F,
}

impl<F> EnvSnapshot<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    fn string_or(&self, primary: &str, secondary: &str) -> String {
        self.string(primary)
            .or_else(|| self.string(secondary))
            .unwrap_or_default()
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        let Some(raw) = self.string(key) else {
            return default;
        };
        match parse_bool(&raw) {
            Some(value) => value,
            None => {
                warn!(var = key, value = %raw, default, "ignoring unparseable boolean");
                default
            }
        }
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        let Some(raw) = self.string(key) else {
            return default;
        };
        match raw.parse::<i64>() {
            Ok(value) => value,
            Err(e) => {
                warn!(var = key, value = %raw, default, err = %e, "ignoring unparseable integer");
                default
            }
        }
    }
}

/// Accepts the spellings CI systems commonly emit for booleans.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
