//! Human-readable stdout report of the resolved configuration.

use std::path::Path;

use crate::config::ReviewConfig;

const TITLE: &str = "Drone AI Review Plugin";
const RULE: &str = "======================";

/// Fixed-format echo of every resolved setting, printed before the write.
pub fn config_summary(config: &ReviewConfig) -> String {
    let lines = [
        TITLE.to_owned(),
        RULE.to_owned(),
        format!("Repository: {}", config.repo_name),
        format!("Source Branch: {}", config.source_branch),
        format!("Target Branch: {}", config.target_branch),
        format!("Merge Base SHA: {}", config.merge_base_sha),
        format!("Source SHA: {}", config.source_sha),
        format!("Output File: {}", config.output_file.display()),
        format!("Review Output File: {}", config.review_output_file.display()),
        format!("Custom Rules Path: {}", config.custom_rules_path),
        format!("Comment Count: {}", config.comment_count),
        format!("Enable Bugs: {}", config.enable_bugs),
        format!("Enable Performance: {}", config.enable_performance),
        format!("Enable Scalability: {}", config.enable_scalability),
        format!("Enable Code Smell: {}", config.enable_code_smell),
        RULE.to_owned(),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Lines printed after the prompt file is in place.
pub fn success_message(path: &Path) -> String {
    format!(
        "Successfully generated prompt file at: {}\nPlugin execution completed successfully!\n",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn summary_lists_every_setting_in_order() {
        let cfg = ReviewConfig::from_lookup(|key| match key {
            "PLUGIN_REPO_NAME" => Some("acme/widgets".to_owned()),
            "PLUGIN_ENABLE_PERFORMANCE" => Some("false".to_owned()),
            "PLUGIN_COMMENT_COUNT" => Some("15".to_owned()),
            "PLUGIN_OUTPUT_FILE" => Some("/tmp/x/task.txt".to_owned()),
            _ => None,
        });

        let expected = concat!(
            "Drone AI Review Plugin\n",
            "======================\n",
            "Repository: acme/widgets\n",
            "Source Branch: \n",
            "Target Branch: \n",
            "Merge Base SHA: \n",
            "Source SHA: \n",
            "Output File: /tmp/x/task.txt\n",
            "Review Output File: /tmp/x/review.json\n",
            "Custom Rules Path: .harness/rules/review.md\n",
            "Comment Count: 15\n",
            "Enable Bugs: true\n",
            "Enable Performance: false\n",
            "Enable Scalability: true\n",
            "Enable Code Smell: true\n",
            "======================\n",
        );
        assert_eq!(config_summary(&cfg), expected);
    }

    #[test]
    fn summary_starts_with_title_and_ends_with_rule() {
        let summary = config_summary(&ReviewConfig::from_lookup(no_env));
        assert!(summary.starts_with("Drone AI Review Plugin\n======================\n"));
        assert!(summary.ends_with("======================\n"));
    }

    #[test]
    fn success_message_names_path() {
        let msg = success_message(Path::new("../output/task.txt"));
        assert_eq!(
            msg,
            "Successfully generated prompt file at: ../output/task.txt\n\
             Plugin execution completed successfully!\n"
        );
    }
}
