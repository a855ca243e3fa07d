//! The review prompt handed to the external agent.
//!
//! [`REVIEW_PROMPT`] is the only place the instruction text lives. Its
//! `${name}` substitution points are resolved by [`crate::template`]; the
//! flag-gated review categories are composed by [`guidelines`] rather than by
//! template control flow, so which paragraphs appear is decided in one
//! ordinary function.

use crate::config::ReviewConfig;
use crate::error::PromptError;
use crate::template::PromptTemplate;

/// Defect guidance, included when `enable_bugs` is set.
pub const BUGS_GUIDELINE: &str = "Look for critical bugs like possible Null pointer exceptions, division by zero, or other logical errors.";

/// Performance guidance, included when `enable_performance` is set.
pub const PERFORMANCE_GUIDELINE: &str =
    "Look for performance issues like avoid nested for loops.";

/// Scalability guidance, included when `enable_scalability` is set.
pub const SCALABILITY_GUIDELINE: &str =
    "Look for scalability issues like overflow of memory due to reading of large strings.";

/// Style guidance, included when `enable_code_smell` is set.
pub const CODE_SMELL_GUIDELINE: &str = "Look for code smells";

/// Review prompt text with `${name}` substitution points.
pub const REVIEW_PROMPT: &str = r#"assume the "${repo_name}" working directory is a valid git repository.
The pull request merges `${source_branch}` into `${target_branch}`.

You are an expert software engineer specialized in code reviews.
Your task is to analyze pull request diffs and add pr reviews. you can get the changes by running this command
```
git diff --color=never ${merge_base_sha}...${source_sha} | awk '/^@@/{gsub(/.*-/,"",$0);gsub(/,.*\+/," ",$0);gsub(/,.*/,"",$0);split($0,n," ");ol=n[1];nl=n[2];print "=== OLD:"ol" NEW:"nl" ===";next}/^-/{print "OLD:"ol" "$0;ol++;next}/^+/{print "NEW:"nl" "$0;nl++;next}/^ /{print "CTX:"ol"/"nl" "$0;ol++;nl++;next}{print}'
```
if you need the context of the complete files or any other file after diff for your review you can access it in the working directory.
if you don't find sha just give empty review and exit.

Your review should include:
- Provide comments only for lines that have been added, edited, or deleted
- Only mention bugs or issues that are directly related to the syntax or functionality of the provided code changes.
- You can also exact code change using suggestion markdown.
- Do not mention that the file needs a thorough review or caution about potential issues.
- Don't provide suggestions for minor code style issues, missing comments/documentation.
- Comment should STRICTLY only have line numbers for changed lines. Ensure `line_number_start` and `line_number_end` are strictly and accurately computed based on the explained diff format with OLD and NEW line numbers. Comment line numbers MUST be within the range of changes shown in the diff, never outside it. You may use a python script to determine the line numbers presented at each line in the format of `NEW:77 CHANGES\nOLD:70 CHANGES`. IF the changes are in NEW lines, use that for the comment line numbers.
- You are encouraged to use Markdown for your response to format your feedback effectively.

Follow strictly these guidelines:${guidelines}
- Do not make more than ${comment_count} comments per PR unless they are necessary.
- Characterize each comment as a bug, code smell, performance issue, scalability concern, or create a new category if none of these apply.
- Do not provide positive comments like good refactoring. Strictly review code for mentioned rules.
- STRICTLY desist from making any comments that require up to date information since your cutoff. Do NOT comment on new versions of packages that you might not be aware of. Example Go 1.24.4 does exist after your knowledge cutoff.
- STRICTLY desist from making comments for missing imports unless you have seen the whole file and see that import is actually missing.
- In a Git repository, if the file ${custom_rules_path} exists, use the relevant and sensible instructions specified in that file as part of the pull request review process.



Code suggestion markdown are HIGHLY encouraged.
Example of code suggestion markdown:
```suggestion
    {{changed_code}}
```
Make sure the {{changed_code}} is properly styled/linted and has right tabs and spaces as in original code. This is MUST.

Important guidelines for line numbers:
1. Pay careful attention to the line numbers in parentheses
2. For added lines, only 'new line' numbers are available - these are the numbers you should reference
3. For removed lines, only 'old line' numbers are available
4. For context lines, both old and new line numbers are provided
5. Your comments should ONLY reference line numbers that appear in the "new line" positions
6. Focus your review ONLY on the added and removed and modified lines (those marked with "Added line")

NEVER comment on line numbers outside the explicitly shown changes in the diff.

JSON response format:
{
"reviews": [
    {
    "file_path": "path/to/file",
    "line_number_start": 123,
    "line_number_end": 125,
    "type": "issue|performance|scalability|code_smell|new_category",
    "review": "Your review for the file."
    }
]
}

Write the output to the file `${review_output_file}` as well formatted JSON. Create file if needed. File should be created even in case there are no comments.
"#;

/// Parse the built-in review prompt.
pub fn review_template() -> Result<PromptTemplate<'static>, PromptError> {
    PromptTemplate::parse(REVIEW_PROMPT)
}

/// Render the built-in review prompt for `config`.
pub fn render_review_prompt(config: &ReviewConfig) -> Result<String, PromptError> {
    Ok(review_template()?.render(config))
}

/// Compose the enabled review-category bullets, in fixed order.
///
/// Each enabled category contributes `"\n- <guideline>"`; disabled ones
/// contribute nothing, so the text following the `guidelines:` header stays
/// a contiguous bullet list.
pub fn guidelines(config: &ReviewConfig) -> String {
    let fragments = [
        (config.enable_bugs, BUGS_GUIDELINE),
        (config.enable_performance, PERFORMANCE_GUIDELINE),
        (config.enable_scalability, SCALABILITY_GUIDELINE),
        (config.enable_code_smell, CODE_SMELL_GUIDELINE),
    ];

    fragments
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, text)| format!("\n- {text}"))
        .collect()
}
