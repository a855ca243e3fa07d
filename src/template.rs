//! Minimal `${name}` substitution template.
//!
//! The set of names is closed (see [`Field`]) so a parsed template can always
//! be rendered against a [`ReviewConfig`]: every failure mode is caught by
//! [`PromptTemplate::parse`]. Conditional text is not expressed in the
//! template; it is composed by [`crate::prompt::guidelines`] and spliced in
//! through the `guidelines` field.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::ReviewConfig;
use crate::error::PromptError;
use crate::prompt;

const OPEN: &str = "${";

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("valid literal regex"))
}

/// A substitution point recognised by the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RepoName,
    SourceBranch,
    TargetBranch,
    MergeBaseSha,
    SourceSha,
    CommentCount,
    CustomRulesPath,
    ReviewOutputFile,
    Guidelines,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "repo_name" => Field::RepoName,
            "source_branch" => Field::SourceBranch,
            "target_branch" => Field::TargetBranch,
            "merge_base_sha" => Field::MergeBaseSha,
            "source_sha" => Field::SourceSha,
            "comment_count" => Field::CommentCount,
            "custom_rules_path" => Field::CustomRulesPath,
            "review_output_file" => Field::ReviewOutputFile,
            "guidelines" => Field::Guidelines,
            _ => return None,
        };
        Some(field)
    }

    fn write_value(self, out: &mut String, config: &ReviewConfig) {
        match self {
            Field::RepoName => out.push_str(&config.repo_name),
            Field::SourceBranch => out.push_str(&config.source_branch),
            Field::TargetBranch => out.push_str(&config.target_branch),
            Field::MergeBaseSha => out.push_str(&config.merge_base_sha),
            Field::SourceSha => out.push_str(&config.source_sha),
            Field::CommentCount => {
                // Writing to a String cannot fail.
                let _ = write!(out, "{}", config.comment_count);
            }
            Field::CustomRulesPath => out.push_str(&config.custom_rules_path),
            Field::ReviewOutputFile => {
                let _ = write!(out, "{}", config.review_output_file.display());
            }
            Field::Guidelines => out.push_str(&prompt::guidelines(config)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Field(Field),
}

/// A template split into literal text and field references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> PromptTemplate<'a> {
    /// Split `source` into segments, rejecting unknown or unterminated
    /// placeholders.
    pub fn parse(source: &'a str) -> Result<Self, PromptError> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in placeholder_re().captures_iter(source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &source[cursor..whole.start()], cursor)?;

            let field = Field::from_name(name.as_str()).ok_or_else(|| PromptError::TemplateParse {
                detail: format!(
                    "unknown field `{}` at byte {}",
                    name.as_str(),
                    whole.start()
                ),
            })?;
            segments.push(Segment::Field(field));
            cursor = whole.end();
        }
        push_literal(&mut segments, &source[cursor..], cursor)?;

        Ok(Self { segments })
    }

    /// Substitute every field from `config`. Infallible once parsed.
    pub fn render(&self, config: &ReviewConfig) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => field.write_value(&mut out, config),
            }
        }
        out
    }

    /// Fields referenced by this template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(*f),
            Segment::Literal(_) => None,
        })
    }
}

/// Literal runs must not contain a stray `${`; the regex only matches
/// terminated placeholders, so one left over here is unterminated.
fn push_literal<'a>(
    segments: &mut Vec<Segment<'a>>,
    text: &'a str,
    offset: usize,
) -> Result<(), PromptError> {
    if let Some(pos) = text.find(OPEN) {
        return Err(PromptError::TemplateParse {
            detail: format!("unterminated placeholder at byte {}", offset + pos),
        });
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text));
    }
    Ok(())
}
