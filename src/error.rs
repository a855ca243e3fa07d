use std::path::PathBuf;

/// Failures of the prompt write pipeline.
///
/// Environment parsing never produces one of these: unparseable values fall
/// back to their defaults inside [`crate::config`].
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse prompt template: {detail}")]
    TemplateParse { detail: String },

    #[error("failed to create output file {path}")]
    CreateOutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {path}")]
    WriteOutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
