use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("earned/total must be an integer (class '{class}': '{value}')")]
    InvalidScore { class: String, value: String },

    #[error("Semester name can't be empty")]
    EmptySemesterName,

    #[error("Semester not found: {name}")]
    SemesterNotFound { name: String },

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: anyhow::Error,
    },
}

impl CoreError {
    pub fn storage(source: anyhow::Error) -> Self {
        CoreError::Storage { source }
    }

    /// Short reason suitable for a user-facing rejection notice
    pub fn reason(&self) -> String {
        match self {
            CoreError::InvalidScore { .. } => "earned/total must be an integer".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
