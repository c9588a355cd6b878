use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Tool execution error: {0}")]
    ToolError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AgentError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AgentError::MissingConfig(_) => 2,
            AgentError::InvalidInput(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_category() {
        assert_eq!(AgentError::MissingConfig("key".into()).exit_code(), 2);
        assert_eq!(AgentError::InvalidInput("days".into()).exit_code(), 3);
        assert_eq!(AgentError::ApiError("500".into()).exit_code(), 1);
        assert_eq!(AgentError::ToolError("boom".into()).exit_code(), 1);
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: AgentError = io.into();
        assert!(matches!(err, AgentError::IoError(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
