use thiserror::Error;

/// Everything that can go wrong while printing. None of these are recovered
/// locally; they propagate to whoever called the top level entry point. A
/// memory port may be left holding a partial write that preceded the
/// failure, which is accepted and not rolled back.
#[derive(Error, Debug)]
pub enum PrintError {
    #[error("port has been closed: {0}")]
    ClosedPort(String),
    #[error("not an output port: {0}")]
    NotAnOutputPort(String),
    #[error("write error on {0}: {1}")]
    WriteError(String, String),
    #[error("too few arguments for format string {0:?}")]
    TooFewArguments(String),
    #[error("wrong type argument: expected {0}, got {1}")]
    TypeMismatch(&'static str, String),
}

pub type Result<T> = std::result::Result<T, PrintError>;

pub fn closed_port(port: String) -> PrintError {
    PrintError::ClosedPort(port)
}

pub fn not_an_output_port(port: String) -> PrintError {
    PrintError::NotAnOutputPort(port)
}

pub fn write_error(port: String, reason: String) -> PrintError {
    PrintError::WriteError(port, reason)
}

pub fn too_few_arguments(template: impl Into<String>) -> PrintError {
    PrintError::TooFewArguments(template.into())
}

pub fn wrong_type(expected: &'static str, actual: String) -> PrintError {
    PrintError::TypeMismatch(expected, actual)
}
