use sslc::lexer::Position;
use sslc::translator::{ErrorKind, TranslateError};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{pos}: {kind} error: {source}")]
    Compile {
        file: String,
        pos: Position,
        kind: ErrorKind,
        #[source]
        source: TranslateError,
    },
}

impl DriverError {
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn compile(file: &Path) -> impl FnOnce(TranslateError) -> Self + '_ {
        move |source| Self::Compile {
            file: file.display().to_string(),
            pos: source.pos(),
            kind: source.kind(),
            source,
        }
    }
}
