// Error types shared by the Sieve crates

use crate::HttpStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.http_status().code()
    }

    pub fn http_status(&self) -> HttpStatus {
        match self {
            Error::BadRequest(_) | Error::Deserialization(_) => HttpStatus::BadRequest,
            Error::UnprocessableEntity(_) => HttpStatus::UnprocessableEntity,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
