// HTTP status codes surfaced by Sieve errors and responses

/// Status codes Sieve maps its errors onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    BadRequest = 400,
    UnprocessableEntity = 422,
}

impl HttpStatus {
    /// Numeric status code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Reason phrase
    pub fn reason(&self) -> &'static str {
        match self {
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::UnprocessableEntity => "Unprocessable Entity",
        }
    }
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
