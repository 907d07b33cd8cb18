use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenerError {
    NotFound(String),
    ExpiredByTime(String),
    ExpiredByCount(String),
    NotOwner(String),
    AlreadyExpired(String),
    InvalidOwnerId(String),
}

impl ShortenerError {
    /// Stable error code for each variant
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "E001",
            ShortenerError::ExpiredByTime(_) => "E002",
            ShortenerError::ExpiredByCount(_) => "E003",
            ShortenerError::NotOwner(_) => "E004",
            ShortenerError::AlreadyExpired(_) => "E005",
            ShortenerError::InvalidOwnerId(_) => "E006",
        }
    }

    /// Human-readable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "Link Not Found",
            ShortenerError::ExpiredByTime(_) => "Link Expired (time)",
            ShortenerError::ExpiredByCount(_) => "Link Expired (clicks)",
            ShortenerError::NotOwner(_) => "Not The Owner",
            ShortenerError::AlreadyExpired(_) => "Already Expired",
            ShortenerError::InvalidOwnerId(_) => "Invalid Owner Id",
        }
    }

    /// Error detail message
    pub fn message(&self) -> &str {
        match self {
            ShortenerError::NotFound(msg) => msg,
            ShortenerError::ExpiredByTime(msg) => msg,
            ShortenerError::ExpiredByCount(msg) => msg,
            ShortenerError::NotOwner(msg) => msg,
            ShortenerError::AlreadyExpired(msg) => msg,
            ShortenerError::InvalidOwnerId(msg) => msg,
        }
    }

    /// Colored output for the interactive console
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}: {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortenerError {}

// Convenience constructors
impl ShortenerError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortenerError::NotFound(msg.into())
    }

    pub fn expired_by_time<T: Into<String>>(msg: T) -> Self {
        ShortenerError::ExpiredByTime(msg.into())
    }

    pub fn expired_by_count<T: Into<String>>(msg: T) -> Self {
        ShortenerError::ExpiredByCount(msg.into())
    }

    pub fn not_owner<T: Into<String>>(msg: T) -> Self {
        ShortenerError::NotOwner(msg.into())
    }

    pub fn already_expired<T: Into<String>>(msg: T) -> Self {
        ShortenerError::AlreadyExpired(msg.into())
    }

    pub fn invalid_owner_id<T: Into<String>>(msg: T) -> Self {
        ShortenerError::InvalidOwnerId(msg.into())
    }
}

impl From<uuid::Error> for ShortenerError {
    fn from(err: uuid::Error) -> Self {
        ShortenerError::InvalidOwnerId(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;
