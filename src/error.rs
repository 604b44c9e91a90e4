//! Error types for Gearloan

use thiserror::Error;

/// Stable numeric error codes surfaced alongside user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    StorageFailure = 3,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 6,
    Duplicate = 7,
    AlreadyBorrowing = 8,
    NoActiveLoan = 9,
    BadValue = 10,
    EmailInUse = 11,
    InvalidEmailFormat = 12,
    WeakPassword = 13,
    InvalidAdminCode = 14,
    CategoryInUse = 15,
    UndoExpired = 16,
    UndoUnavailable = 17,
}

/// Coarse error taxonomy used by the presentation layer to pick a notification style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or range; nothing was written
    Validation,
    /// Referenced entity missing; nothing was written
    NotFound,
    /// An invariant would be violated; nothing was written
    Conflict,
    /// Credentials or role check failed
    Authentication,
    /// Durable storage could not be written
    Storage,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email format: {0}")]
    InvalidEmailFormat(String),

    #[error("Password must be at least 8 characters and contain letters and numbers")]
    WeakPassword,

    #[error("Invalid admin code")]
    InvalidAdminCode,

    #[error("Email already registered: {0}")]
    EmailInUse(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Only {available} unit(s) of equipment {equipment_id} available, {requested} requested")]
    InsufficientAvailability {
        equipment_id: u64,
        requested: u32,
        available: u32,
    },

    #[error("{email} is already borrowing equipment {equipment_id}")]
    AlreadyBorrowing { email: String, equipment_id: u64 },

    #[error("{email} has no active loan for equipment {equipment_id}")]
    NoActiveLoan { email: String, equipment_id: u64 },

    #[error("Category name already exists: {0}")]
    DuplicateName(String),

    #[error("Category is in use by some equipment: {0}")]
    CategoryInUse(String),

    #[error("Undo window has expired for ticket {0}")]
    UndoExpired(u64),

    #[error("Nothing to undo for ticket {0}")]
    UndoUnavailable(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Numeric code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::InvalidEmailFormat(_) => ErrorCode::InvalidEmailFormat,
            AppError::WeakPassword => ErrorCode::WeakPassword,
            AppError::InvalidAdminCode => ErrorCode::InvalidAdminCode,
            AppError::EmailInUse(_) => ErrorCode::EmailInUse,
            AppError::InvalidCredentials => ErrorCode::NoSuchUser,
            AppError::Authorization(_) => ErrorCode::NotAuthorized,
            AppError::NotFound(_) => ErrorCode::NoSuchItem,
            AppError::InsufficientAvailability { .. } => ErrorCode::ItemNotAvailable,
            AppError::AlreadyBorrowing { .. } => ErrorCode::AlreadyBorrowing,
            AppError::NoActiveLoan { .. } => ErrorCode::NoActiveLoan,
            AppError::DuplicateName(_) => ErrorCode::Duplicate,
            AppError::CategoryInUse(_) => ErrorCode::CategoryInUse,
            AppError::UndoExpired(_) => ErrorCode::UndoExpired,
            AppError::UndoUnavailable(_) => ErrorCode::UndoUnavailable,
            AppError::Storage(_) | AppError::Serialization(_) => ErrorCode::StorageFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// Taxonomy bucket for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_)
            | AppError::InvalidEmailFormat(_)
            | AppError::WeakPassword
            | AppError::InvalidAdminCode => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::EmailInUse(_)
            | AppError::InsufficientAvailability { .. }
            | AppError::AlreadyBorrowing { .. }
            | AppError::NoActiveLoan { .. }
            | AppError::DuplicateName(_)
            | AppError::CategoryInUse(_)
            | AppError::UndoExpired(_)
            | AppError::UndoUnavailable(_) => ErrorKind::Conflict,
            AppError::InvalidCredentials | AppError::Authorization(_) => {
                ErrorKind::Authentication
            }
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                ErrorKind::Storage
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
