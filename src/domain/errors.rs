#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryError {
    /// The club dataset could not be fetched (file or network).
    Fetch(String),
    /// The club dataset was fetched but is not a valid club collection.
    InvalidData(String),
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryError::Fetch(msg) => {
                write!(f, "Failed to fetch club data: {}", msg)
            }
            DirectoryError::InvalidData(msg) => {
                write!(f, "Invalid club data: {}", msg)
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
