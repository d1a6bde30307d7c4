use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Store-level failure (connectivity, constraint violation, ...), with the driver message.
    #[error("database error: {0}")]
    Db(String),
}
