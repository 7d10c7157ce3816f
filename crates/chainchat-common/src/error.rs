/// Crate-wide error type.
///
/// `Config` failures are fatal at startup; `Connection` failures are
/// recovered per conversation turn by the front ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("channel error: {0}")]
    Channel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
