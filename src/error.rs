use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no drawable surface: {0}")]
    NoSurface(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("host capability unavailable: {0}")]
    Host(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
