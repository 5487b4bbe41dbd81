use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid card id: {0}")]
    InvalidCardId(String),

    #[error("Invalid volume: {0}")]
    InvalidVolume(String),
}

pub type Result<T> = std::result::Result<T, Error>;
