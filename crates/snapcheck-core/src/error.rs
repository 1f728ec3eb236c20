use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid target URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
