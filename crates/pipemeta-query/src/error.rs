use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] pipemeta_store::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn is_store_not_found(&self) -> bool {
        matches!(self, Error::Store(pipemeta_store::Error::StoreNotFound(_)))
    }
}

impl From<pipemeta_core::Error> for Error {
    fn from(err: pipemeta_core::Error) -> Self {
        match err {
            pipemeta_core::Error::Validation(msg) => Error::Validation(msg),
            pipemeta_core::Error::InvalidTime(raw) => {
                Error::Validation(format!("invalid time {:?}", raw))
            }
            pipemeta_core::Error::InvalidSelector(msg) => Error::Validation(msg),
            pipemeta_core::Error::Other(e) => Error::Other(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
