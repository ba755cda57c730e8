mod fetch;
mod package;

pub use fetch::FetchError;
pub use package::PackageError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Package(#[from] PackageError),
}

pub type Result<T> = std::result::Result<T, Error>;
