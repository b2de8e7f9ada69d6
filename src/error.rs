use std::fmt::{Display, Formatter};

use crate::bootstrap::BootstrapError;
use crate::config::ConfigError;
use crate::impl_err;

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Bootstrap(BootstrapError),
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(std::io::Error, Io);

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(ConfigError::InvalidValue { key, value }) => {
                write!(f, "invalid value for {key}: {value:?}")
            }
            Error::Bootstrap(BootstrapError::MissingColumn(column)) => {
                write!(f, "bootstrap file has no {column} column")
            }
            Error::Bootstrap(BootstrapError::Csv(err)) => write!(f, "bootstrap file: {err}"),
            Error::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}
