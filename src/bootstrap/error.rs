use crate::impl_err;

#[derive(Debug)]
pub enum BootstrapError {
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl From<csv::Error> for BootstrapError {
    fn from(value: csv::Error) -> Self {
        BootstrapError::Csv(value)
    }
}

impl_err!(BootstrapError, Bootstrap);
