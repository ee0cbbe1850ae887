use partcp_solver::core::ModelError;
use thiserror::Error;

pub(crate) type PartCpResult<T> = Result<T, PartCpError>;

#[derive(Error, Debug)]
pub(crate) enum PartCpError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ModelError),
}
