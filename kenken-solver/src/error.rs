use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Core(#[from] kenken_core::CoreError),
}
