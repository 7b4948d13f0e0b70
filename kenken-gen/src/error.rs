use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Core(#[from] kenken_core::CoreError),
    #[error(transparent)]
    Solve(#[from] kenken_solver::SolveError),
}
