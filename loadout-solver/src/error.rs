/// Errors reported before any dynamic programming work begins.
///
/// An infeasible problem is not an error; it comes back as an
/// `Assignment` with `cost == COST_INF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    TooManyRecipes { count: usize, max: usize },
    TooManySlots { count: usize, max: usize },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::TooManyRecipes { count, max } => write!(
                f,
                "Too many recipe variants. Allowed: '{}', Actual: '{}'",
                max, count
            ),
            SolverError::TooManySlots { count, max } => write!(
                f,
                "Too many equipment slots. Allowed: '{}', Actual: '{}'",
                max, count
            ),
        }
    }
}

impl std::error::Error for SolverError {}

pub type SolverResult<T> = std::result::Result<T, SolverError>;
