use ndarray::Array1;

/// Defines a batch of independent scalar equations to be solved.
///
/// A batch equation problem maps solver variables `x` (one per batch entry)
/// to a model input, then computes one residual per entry from the model input
/// and output. Solvers search for the `x` that drives every residual to zero.
///
/// Entry `i` of the residuals must depend only on entry `i` of `x`. Batched
/// solvers rely on this to estimate all derivatives from a single perturbed
/// evaluation and to freeze converged entries without affecting the others.
pub trait BatchEquationProblem {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &Array1<f64>) -> Result<Self::Input, Self::Error>;

    /// Computes residuals from model input/output, one per batch entry.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<Array1<f64>, Self::Error>;
}
