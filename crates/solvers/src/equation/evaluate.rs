use ndarray::Array1;
use thiserror::Error;

use flexion_core::{BatchEquationProblem, Model, Snapshot};

/// The result of evaluating a batch equation problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O> {
    pub x: Array1<f64>,
    pub residuals: Array1<f64>,
    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating a batch equation problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),
    /// Failed to construct input or compute residuals.
    #[error("problem error")]
    Problem(#[source] PE),
    /// The problem returned a residual batch of the wrong length.
    #[error("expected {expected} residuals, got {actual}")]
    ResidualLength { expected: usize, actual: usize },
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output>,
    EvalError<<M as Model>::Error, <P as BatchEquationProblem>::Error>,
>;

/// Evaluates the model in the context of a batch equation problem.
///
/// This function maps `x` to model input, calls the model, then computes
/// residuals from the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, model call, or residual computation
/// fails, or if the residual batch does not match the length of `x`.
pub fn evaluate<M, P>(model: &M, problem: &P, x: Array1<f64>) -> EvaluateResult<M, P>
where
    M: Model,
    P: BatchEquationProblem<Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    if residuals.len() != x.len() {
        return Err(EvalError::ResidualLength {
            expected: x.len(),
            actual: residuals.len(),
        });
    }

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use ndarray::array;

    struct Doubler;

    impl Model for Doubler {
        type Input = Array1<f64>;
        type Output = Array1<f64>;
        type Error = Infallible;

        fn call(&self, input: &Array1<f64>) -> Result<Array1<f64>, Infallible> {
            Ok(input * 2.0)
        }
    }

    struct Target {
        value: f64,
        truncate: bool,
    }

    impl BatchEquationProblem for Target {
        type Input = Array1<f64>;
        type Output = Array1<f64>;
        type Error = Infallible;

        fn input(&self, x: &Array1<f64>) -> Result<Array1<f64>, Infallible> {
            Ok(x.clone())
        }

        fn residuals(
            &self,
            _input: &Array1<f64>,
            output: &Array1<f64>,
        ) -> Result<Array1<f64>, Infallible> {
            let residuals = output - self.value;
            if self.truncate {
                Ok(residuals.slice(ndarray::s![..1]).to_owned())
            } else {
                Ok(residuals)
            }
        }
    }

    #[test]
    fn computes_residuals_per_entry() {
        let problem = Target {
            value: 3.0,
            truncate: false,
        };
        let eval = evaluate(&Doubler, &problem, array![1.0, 1.5, 2.0]).expect("evaluates");

        assert_relative_eq!(eval.residuals[0], -1.0);
        assert_relative_eq!(eval.residuals[1], 0.0);
        assert_relative_eq!(eval.residuals[2], 1.0);
        assert_relative_eq!(eval.snapshot.output[2], 4.0);
    }

    #[test]
    fn rejects_mismatched_residual_length() {
        let problem = Target {
            value: 3.0,
            truncate: true,
        };
        let result = evaluate(&Doubler, &problem, array![1.0, 2.0]);

        assert!(matches!(
            result,
            Err(EvalError::ResidualLength {
                expected: 2,
                actual: 1
            })
        ));
    }
}
