pub mod config;
mod error;
pub mod export;
pub mod input;
pub mod matrix;
pub mod method;
pub mod num;
pub mod rank;
pub mod step;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::input::{AhpInput, CriterionType, DecisionInput, PairwiseComparisons};
pub use crate::matrix::Matrix;
pub use crate::method::ahp::{
    AhpCalculation, AhpResult, Consistency, ConsistencyResults, ConsistencyWarning,
};
pub use crate::method::{calculate, Calculation, Method};
pub use crate::rank::{rank, RankedItem};
pub use crate::step::{Step, StepInput};

/// Simple additive weighting. See [`method::saw`].
pub fn calculate_saw(input: &DecisionInput) -> Result<Calculation, Error> {
    method::saw::calculate(input)
}

/// Weighted product model. See [`method::wp`].
pub fn calculate_wp(input: &DecisionInput) -> Result<Calculation, Error> {
    method::wp::calculate(input)
}

/// TOPSIS. See [`method::topsis`].
pub fn calculate_topsis(input: &DecisionInput) -> Result<Calculation, Error> {
    method::topsis::calculate(input)
}

/// Analytic hierarchy process with default settings. See [`method::ahp`].
pub fn calculate_ahp(
    alternatives: &[String],
    criteria: &[String],
    comparisons: Option<&PairwiseComparisons>,
) -> Result<AhpCalculation, Error> {
    method::ahp::calculate(alternatives, criteria, comparisons)
}

/// Analytic hierarchy process with explicit consistency settings. See [`method::ahp`].
pub fn calculate_ahp_with(
    config: &Config,
    alternatives: &[String],
    criteria: &[String],
    comparisons: Option<&PairwiseComparisons>,
) -> Result<AhpCalculation, Error> {
    method::ahp::calculate_with(config, alternatives, criteria, comparisons)
}
