//! [Simple additive weighting](https://en.wikipedia.org/wiki/Weighted_sum_model). Each criterion
//! is scaled into a ratio against its best value, so that 1 is the best alternative on that
//! criterion, and the weighted ratios are summed.

use crate::{
    input::{CriterionType, DecisionInput},
    matrix::{self, Matrix},
    rank::rank,
    step::{Step, StepInput},
    Calculation, Error,
};

pub fn calculate(input: &DecisionInput) -> Result<Calculation, Error> {
    input.validate()?;
    tracing::debug!(rows = input.rows, cols = input.cols, "calculating SAW");
    let mut steps = vec![Step::InputData(StepInput::Matrix(input.clone()))];

    let weights = matrix::normalize_weights(&input.weights)?;
    steps.push(Step::NormalizedWeights(weights.clone()));

    let normalized = normalize(&input.values, &input.types)?;
    steps.push(Step::NormalizedMatrix(normalized.clone()));

    let weighted = matrix::scale_columns(&normalized, &weights);
    steps.push(Step::WeightedMatrix(weighted.clone()));

    let scores = matrix::row_sum(&weighted);
    steps.push(Step::WeightedSum(scores.clone()));

    let ranking = rank(&scores)?;
    tracing::debug!(best = ranking[0].index, "SAW ranking complete");
    steps.push(Step::FinalRanking(ranking.clone()));

    Ok(Calculation {
        steps,
        result: ranking,
    })
}

/// Benefit criteria become `x / max`, cost criteria become `min / x`.
fn normalize(values: &[Vec<f64>], types: &[CriterionType]) -> Result<Matrix, Error> {
    let max = matrix::column_max(values)?;
    let min = matrix::column_min(values)?;
    for (j, criterion) in types.iter().enumerate() {
        match criterion {
            CriterionType::Benefit if max[j] == 0.0 => {
                return Err(Error::data(
                    "SAW normalization",
                    format!("benefit criterion C{} is zero for every alternative", j + 1),
                ));
            }
            CriterionType::Cost if min[j] == 0.0 => {
                return Err(Error::data(
                    "SAW normalization",
                    format!("cost criterion C{} has a zero value", j + 1),
                ));
            }
            _ => (),
        }
    }
    Ok(values
        .iter()
        .map(|row| {
            row.iter()
                .zip(types)
                .enumerate()
                .map(|(j, (x, criterion))| match criterion {
                    CriterionType::Benefit => x / max[j],
                    CriterionType::Cost => min[j] / x,
                })
                .collect()
        })
        .collect())
}
