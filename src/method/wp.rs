//! We use the [weighted product model (WPM)](https://en.wikipedia.org/wiki/Weighted_product_model)
//! here as a multiplicative alternative to SAW. Each value is raised to its criterion's weight,
//! negated for cost criteria, and the row product `S` is rescaled so that the preference vector
//! `V` sums to 1. Because `S` is a product, any value approaching 0 on a benefit criterion
//! seriously disadvantages an alternative.

use crate::{
    input::{CriterionType, DecisionInput},
    matrix,
    rank::rank,
    step::{Step, StepInput},
    Calculation, Error,
};

pub fn calculate(input: &DecisionInput) -> Result<Calculation, Error> {
    input.validate()?;
    tracing::debug!(rows = input.rows, cols = input.cols, "calculating WP");
    let mut steps = vec![Step::InputData(StepInput::Matrix(input.clone()))];

    let weights = matrix::normalize_weights(&input.weights)?;
    steps.push(Step::NormalizedWeights(weights.clone()));

    // Fractional and negative exponents are only defined for positive bases.
    for (i, row) in input.values.iter().enumerate() {
        if let Some(j) = row.iter().position(|x| *x <= 0.0) {
            return Err(Error::data(
                "WP exponentiation",
                format!("value of A{} on C{} must be greater than zero", i + 1, j + 1),
            ));
        }
    }
    let exponents: Vec<f64> = weights
        .iter()
        .zip(&input.types)
        .map(|(w, criterion)| match criterion {
            CriterionType::Benefit => *w,
            CriterionType::Cost => -w,
        })
        .collect();
    let weighted = matrix::pow_columns(&input.values, &exponents);
    steps.push(Step::WeightedMatrix(weighted.clone()));

    let s = matrix::row_product(&weighted);
    steps.push(Step::SValues(s.clone()));

    let total: f64 = s.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::data("WP preference", format!("sum of S is {total}")));
    }
    let v: Vec<f64> = s.iter().map(|s| s / total).collect();
    let ranking = rank(&v)?;
    tracing::debug!(best = ranking[0].index, "WP ranking complete");
    steps.push(Step::FinalRanking(ranking.clone()));

    Ok(Calculation {
        steps,
        result: ranking,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::num::assert_within;

    #[test]
    fn benefit_and_cost() {
        let input = DecisionInput::new(
            vec![vec![2.0, 4.0], vec![3.0, 2.0]],
            vec![50.0, 50.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        );
        let calculation = calculate(&input).unwrap();
        let titles: Vec<&str> = calculation.steps.iter().map(Step::title).collect();
        assert_eq!(
            titles,
            [
                "Input Data",
                "Normalized Weights",
                "Weighted Matrix",
                "S Values",
                "Final Ranking",
            ]
        );

        let Step::WeightedMatrix(weighted) = &calculation.steps[2] else {
            panic!("unexpected step {:?}", calculation.steps[2]);
        };
        assert_within(weighted[0][0], 2_f64.sqrt(), 1e-12);
        assert_within(weighted[0][1], 0.5, 1e-12);
        assert_within(weighted[1][0], 3_f64.sqrt(), 1e-12);
        assert_within(weighted[1][1], 0.5_f64.sqrt(), 1e-12);

        let Step::SValues(s) = &calculation.steps[3] else {
            panic!("unexpected step {:?}", calculation.steps[3]);
        };
        assert_within(s[0], 0.707, 1e-3);
        assert_within(s[1], 1.225, 1e-3);

        let ranking = &calculation.result;
        assert_eq!((ranking[0].index, ranking[0].rank), (2, 1));
        assert_within(ranking[0].value, 0.634, 1e-3);
        assert_within(ranking[1].value, 0.366, 1e-3);
        assert_within(ranking.iter().map(|r| r.value).sum(), 1.0, 1e-12);
    }

    #[test]
    fn zero_value_rejected() {
        let input = DecisionInput::new(
            vec![vec![2.0, 0.0], vec![3.0, 2.0]],
            vec![1.0, 1.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        );
        assert!(matches!(
            calculate(&input),
            Err(Error::Data { stage: "WP exponentiation", .. })
        ));
    }

    #[test]
    fn zero_weights_rejected() {
        let input = DecisionInput::new(
            vec![vec![2.0], vec![3.0]],
            vec![0.0],
            vec![CriterionType::Benefit],
        );
        assert!(matches!(
            calculate(&input),
            Err(Error::Data { stage: "weight normalization", .. })
        ));
    }
}
