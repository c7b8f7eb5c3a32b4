//! [TOPSIS](https://en.wikipedia.org/wiki/TOPSIS): rank alternatives by their relative closeness
//! to the ideal solution and distance from the anti-ideal one, both measured in the weighted,
//! vector-normalized criteria space.

use crate::{
    input::{CriterionType, DecisionInput},
    matrix,
    rank::rank,
    step::{Distances, IdealSolutions, Step, StepInput},
    Calculation, Error,
};

pub fn calculate(input: &DecisionInput) -> Result<Calculation, Error> {
    input.validate()?;
    tracing::debug!(rows = input.rows, cols = input.cols, "calculating TOPSIS");
    let mut steps = vec![Step::InputData(StepInput::Matrix(input.clone()))];

    let weights = matrix::normalize_weights(&input.weights)?;
    steps.push(Step::NormalizedWeights(weights.clone()));

    let normalized = matrix::normalize_by_euclidean_norm(&input.values)?;
    steps.push(Step::NormalizedDecisionMatrix(normalized.clone()));

    let weighted = matrix::scale_columns(&normalized, &weights);
    steps.push(Step::WeightedDecisionMatrix(weighted.clone()));

    let ideal = ideal_solutions(&weighted, &input.types)?;
    steps.push(Step::IdealSolutions(ideal.clone()));

    let distances = Distances {
        distance_to_positive: weighted
            .iter()
            .map(|row| matrix::euclidean_distance(row, &ideal.ideal_positive))
            .collect(),
        distance_to_negative: weighted
            .iter()
            .map(|row| matrix::euclidean_distance(row, &ideal.ideal_negative))
            .collect(),
    };
    steps.push(Step::Distances(distances.clone()));

    let preference: Vec<f64> = distances
        .distance_to_positive
        .iter()
        .zip(&distances.distance_to_negative)
        .map(|(positive, negative)| relative_closeness(*positive, *negative))
        .collect();
    let ranking = rank(&preference)?;
    tracing::debug!(best = ranking[0].index, "TOPSIS ranking complete");
    steps.push(Step::PreferenceValues(ranking.clone()));

    Ok(Calculation {
        steps,
        result: ranking,
    })
}

fn ideal_solutions(
    weighted: &[Vec<f64>],
    types: &[CriterionType],
) -> Result<IdealSolutions, Error> {
    let max = matrix::column_max(weighted)?;
    let min = matrix::column_min(weighted)?;
    let (ideal_positive, ideal_negative) = types
        .iter()
        .enumerate()
        .map(|(j, criterion)| match criterion {
            CriterionType::Benefit => (max[j], min[j]),
            CriterionType::Cost => (min[j], max[j]),
        })
        .unzip();
    Ok(IdealSolutions {
        ideal_positive,
        ideal_negative,
    })
}

/// `d- / (d- + d+)`. When an alternative coincides with both ideals (every alternative is
/// identical) the ratio is undefined, and the alternative scores 0.
fn relative_closeness(positive: f64, negative: f64) -> f64 {
    let total = positive + negative;
    if total == 0.0 {
        return 0.0;
    }
    negative / total
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::num::assert_within;

    fn input() -> DecisionInput {
        DecisionInput::new(
            vec![
                vec![7.0, 9.0, 9.0, 8.0],
                vec![8.0, 7.0, 8.0, 7.0],
                vec![9.0, 6.0, 8.0, 9.0],
                vec![6.0, 7.0, 8.0, 6.0],
            ],
            vec![0.1, 0.4, 0.3, 0.2],
            vec![
                CriterionType::Benefit,
                CriterionType::Benefit,
                CriterionType::Benefit,
                CriterionType::Cost,
            ],
        )
    }

    #[test]
    fn step_titles() {
        let calculation = calculate(&input()).unwrap();
        let titles: Vec<&str> = calculation.steps.iter().map(Step::title).collect();
        assert_eq!(
            titles,
            [
                "Input Data",
                "Normalized Weights",
                "Normalized Decision Matrix",
                "Weighted Decision Matrix",
                "Ideal Solutions",
                "Distances to Ideal Solutions",
                "Preference Values",
            ]
        );
    }

    #[test]
    fn closeness_between_ideals() {
        let calculation = calculate(&input()).unwrap();
        let Step::NormalizedDecisionMatrix(normalized) = &calculation.steps[2] else {
            panic!("unexpected step {:?}", calculation.steps[2]);
        };
        let norm = (49.0_f64 + 64.0 + 81.0 + 36.0).sqrt();
        assert_within(normalized[0][0], 7.0 / norm, 1e-12);

        let Step::IdealSolutions(ideal) = &calculation.steps[4] else {
            panic!("unexpected step {:?}", calculation.steps[4]);
        };
        let Step::WeightedDecisionMatrix(weighted) = &calculation.steps[3] else {
            panic!("unexpected step {:?}", calculation.steps[3]);
        };
        // Cost criterion: the ideal is the smallest weighted value.
        assert_eq!(ideal.ideal_positive[3], weighted[3][3]);
        assert_eq!(ideal.ideal_negative[3], weighted[2][3]);

        for item in &calculation.result {
            assert!((0.0..=1.0).contains(&item.value));
        }
        // A1 dominates on the heavily weighted C2 and C3.
        assert_eq!(calculation.result[0].index, 1);
    }

    #[test]
    fn dominant_alternative_is_ideal() {
        let input = DecisionInput::new(
            vec![vec![10.0, 1.0], vec![5.0, 2.0]],
            vec![1.0, 1.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        );
        let calculation = calculate(&input).unwrap();
        assert_eq!(calculation.result[0].index, 1);
        assert_within(calculation.result[0].value, 1.0, 1e-12);
        assert_within(calculation.result[1].value, 0.0, 1e-12);
    }

    #[test]
    fn identical_alternatives_score_zero() {
        let input = DecisionInput::new(
            vec![vec![3.0, 3.0], vec![3.0, 3.0]],
            vec![1.0, 2.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        );
        let calculation = calculate(&input).unwrap();
        assert!(calculation.result.iter().all(|r| r.value == 0.0));
        assert_eq!(calculation.result[0].index, 1);
    }

    #[test]
    fn large_values_keep_their_order() {
        let input = DecisionInput::new(
            vec![vec![1e200, 1.0], vec![2e200, 1.0]],
            vec![1.0, 1.0],
            vec![CriterionType::Benefit, CriterionType::Benefit],
        );
        let calculation = calculate(&input).unwrap();
        assert_eq!(calculation.result[0].index, 2);
        assert_within(calculation.result[0].value, 1.0, 1e-12);
        assert_within(calculation.result[1].value, 0.0, 1e-12);
    }

    #[test]
    fn zero_norm_column_is_degenerate() {
        let input = DecisionInput::new(
            vec![vec![1.0, 0.0], vec![2.0, 0.0]],
            vec![1.0, 1.0],
            vec![CriterionType::Benefit, CriterionType::Benefit],
        );
        assert!(matches!(
            calculate(&input),
            Err(Error::Data { stage: "vector normalization", .. })
        ));
    }
}
