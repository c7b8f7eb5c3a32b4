//! [Analytic hierarchy process](https://en.wikipedia.org/wiki/Analytic_hierarchy_process).
//!
//! Priorities are derived from reciprocal pairwise comparison matrices: one comparing the
//! criteria, and one per criterion comparing the alternatives. Each matrix is normalized by column
//! sums and its rows are averaged, which approximates the principal eigenvector. The final score
//! of an alternative is its priority under each criterion, weighted by that criterion's priority.
//!
//! Judgment consistency is measured against Saaty's random index. An inconsistent matrix is
//! reported as a [`ConsistencyWarning`] and does not stop the calculation, unless
//! [`Config::strict_consistency`] is set.

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    input::{default_labels, AhpInput, PairwiseComparisons},
    matrix::{self, Matrix},
    rank::{rank, RankedItem},
    step::{ComparisonMatrices, ConsistencyReport, PriorityWeights, Step, StepInput},
    Error,
};

/// Saaty's random consistency index, indexed by matrix size.
pub const RANDOM_INDEX: [f64; 12] = [
    0.0, 0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51,
];

/// Largest matrix with a known random index.
pub const MAX_SIZE: usize = RANDOM_INDEX.len() - 1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consistency {
    /// Approximation of the principal eigenvalue.
    pub lambda_max: f64,
    pub ci: f64,
    pub cr: f64,
}

impl Consistency {
    /// Consistency of a comparison matrix given the priority vector derived from it.
    pub fn check(matrix: &[Vec<f64>], weights: &[f64]) -> Self {
        let n = matrix.len();
        // A reciprocal matrix of size 2 or less is always consistent.
        if n <= 2 {
            return Self {
                lambda_max: n as f64,
                ci: 0.0,
                cr: 0.0,
            };
        }
        let weighted_sum = matrix::mul_vector(matrix, weights);
        let lambda_max = weighted_sum
            .iter()
            .zip(weights)
            .map(|(t, w)| t / w)
            .sum::<f64>()
            / n as f64;
        let ci = (lambda_max - n as f64) / (n - 1) as f64;
        // Matrices this large are rejected before weights are derived.
        let ri = RANDOM_INDEX.get(n).copied().unwrap_or(RANDOM_INDEX[MAX_SIZE]);
        Self {
            lambda_max,
            ci,
            cr: ci / ri,
        }
    }

    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.cr < threshold
    }
}

/// A comparison matrix whose consistency ratio reached the configured threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWarning {
    /// `criteria`, or the criterion under which alternatives were compared.
    pub subject: String,
    pub ratio: f64,
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpResult {
    pub criteria_weights: Vec<f64>,
    /// Per criterion, the priority of each alternative.
    pub alternative_weights: Vec<Vec<f64>>,
    /// Per alternative, in input order.
    pub final_scores: Vec<f64>,
    pub ranking: Vec<RankedItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResults {
    #[serde(rename = "criteriaCR")]
    pub criteria_cr: f64,
    #[serde(rename = "criteriaCI")]
    pub criteria_ci: f64,
    pub criteria: Consistency,
    pub alternatives: Vec<Consistency>,
    pub warnings: Vec<ConsistencyWarning>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpCalculation {
    pub steps: Vec<Step>,
    pub result: AhpResult,
    pub consistency_results: ConsistencyResults,
}

/// Run AHP with the default [`Config`]. Empty `alternatives` or `criteria` are labelled `A1..An`
/// and `C1..Cm`.
pub fn calculate(
    alternatives: &[String],
    criteria: &[String],
    comparisons: Option<&PairwiseComparisons>,
) -> Result<AhpCalculation, Error> {
    calculate_with(&Config::default(), alternatives, criteria, comparisons)
}

pub fn calculate_with(
    config: &Config,
    alternatives: &[String],
    criteria: &[String],
    comparisons: Option<&PairwiseComparisons>,
) -> Result<AhpCalculation, Error> {
    config.validate()?;
    let comparisons =
        comparisons.ok_or_else(|| Error::validation("pairwise comparisons are required"))?;
    let criteria_count = comparisons.criteria.len();
    let alternative_count = comparisons.alternatives.first().map(Vec::len).unwrap_or(0);
    if criteria_count == 0 || alternative_count == 0 {
        return Err(Error::validation(
            "pairwise comparisons for criteria and alternatives must not be empty",
        ));
    }
    if comparisons.alternatives.len() != criteria_count {
        return Err(Error::validation(format!(
            "expected one alternative comparison matrix per criterion ({criteria_count}), got {}",
            comparisons.alternatives.len()
        )));
    }
    let criteria = labels(criteria, 'C', criteria_count, "criteria")?;
    let alternatives = labels(alternatives, 'A', alternative_count, "alternatives")?;
    tracing::debug!(
        criteria = criteria_count,
        alternatives = alternative_count,
        "calculating AHP"
    );

    let mut steps = vec![Step::InputData(StepInput::Pairwise(AhpInput {
        alternatives: alternatives.clone(),
        criteria: criteria.clone(),
        pairwise_comparisons: comparisons.clone(),
    }))];

    let criteria_matrix = reciprocal_matrix(&comparisons.criteria, criteria_count, "criteria")?;
    let alternative_matrices = comparisons
        .alternatives
        .iter()
        .zip(&criteria)
        .map(|(raw, criterion)| reciprocal_matrix(raw, alternative_count, criterion))
        .collect::<Result<Vec<Matrix>, Error>>()?;
    steps.push(Step::PairwiseComparisonMatrices(ComparisonMatrices {
        criteria: criteria_matrix.clone(),
        alternatives: alternative_matrices.clone(),
    }));

    let normalized_criteria = matrix::normalize_by_column_sum(&criteria_matrix)?;
    let normalized_alternatives = alternative_matrices
        .iter()
        .map(|m| matrix::normalize_by_column_sum(m))
        .collect::<Result<Vec<Matrix>, Error>>()?;
    steps.push(Step::NormalizedMatrices(ComparisonMatrices {
        criteria: normalized_criteria.clone(),
        alternatives: normalized_alternatives.clone(),
    }));

    let criteria_weights = matrix::row_average(&normalized_criteria);
    let alternative_weights: Vec<Vec<f64>> = normalized_alternatives
        .iter()
        .map(|m| matrix::row_average(m))
        .collect();
    steps.push(Step::CalculatedWeights(PriorityWeights {
        criteria: criteria_weights.clone(),
        alternatives: alternative_weights.clone(),
    }));

    let final_scores: Vec<f64> = (0..alternative_count)
        .map(|a| {
            criteria_weights
                .iter()
                .zip(&alternative_weights)
                .map(|(w, priorities)| w * priorities[a])
                .sum()
        })
        .collect();
    let ranking = rank(&final_scores)?;
    steps.push(Step::FinalScores(ranking.clone()));

    let criteria_consistency = Consistency::check(&criteria_matrix, &criteria_weights);
    let alternatives_consistency: Vec<Consistency> = alternative_matrices
        .iter()
        .zip(&alternative_weights)
        .map(|(m, w)| Consistency::check(m, w))
        .collect();
    let threshold = config.consistency_threshold;
    let warnings: Vec<ConsistencyWarning> = std::iter::once(("criteria", &criteria_consistency))
        .chain(
            criteria
                .iter()
                .map(String::as_str)
                .zip(&alternatives_consistency),
        )
        .filter(|(_, consistency)| !consistency.is_consistent(threshold))
        .map(|(subject, consistency)| ConsistencyWarning {
            subject: subject.to_string(),
            ratio: consistency.cr,
            threshold,
        })
        .collect();
    for warning in &warnings {
        tracing::warn!(
            subject = %warning.subject,
            cr = warning.ratio,
            threshold,
            "failed consistency check"
        );
    }
    if config.strict_consistency && !criteria_consistency.is_consistent(threshold) {
        return Err(Error::Inconsistent {
            subject: "criteria".to_string(),
            ratio: criteria_consistency.cr,
            threshold,
        });
    }
    steps.push(Step::ConsistencyCheck(ConsistencyReport {
        threshold,
        criteria: criteria_consistency,
        alternatives: alternatives_consistency.clone(),
        warnings: warnings.clone(),
    }));
    tracing::debug!(
        best = %alternatives[ranking[0].index - 1],
        criteria_cr = criteria_consistency.cr,
        "AHP ranking complete"
    );

    Ok(AhpCalculation {
        steps,
        result: AhpResult {
            criteria_weights,
            alternative_weights,
            final_scores,
            ranking,
        },
        consistency_results: ConsistencyResults {
            criteria_cr: criteria_consistency.cr,
            criteria_ci: criteria_consistency.ci,
            criteria: criteria_consistency,
            alternatives: alternatives_consistency,
            warnings,
        },
    })
}

impl AhpCalculation {
    /// Whether any comparison matrix failed the consistency check.
    pub fn has_warnings(&self) -> bool {
        !self.consistency_results.warnings.is_empty()
    }
}

fn labels(given: &[String], prefix: char, count: usize, what: &str) -> Result<Vec<String>, Error> {
    if given.is_empty() {
        return Ok(default_labels(prefix, count));
    }
    if given.len() != count {
        return Err(Error::validation(format!(
            "{} {what} named but comparisons cover {count}",
            given.len()
        )));
    }
    Ok(given.to_vec())
}

/// Build a reciprocal matrix from the judgments above the diagonal of `raw`.
fn reciprocal_matrix(raw: &[Vec<f64>], size: usize, subject: &str) -> Result<Matrix, Error> {
    if size > MAX_SIZE {
        return Err(Error::validation(format!(
            "at most {MAX_SIZE} items can be compared pairwise, {subject} has {size}"
        )));
    }
    if raw.len() != size || raw.iter().any(|row| row.len() != size) {
        return Err(Error::validation(format!(
            "comparison matrix for {subject} must be {size}x{size}"
        )));
    }
    let mut matrix = vec![vec![1.0; size]; size];
    for i in 0..size {
        for j in (i + 1)..size {
            let judgment = raw[i][j];
            if !judgment.is_finite() || judgment <= 0.0 {
                return Err(Error::validation(format!(
                    "comparison {},{} for {subject} must be a positive number, got {judgment}",
                    i + 1,
                    j + 1
                )));
            }
            matrix[i][j] = judgment;
            matrix[j][i] = judgment.recip();
        }
    }
    Ok(matrix)
}
