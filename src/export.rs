//! Renders a step trace for download: the whole trace as JSON, or one table per step. Tables
//! label criteria `C1..Cm` and alternatives `A1..An` (or the AHP names when the trace carries
//! them) and print numbers to 4 decimal places.

use crate::{
    method::ahp::Consistency,
    step::{ComparisonMatrices, Step, StepInput},
    RankedItem,
};

pub fn to_json(steps: &[Step]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(steps)
}

/// One table, named after the step it renders.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// `Normalized Decision Matrix` -> `normalized_decision_matrix`
    pub fn file_stem(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
            out.push_str(&line.join(","));
            out.push_str("\r\n");
        }
        out
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

struct Labels {
    criteria: Vec<String>,
    alternatives: Vec<String>,
}

impl Labels {
    fn criterion(&self, j: usize) -> String {
        self.criteria
            .get(j)
            .cloned()
            .unwrap_or_else(|| format!("C{}", j + 1))
    }

    fn alternative(&self, i: usize) -> String {
        self.alternatives
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("A{}", i + 1))
    }

    fn criteria_header(&self, count: usize) -> Vec<String> {
        (0..count).map(|j| self.criterion(j)).collect()
    }

    fn alternatives_header(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.alternative(i)).collect()
    }
}

fn fixed(value: f64) -> String {
    format!("{value:.4}")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn to_sheets(steps: &[Step]) -> Vec<Sheet> {
    let labels = steps
        .iter()
        .find_map(|step| match step {
            Step::InputData(StepInput::Pairwise(input)) => Some(Labels {
                criteria: input.criteria.clone(),
                alternatives: input.alternatives.clone(),
            }),
            _ => None,
        })
        .unwrap_or(Labels {
            criteria: vec![],
            alternatives: vec![],
        });
    steps
        .iter()
        .map(|step| Sheet {
            name: step.title().to_string(),
            rows: rows(step, &labels),
        })
        .collect()
}

fn rows(step: &Step, labels: &Labels) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    match step {
        Step::InputData(StepInput::Matrix(input)) => {
            let header = labels.criteria_header(input.cols);
            rows.push(strings(&["Parameter", "Value"]));
            rows.push(vec!["Rows".into(), input.rows.to_string()]);
            rows.push(vec!["Cols".into(), input.cols.to_string()]);
            rows.extend([vec![], strings(&["Weights"]), header.clone()]);
            rows.push(input.weights.iter().map(f64::to_string).collect());
            rows.extend([vec![], strings(&["Types"]), header.clone()]);
            rows.push(input.types.iter().map(|t| t.as_str().to_string()).collect());
            rows.extend([vec![], strings(&["Values"])]);
            rows.push(std::iter::once(String::new()).chain(header).collect());
            for (i, row) in input.values.iter().enumerate() {
                rows.push(
                    std::iter::once(labels.alternative(i))
                        .chain(row.iter().map(f64::to_string))
                        .collect(),
                );
            }
        }
        Step::InputData(StepInput::Pairwise(input)) => {
            rows.push(
                std::iter::once("Criteria".to_string())
                    .chain(input.criteria.clone())
                    .collect(),
            );
            rows.push(
                std::iter::once("Alternatives".to_string())
                    .chain(input.alternatives.clone())
                    .collect(),
            );
            rows.push(vec![]);
            let comparisons = ComparisonMatrices {
                criteria: input.pairwise_comparisons.criteria.clone(),
                alternatives: input.pairwise_comparisons.alternatives.clone(),
            };
            rows.extend(comparison_rows(&comparisons, labels));
        }
        Step::NormalizedWeights(weights) => {
            rows.push(strings(&["Criteria", "Weights"]));
            for (j, w) in weights.iter().enumerate() {
                rows.push(vec![labels.criterion(j), fixed(*w)]);
            }
        }
        Step::NormalizedMatrix(m)
        | Step::WeightedMatrix(m)
        | Step::NormalizedDecisionMatrix(m)
        | Step::WeightedDecisionMatrix(m) => {
            let cols = m.first().map(Vec::len).unwrap_or(0);
            rows.push(
                std::iter::once("Item".to_string())
                    .chain(labels.criteria_header(cols))
                    .collect(),
            );
            for (i, row) in m.iter().enumerate() {
                rows.push(
                    std::iter::once(labels.alternative(i))
                        .chain(row.iter().copied().map(fixed))
                        .collect(),
                );
            }
        }
        Step::WeightedSum(values) | Step::SValues(values) => {
            let column = match step {
                Step::SValues(_) => "S Value",
                _ => "Value",
            };
            rows.push(strings(&["Item", column]));
            for (i, value) in values.iter().enumerate() {
                rows.push(vec![labels.alternative(i), fixed(*value)]);
            }
        }
        Step::FinalRanking(ranking)
        | Step::PreferenceValues(ranking)
        | Step::FinalScores(ranking) => {
            rows.extend(ranking_rows(ranking, labels));
        }
        Step::IdealSolutions(ideal) => {
            rows.push(
                std::iter::once("Solution Type".to_string())
                    .chain(labels.criteria_header(ideal.ideal_positive.len()))
                    .collect(),
            );
            rows.push(
                std::iter::once("Ideal Positive".to_string())
                    .chain(ideal.ideal_positive.iter().copied().map(fixed))
                    .collect(),
            );
            rows.push(
                std::iter::once("Ideal Negative".to_string())
                    .chain(ideal.ideal_negative.iter().copied().map(fixed))
                    .collect(),
            );
        }
        Step::Distances(distances) => {
            rows.push(strings(&["Item", "Distance to Positive", "Distance to Negative"]));
            for (i, (positive, negative)) in distances
                .distance_to_positive
                .iter()
                .zip(&distances.distance_to_negative)
                .enumerate()
            {
                rows.push(vec![labels.alternative(i), fixed(*positive), fixed(*negative)]);
            }
        }
        Step::PairwiseComparisonMatrices(matrices) | Step::NormalizedMatrices(matrices) => {
            rows.extend(comparison_rows(matrices, labels));
        }
        Step::CalculatedWeights(weights) => {
            rows.push(strings(&["Criteria", "Weight"]));
            for (j, w) in weights.criteria.iter().enumerate() {
                rows.push(vec![labels.criterion(j), fixed(*w)]);
            }
            rows.push(vec![]);
            rows.push(
                std::iter::once("Item".to_string())
                    .chain(labels.criteria_header(weights.alternatives.len()))
                    .collect(),
            );
            let alternatives = weights.alternatives.first().map(Vec::len).unwrap_or(0);
            for i in 0..alternatives {
                rows.push(
                    std::iter::once(labels.alternative(i))
                        .chain(weights.alternatives.iter().map(|w| fixed(w[i])))
                        .collect(),
                );
            }
        }
        Step::ConsistencyCheck(report) => {
            rows.push(strings(&["Matrix", "Lambda Max", "CI", "CR", "Consistent"]));
            let consistency_row = |name: String, c: &Consistency| {
                vec![
                    name,
                    fixed(c.lambda_max),
                    fixed(c.ci),
                    fixed(c.cr),
                    c.is_consistent(report.threshold).to_string(),
                ]
            };
            rows.push(consistency_row("Criteria".to_string(), &report.criteria));
            for (j, c) in report.alternatives.iter().enumerate() {
                rows.push(consistency_row(labels.criterion(j), c));
            }
        }
    }
    rows
}

fn ranking_rows(ranking: &[RankedItem], labels: &Labels) -> Vec<Vec<String>> {
    std::iter::once(strings(&["Item", "Value", "Rank"]))
        .chain(ranking.iter().map(|item| {
            vec![
                labels.alternative(item.index.saturating_sub(1)),
                fixed(item.value),
                item.rank.to_string(),
            ]
        }))
        .collect()
}

fn comparison_rows(matrices: &ComparisonMatrices, labels: &Labels) -> Vec<Vec<String>> {
    let mut rows = vec![strings(&["Criteria"])];
    let criteria = labels.criteria_header(matrices.criteria.len());
    rows.push(std::iter::once(String::new()).chain(criteria.clone()).collect());
    for (j, row) in matrices.criteria.iter().enumerate() {
        rows.push(
            std::iter::once(criteria[j].clone())
                .chain(row.iter().copied().map(fixed))
                .collect(),
        );
    }
    for (k, matrix) in matrices.alternatives.iter().enumerate() {
        let alternatives = labels.alternatives_header(matrix.len());
        rows.push(vec![]);
        rows.push(vec![format!("Alternatives for {}", labels.criterion(k))]);
        rows.push(std::iter::once(String::new()).chain(alternatives.clone()).collect());
        for (i, row) in matrix.iter().enumerate() {
            rows.push(
                std::iter::once(alternatives[i].clone())
                    .chain(row.iter().copied().map(fixed))
                    .collect(),
            );
        }
    }
    rows
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{calculate_ahp, calculate_saw, CriterionType, DecisionInput, PairwiseComparisons};

    fn saw_sheets() -> Vec<Sheet> {
        let input = DecisionInput::new(
            vec![vec![80.0, 60.0], vec![70.0, 90.0]],
            vec![50.0, 50.0],
            vec![CriterionType::Benefit, CriterionType::Benefit],
        );
        to_sheets(&calculate_saw(&input).unwrap().steps)
    }

    #[test]
    fn one_sheet_per_step() {
        let sheets = saw_sheets();
        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "Input Data");
        assert_eq!(sheets.len(), 6);
        assert_eq!(sheets[2].file_stem(), "normalized_matrix");
    }

    #[test]
    fn ranking_layout() {
        let sheets = saw_sheets();
        let ranking = &sheets[5].rows;
        assert_eq!(ranking[0], ["Item", "Value", "Rank"]);
        assert_eq!(ranking[1], ["A2", "0.9375", "1"]);
        assert_eq!(ranking[2], ["A1", "0.8333", "2"]);
        assert_eq!(
            sheets[5].to_csv(),
            "Item,Value,Rank\r\nA2,0.9375,1\r\nA1,0.8333,2\r\n"
        );
    }

    #[test]
    fn matrix_layout() {
        let sheets = saw_sheets();
        let normalized = &sheets[2].rows;
        assert_eq!(normalized[0], ["Item", "C1", "C2"]);
        assert_eq!(normalized[1], ["A1", "1.0000", "0.6667"]);
    }

    #[test]
    fn ahp_names_label_tables() {
        let comparisons = PairwiseComparisons {
            criteria: vec![vec![1.0, 3.0], vec![1.0 / 3.0, 1.0]],
            alternatives: vec![
                vec![vec![1.0, 2.0], vec![0.5, 1.0]],
                vec![vec![1.0, 0.25], vec![4.0, 1.0]],
            ],
        };
        let alternatives = ["north, upper".to_string(), "south".to_string()];
        let calculation = calculate_ahp(&alternatives, &[], Some(&comparisons)).unwrap();
        let sheets = to_sheets(&calculation.steps);
        let scores = sheets.iter().find(|s| s.name == "Final Scores").unwrap();
        assert_eq!(scores.rows[1][0], "north, upper");
        assert!(scores.to_csv().contains("\"north, upper\",0.5500,1"));
        let consistency = sheets.iter().find(|s| s.name == "Consistency Check").unwrap();
        assert_eq!(consistency.rows[1][0], "Criteria");
        assert_eq!(consistency.rows[2][0], "C1");
    }

    #[test]
    fn json_round_trip() {
        let input = DecisionInput::new(
            vec![vec![1.0, 2.0]],
            vec![1.0, 1.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        );
        let steps = calculate_saw(&input).unwrap().steps;
        let json = to_json(&steps).unwrap();
        let decoded: Vec<Step> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, steps);
    }

    #[test]
    fn decoded_ranking_with_zero_index() {
        let steps: Vec<Step> = serde_json::from_str(
            r#"[{"title": "Final Ranking", "data": [{"index": 0, "value": 0.5, "rank": 1}]}]"#,
        )
        .unwrap();
        let sheets = to_sheets(&steps);
        assert_eq!(sheets[0].rows[1], ["A1", "0.5000", "1"]);
    }
}
