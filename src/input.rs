use serde::{Deserialize, Serialize};

use crate::{matrix::Matrix, Error};

/// Direction of a criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionType {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    Cost,
}

impl CriterionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benefit => "benefit",
            Self::Cost => "cost",
        }
    }
}

/// A decision matrix with one row per alternative and one column per criterion, as consumed by
/// SAW, WP and TOPSIS. `weights` are kept as entered; engines normalize a copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub rows: usize,
    pub cols: usize,
    pub weights: Vec<f64>,
    pub types: Vec<CriterionType>,
    pub values: Matrix,
}

impl DecisionInput {
    pub fn new(values: Matrix, weights: Vec<f64>, types: Vec<CriterionType>) -> Self {
        Self {
            rows: values.len(),
            cols: values.first().map(Vec::len).unwrap_or(0),
            weights,
            types,
            values,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::validation(
                "decision matrix needs at least one alternative and one criterion",
            ));
        }
        if self.values.len() != self.rows {
            return Err(Error::validation(format!(
                "expected {} rows of values, got {}",
                self.rows,
                self.values.len()
            )));
        }
        if let Some(i) = self.values.iter().position(|row| row.len() != self.cols) {
            return Err(Error::validation(format!(
                "row A{} has {} values, expected {}",
                i + 1,
                self.values[i].len(),
                self.cols
            )));
        }
        if self.weights.len() != self.cols || self.types.len() != self.cols {
            return Err(Error::validation(format!(
                "expected {} weights and types, got {} weights and {} types",
                self.cols,
                self.weights.len(),
                self.types.len()
            )));
        }
        for (i, row) in self.values.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() || *value < 0.0 {
                    return Err(Error::validation(format!(
                        "value of A{} on C{} must be a non-negative number, got {value}",
                        i + 1,
                        j + 1
                    )));
                }
            }
        }
        if let Some(j) = self
            .weights
            .iter()
            .position(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(Error::validation(format!(
                "weight of C{} must be a non-negative number, got {}",
                j + 1,
                self.weights[j]
            )));
        }
        Ok(())
    }
}

/// Raw pairwise judgments for AHP. Only the upper triangle (`i < j`) of each matrix is read; the
/// lower triangle and diagonal are derived when the reciprocal matrix is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparisons {
    pub criteria: Matrix,
    /// One matrix per criterion, each comparing every pair of alternatives.
    pub alternatives: Vec<Matrix>,
}

impl PairwiseComparisons {
    /// Read comparisons from loosely typed JSON, reporting a missing object or a field that is not
    /// an array as a validation error rather than a decoding failure.
    pub fn from_json(value: Option<&serde_json::Value>) -> Result<Self, Error> {
        let object = match value {
            Some(serde_json::Value::Object(object)) => object,
            Some(serde_json::Value::Null) | None => {
                return Err(Error::validation("pairwise comparisons are required"))
            }
            Some(_) => {
                return Err(Error::validation("pairwise comparisons must be an object"))
            }
        };
        for field in ["criteria", "alternatives"] {
            if !matches!(object.get(field), Some(serde_json::Value::Array(_))) {
                return Err(Error::validation(format!(
                    "pairwise comparisons for {field} must be an array"
                )));
            }
        }
        serde_json::from_value(serde_json::Value::Object(object.clone()))
            .map_err(|err| Error::validation(format!("malformed pairwise comparisons: {err}")))
    }
}

/// Everything AHP was asked to compute, with identifiers filled in. Recorded as the first step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AhpInput {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub pairwise_comparisons: PairwiseComparisons,
}

pub(crate) fn default_labels(prefix: char, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}{i}")).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn input() -> DecisionInput {
        DecisionInput::new(
            vec![vec![80.0, 60.0], vec![70.0, 90.0]],
            vec![50.0, 50.0],
            vec![CriterionType::Benefit, CriterionType::Cost],
        )
    }

    #[test]
    fn valid_input() {
        let input = input();
        assert_eq!((input.rows, input.cols), (2, 2));
        input.validate().unwrap();
    }

    #[test]
    fn ragged_rows_rejected() {
        let mut input = input();
        input.values[1].pop();
        assert!(matches!(input.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn negative_values_rejected() {
        let mut input = input();
        input.values[0][1] = -1.0;
        assert!(input.validate().is_err());
        let mut input = self::input();
        input.weights[0] = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn mismatched_weights_rejected() {
        let mut input = input();
        input.types.push(CriterionType::Benefit);
        assert!(input.validate().is_err());
    }

    #[test]
    fn wire_format() {
        let decoded: DecisionInput = serde_json::from_value(json!({
            "rows": 1,
            "cols": 2,
            "weights": [1, 2],
            "types": ["benefit", "cost"],
            "values": [[3, 4]],
        }))
        .unwrap();
        assert_eq!(decoded.types, vec![CriterionType::Benefit, CriterionType::Cost]);
        assert_eq!(decoded.values, vec![vec![3.0, 4.0]]);
    }

    #[test]
    fn comparisons_from_json() {
        let value = json!({
            "criteria": [[1, 3], [0.33, 1]],
            "alternatives": [[[1, 2], [0.5, 1]], [[1, 4], [0.25, 1]]],
        });
        let comparisons = PairwiseComparisons::from_json(Some(&value)).unwrap();
        assert_eq!(comparisons.alternatives.len(), 2);

        assert!(matches!(
            PairwiseComparisons::from_json(None),
            Err(Error::Validation { .. })
        ));
        let value = json!({ "criteria": "[[1]]", "alternatives": [] });
        assert!(matches!(
            PairwiseComparisons::from_json(Some(&value)),
            Err(Error::Validation { .. })
        ));
        let value = json!({ "criteria": [[1]] });
        assert!(PairwiseComparisons::from_json(Some(&value)).is_err());
    }
}
