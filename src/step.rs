//! The step trace returned by every engine. Each step records one computation stage for display
//! and export; engines never read steps back.
//!
//! Steps serialize as `{"title": ..., "data": ...}`. The titles are a fixed vocabulary that
//! renderers key their layouts on, so they must not change.

use serde::{Deserialize, Serialize};

use crate::{
    input::{AhpInput, DecisionInput},
    matrix::Matrix,
    method::ahp::{Consistency, ConsistencyWarning},
    rank::RankedItem,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "title", content = "data")]
pub enum Step {
    #[serde(rename = "Input Data")]
    InputData(StepInput),
    #[serde(rename = "Normalized Weights")]
    NormalizedWeights(Vec<f64>),
    #[serde(rename = "Normalized Matrix")]
    NormalizedMatrix(Matrix),
    #[serde(rename = "Weighted Matrix")]
    WeightedMatrix(Matrix),
    #[serde(rename = "Weighted Sum")]
    WeightedSum(Vec<f64>),
    #[serde(rename = "S Values")]
    SValues(Vec<f64>),
    #[serde(rename = "Final Ranking")]
    FinalRanking(Vec<RankedItem>),
    #[serde(rename = "Normalized Decision Matrix")]
    NormalizedDecisionMatrix(Matrix),
    #[serde(rename = "Weighted Decision Matrix")]
    WeightedDecisionMatrix(Matrix),
    #[serde(rename = "Ideal Solutions")]
    IdealSolutions(IdealSolutions),
    #[serde(rename = "Distances to Ideal Solutions")]
    Distances(Distances),
    #[serde(rename = "Preference Values")]
    PreferenceValues(Vec<RankedItem>),
    #[serde(rename = "Pairwise Comparison Matrices")]
    PairwiseComparisonMatrices(ComparisonMatrices),
    #[serde(rename = "Normalized Matrices")]
    NormalizedMatrices(ComparisonMatrices),
    #[serde(rename = "Calculated Weights")]
    CalculatedWeights(PriorityWeights),
    #[serde(rename = "Final Scores")]
    FinalScores(Vec<RankedItem>),
    #[serde(rename = "Consistency Check")]
    ConsistencyCheck(ConsistencyReport),
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Self::InputData(_) => "Input Data",
            Self::NormalizedWeights(_) => "Normalized Weights",
            Self::NormalizedMatrix(_) => "Normalized Matrix",
            Self::WeightedMatrix(_) => "Weighted Matrix",
            Self::WeightedSum(_) => "Weighted Sum",
            Self::SValues(_) => "S Values",
            Self::FinalRanking(_) => "Final Ranking",
            Self::NormalizedDecisionMatrix(_) => "Normalized Decision Matrix",
            Self::WeightedDecisionMatrix(_) => "Weighted Decision Matrix",
            Self::IdealSolutions(_) => "Ideal Solutions",
            Self::Distances(_) => "Distances to Ideal Solutions",
            Self::PreferenceValues(_) => "Preference Values",
            Self::PairwiseComparisonMatrices(_) => "Pairwise Comparison Matrices",
            Self::NormalizedMatrices(_) => "Normalized Matrices",
            Self::CalculatedWeights(_) => "Calculated Weights",
            Self::FinalScores(_) => "Final Scores",
            Self::ConsistencyCheck(_) => "Consistency Check",
        }
    }
}

/// The input echoed back as the first step. Matrix methods and AHP share the title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepInput {
    Matrix(DecisionInput),
    Pairwise(AhpInput),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealSolutions {
    pub ideal_positive: Vec<f64>,
    pub ideal_negative: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distances {
    pub distance_to_positive: Vec<f64>,
    pub distance_to_negative: Vec<f64>,
}

/// The criteria matrix and the per-criterion alternative matrices at one AHP stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrices {
    pub criteria: Matrix,
    pub alternatives: Vec<Matrix>,
}

/// Priority vectors: one weight per criterion, and per criterion one weight per alternative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub criteria: Vec<f64>,
    pub alternatives: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub threshold: f64,
    pub criteria: Consistency,
    pub alternatives: Vec<Consistency>,
    pub warnings: Vec<ConsistencyWarning>,
}
