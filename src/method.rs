pub mod ahp;
pub mod saw;
pub mod topsis;
pub mod wp;

use serde::{Deserialize, Serialize};

use crate::{input::DecisionInput, rank::RankedItem, step::Step, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Saw,
    Wp,
    Topsis,
    Ahp,
}

impl Method {
    pub const ALL: [Self; 4] = [Self::Saw, Self::Wp, Self::Topsis, Self::Ahp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saw => "saw",
            Self::Wp => "wp",
            Self::Topsis => "topsis",
            Self::Ahp => "ahp",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!("unknown method {s:?}, expected saw, wp, topsis or ahp"))
            })
    }
}

/// Output of the decision-matrix methods: the step trace and the final ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub steps: Vec<Step>,
    pub result: Vec<RankedItem>,
}

/// Run one of the decision-matrix methods. AHP works on pairwise comparisons instead of a
/// decision matrix and has to be called through [`ahp::calculate`].
pub fn calculate(method: Method, input: &DecisionInput) -> Result<Calculation, Error> {
    match method {
        Method::Saw => saw::calculate(input),
        Method::Wp => wp::calculate(input),
        Method::Topsis => topsis::calculate(input),
        Method::Ahp => Err(Error::validation("AHP requires pairwise comparisons")),
    }
}
