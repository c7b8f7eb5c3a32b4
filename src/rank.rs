use serde::{Deserialize, Serialize};

use crate::{num::Score, Error};

/// One alternative's place in a ranking. `index` is the 1-based position of the alternative in
/// the input, which is how the alternative is identified (`A{index}`) everywhere downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub index: usize,
    pub value: f64,
    pub rank: usize,
}

/// Rank `scores` from highest to lowest. Equal scores keep their input order. The returned items
/// are in rank order, so `items[k].rank == k + 1`.
pub fn rank(scores: &[f64]) -> Result<Vec<RankedItem>, Error> {
    let keyed = scores
        .iter()
        .enumerate()
        .map(|(i, value)| {
            Score::new(*value)
                .map(|score| (score, i))
                .ok_or_else(|| Error::data("ranking", format!("score of A{} is {value}", i + 1)))
        })
        .collect::<Result<Vec<(Score, usize)>, Error>>()?;
    let order = permutation::sort_by(&keyed, |(a, i), (b, j)| b.cmp(a).then(i.cmp(j)));
    Ok(order
        .apply_slice(&keyed)
        .into_iter()
        .enumerate()
        .map(|(position, (score, i))| RankedItem {
            index: i + 1,
            value: score.as_f64(),
            rank: position + 1,
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn descending_with_stable_ties() {
        let ranked = rank(&[0.2, 0.9, 0.2, 0.5]).unwrap();
        let order: Vec<(usize, usize)> = ranked.iter().map(|r| (r.index, r.rank)).collect();
        assert_eq!(order, vec![(2, 1), (4, 2), (1, 3), (3, 4)]);
    }

    #[test]
    fn non_finite_score_rejected() {
        assert!(matches!(
            rank(&[0.1, f64::NAN]),
            Err(Error::Data { stage: "ranking", .. })
        ));
        assert!(rank(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn empty() {
        assert!(rank(&[]).unwrap().is_empty());
    }
}
