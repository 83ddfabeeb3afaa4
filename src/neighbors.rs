//! Nearest-neighbor search and vote aggregation.
//!
//! Both Rocchio (distance to class centroids) and KNN (distance to training
//! vectors) rank candidates by Euclidean distance. Ranking is a stable sort,
//! so candidates at equal distance keep their input order: the earlier
//! centroid or training document wins a tie.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};

/// Euclidean (L2) distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ClassifyError::data(format!(
            "vector dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt())
}

/// A labeled candidate ranked by its distance to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Index of the candidate in the input slice.
    pub index: usize,
    /// Class of the candidate.
    pub label: String,
    /// Euclidean distance to the query.
    pub distance: f64,
}

/// Rank every candidate by distance to `query`, nearest first.
pub fn rank_by_distance<L: AsRef<str>>(
    candidates: &[Vec<f64>],
    labels: &[L],
    query: &[f64],
) -> Result<Vec<Neighbor>> {
    if candidates.len() != labels.len() {
        return Err(ClassifyError::data(format!(
            "{} candidates but {} labels",
            candidates.len(),
            labels.len()
        )));
    }

    let mut ranked = candidates
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(index, (vector, label))| {
            Ok(Neighbor {
                index,
                label: label.as_ref().to_string(),
                distance: euclidean_distance(vector, query)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(ranked)
}

/// The `k` candidates nearest to `query`, nearest first.
pub fn nearest_neighbors<L: AsRef<str>>(
    candidates: &[Vec<f64>],
    labels: &[L],
    query: &[f64],
    k: usize,
) -> Result<Vec<Neighbor>> {
    let mut ranked = rank_by_distance(candidates, labels, query)?;
    ranked.truncate(k);
    Ok(ranked)
}

/// Number of votes a label collected among a set of neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub label: String,
    pub votes: usize,
}

/// Tally one vote per neighbor, highest count first.
///
/// Labels with equal counts are ordered by their nearest neighbor, so the
/// label whose closest member is nearer to the query wins the tie.
pub fn vote_label(neighbors: &[Neighbor]) -> Vec<Vote> {
    let mut tally: Vec<Vote> = Vec::new();
    let mut slots: AHashMap<&str, usize> = AHashMap::new();

    for neighbor in neighbors {
        match slots.get(neighbor.label.as_str()) {
            Some(&slot) => tally[slot].votes += 1,
            None => {
                slots.insert(neighbor.label.as_str(), tally.len());
                tally.push(Vote {
                    label: neighbor.label.clone(),
                    votes: 1,
                });
            }
        }
    }

    tally.sort_by(|a, b| b.votes.cmp(&a.votes));
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(index: usize, label: &str, distance: f64) -> Neighbor {
        Neighbor {
            index,
            label: label.to_string(),
            distance,
        }
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
        assert!(euclidean_distance(&[0.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_nearest_neighbors_ties_keep_input_order() {
        let candidates = vec![vec![2.0], vec![1.0], vec![-1.0], vec![0.5]];
        let labels = ["far", "tie_first", "tie_second", "near"];

        let neighbors = nearest_neighbors(&candidates, &labels, &[0.0], 3).unwrap();

        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors[0].label, "near");
        assert_eq!(neighbors[1].label, "tie_first");
        assert_eq!(neighbors[2].label, "tie_second");
    }

    #[test]
    fn test_rank_requires_parallel_labels() {
        let candidates = vec![vec![1.0]];
        assert!(rank_by_distance::<&str>(&candidates, &[], &[0.0]).is_err());
    }

    #[test]
    fn test_vote_label_majority() {
        let votes = vote_label(&[
            neighbor(0, "a", 0.1),
            neighbor(1, "b", 0.2),
            neighbor(2, "b", 0.3),
        ]);

        assert_eq!(votes[0], Vote { label: "b".to_string(), votes: 2 });
        assert_eq!(votes[1], Vote { label: "a".to_string(), votes: 1 });
    }

    #[test]
    fn test_vote_label_tie_goes_to_nearest() {
        let votes = vote_label(&[
            neighbor(3, "b", 0.1),
            neighbor(0, "a", 0.2),
            neighbor(1, "a", 0.3),
            neighbor(2, "b", 0.4),
        ]);

        assert_eq!(votes[0].label, "b");
        assert_eq!(votes[0].votes, 2);
        assert_eq!(votes[1].label, "a");
    }
}
