//! Entropy, information gain and ID3 tree induction.

use bit_vec::BitVec;

use crate::classify::id3::features::FeatureSpace;
use crate::classify::id3::tree::DecisionTree;

/// Gains at or below this value count as no information.
const MIN_GAIN: f64 = 1e-12;

/// Binary entropy (log2) of the class column over `rows`.
///
/// Empty and pure sets have entropy 0.
pub fn entropy(rows: &[&BitVec], class_column: usize) -> f64 {
    let total = rows.len();
    let positive = rows
        .iter()
        .filter(|row| row.get(class_column).unwrap_or(false))
        .count();
    if positive == 0 || positive == total {
        return 0.0;
    }

    let p = positive as f64 / total as f64;
    let q = 1.0 - p;
    -(p * p.log2()) - (q * q.log2())
}

/// Information gain of splitting `rows` on `attribute`.
///
/// Never negative; returns 0 for an empty row set.
pub fn gain(rows: &[&BitVec], attribute: usize, class_column: usize) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let (present, absent) = partition(rows, attribute);
    let total = rows.len() as f64;
    let remainder = entropy(&present, class_column) * present.len() as f64 / total
        + entropy(&absent, class_column) * absent.len() as f64 / total;

    (entropy(rows, class_column) - remainder).max(0.0)
}

/// Majority class bit of `rows`; a tie goes to 0.
pub fn majority(rows: &[&BitVec], class_column: usize) -> bool {
    let positive = rows
        .iter()
        .filter(|row| row.get(class_column).unwrap_or(false))
        .count();
    positive > rows.len() - positive
}

fn partition<'a>(rows: &[&'a BitVec], attribute: usize) -> (Vec<&'a BitVec>, Vec<&'a BitVec>) {
    rows.iter()
        .copied()
        .partition(|row| row.get(attribute).unwrap_or(false))
}

/// Induce a decision tree from training rows laid out by `space`.
///
/// One used-attribute mask is shared by the whole induction: an attribute
/// tested anywhere in the `present` branch of a split is unavailable to the
/// `absent` branch built after it.
pub fn induce(rows: &[&BitVec], space: &FeatureSpace) -> DecisionTree {
    let mut used = BitVec::from_elem(space.width(), false);
    used.set(space.class_column(), true);
    build(rows, space, &mut used)
}

fn build(rows: &[&BitVec], space: &FeatureSpace, used: &mut BitVec) -> DecisionTree {
    if rows.is_empty() {
        return DecisionTree::Leaf(true);
    }

    let class_column = space.class_column();
    let majority = majority(rows, class_column);

    let mut best: Option<(usize, f64)> = None;
    for attribute in 0..space.width() {
        if used.get(attribute).unwrap_or(true) {
            continue;
        }
        let gain = gain(rows, attribute, class_column);
        if best.is_none_or(|(_, best_gain)| gain > best_gain) {
            best = Some((attribute, gain));
        }
    }

    let (attribute, term) = match best {
        Some((attribute, gain)) if gain > MIN_GAIN => match space.term(attribute) {
            Some(term) => (attribute, term.to_string()),
            None => return DecisionTree::Leaf(majority),
        },
        _ => return DecisionTree::Leaf(majority),
    };

    used.set(attribute, true);

    let (present, absent) = partition(rows, attribute);
    let present = branch(&present, space, used, majority);
    let absent = branch(&absent, space, used, majority);

    DecisionTree::Split {
        attribute,
        term,
        present: Box::new(present),
        absent: Box::new(absent),
    }
}

/// An empty subset inherits the parent's majority.
fn branch(subset: &[&BitVec], space: &FeatureSpace, used: &mut BitVec, majority: bool) -> DecisionTree {
    if subset.is_empty() {
        DecisionTree::Leaf(majority)
    } else {
        build(subset, space, used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn bits(values: &[bool]) -> BitVec {
        values.iter().copied().collect()
    }

    #[test]
    fn test_entropy_pure_and_empty() {
        let a = bits(&[true, true]);
        let b = bits(&[false, true]);
        assert_eq!(entropy(&[&a, &b], 1), 0.0);
        assert_eq!(entropy(&[], 1), 0.0);
    }

    #[test]
    fn test_entropy_even_split() {
        let a = bits(&[true]);
        let b = bits(&[false]);
        assert!((entropy(&[&a, &b], 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gain_is_never_negative() {
        let rows = [
            bits(&[true, false, true]),
            bits(&[true, true, false]),
            bits(&[false, true, true]),
            bits(&[false, false, false]),
            bits(&[true, true, true]),
        ];
        let refs: Vec<&BitVec> = rows.iter().collect();
        for attribute in 0..2 {
            assert!(gain(&refs, attribute, 2) >= 0.0);
        }
    }

    #[test]
    fn test_perfect_split_gain() {
        let a = bits(&[true, true]);
        let b = bits(&[false, false]);
        assert!((gain(&[&a, &b], 0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_majority_tie_goes_to_zero() {
        let a = bits(&[true]);
        let b = bits(&[false]);
        assert!(!majority(&[&a, &b], 0));
        assert!(majority(&[&a, &a, &b], 0));
    }

    #[test]
    fn test_empty_rows_become_positive_leaf() {
        let docs = vec![Document::from_text("1", "a", Some("x"))];
        let space = FeatureSpace::from_documents(&docs).unwrap();
        assert_eq!(induce(&[], &space), DecisionTree::Leaf(true));
    }

    #[test]
    fn test_single_split_on_separating_term() {
        let docs = vec![
            Document::from_text("1", "a b", Some("china")),
            Document::from_text("2", "a c", Some("china")),
            Document::from_text("3", "b c", Some("other")),
            Document::from_text("4", "d", Some("other")),
        ];
        let space = FeatureSpace::from_documents(&docs).unwrap();
        let rows: Vec<BitVec> = docs
            .iter()
            .map(|doc| space.row(&doc.tokens, doc.label() == Some("china")))
            .collect();
        let refs: Vec<&BitVec> = rows.iter().collect();

        let tree = induce(&refs, &space);
        assert_eq!(
            tree,
            DecisionTree::Split {
                attribute: 0,
                term: "a".to_string(),
                present: Box::new(DecisionTree::Leaf(true)),
                absent: Box::new(DecisionTree::Leaf(false)),
            }
        );
    }

    #[test]
    fn test_training_rows_are_reproduced() {
        let docs = vec![
            Document::from_text("1", "a b", Some("x")),
            Document::from_text("2", "b c", Some("x")),
            Document::from_text("3", "a c", Some("y")),
            Document::from_text("4", "c d", Some("y")),
            Document::from_text("5", "b d", Some("x")),
        ];
        let space = FeatureSpace::from_documents(&docs).unwrap();
        let rows: Vec<BitVec> = docs
            .iter()
            .map(|doc| space.row(&doc.tokens, doc.label() == Some("x")))
            .collect();
        let refs: Vec<&BitVec> = rows.iter().collect();

        let tree = induce(&refs, &space);
        for row in &rows {
            assert_eq!(tree.classify(row), row[space.class_column()]);
        }
    }

    #[test]
    fn test_absent_branch_skips_attributes_used_in_present_branch() {
        let mut docs: Vec<Document> = (0..3)
            .map(|i| Document::from_text(format!("p{i}"), "a x", Some("pos")))
            .collect();
        docs.push(Document::from_text("n1", "a", Some("neg")));
        docs.push(Document::from_text("n2", "x", Some("neg")));
        docs.push(Document::from_text("p3", "", Some("pos")));
        docs.push(Document::from_text("p4", "", Some("pos")));

        let space = FeatureSpace::from_documents(&docs).unwrap();
        let rows: Vec<BitVec> = docs
            .iter()
            .map(|doc| space.row(&doc.tokens, doc.label() == Some("pos")))
            .collect();
        let refs: Vec<&BitVec> = rows.iter().collect();

        let tree = induce(&refs, &space);
        assert_eq!(tree.to_outline(), "a=1\n\tx=1\n\t\t1\n\tx=0\n\t\t0\na=0\n\t1\n");
    }
}
