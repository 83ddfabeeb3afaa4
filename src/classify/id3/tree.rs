//! In-memory decision tree.

use bit_vec::BitVec;

/// A binary decision tree over presence features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionTree {
    /// Terminal node carrying a class bit.
    Leaf(bool),
    /// Test of one attribute column.
    Split {
        attribute: usize,
        term: String,
        /// Subtree for rows where the term is present.
        present: Box<DecisionTree>,
        /// Subtree for rows where the term is absent.
        absent: Box<DecisionTree>,
    },
}

impl DecisionTree {
    /// Walk the tree for a feature row and return the class bit of the leaf
    /// reached. Columns beyond the row are treated as absent.
    pub fn classify(&self, row: &BitVec) -> bool {
        let mut node = self;
        loop {
            match node {
                DecisionTree::Leaf(class_bit) => return *class_bit,
                DecisionTree::Split {
                    attribute,
                    present,
                    absent,
                    ..
                } => {
                    node = if row.get(*attribute).unwrap_or(false) {
                        present.as_ref()
                    } else {
                        absent.as_ref()
                    };
                }
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 0,
            DecisionTree::Split { present, absent, .. } => 1 + present.depth().max(absent.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 1,
            DecisionTree::Split { present, absent, .. } => present.leaf_count() + absent.leaf_count(),
        }
    }

    /// Render the tree as a tab-indented outline.
    ///
    /// A split prints `term=1` followed by its present subtree one level
    /// deeper, then `term=0` followed by its absent subtree. Leaves print
    /// their class bit.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let indent = "\t".repeat(depth);
        match self {
            DecisionTree::Leaf(class_bit) => {
                out.push_str(&indent);
                out.push_str(if *class_bit { "1" } else { "0" });
                out.push('\n');
            }
            DecisionTree::Split {
                term, present, absent, ..
            } => {
                out.push_str(&format!("{indent}{term}=1\n"));
                present.write_outline(depth + 1, out);
                out.push_str(&format!("{indent}{term}=0\n"));
                absent.write_outline(depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DecisionTree {
        DecisionTree::Split {
            attribute: 0,
            term: "a".to_string(),
            present: Box::new(DecisionTree::Leaf(true)),
            absent: Box::new(DecisionTree::Split {
                attribute: 1,
                term: "b".to_string(),
                present: Box::new(DecisionTree::Leaf(true)),
                absent: Box::new(DecisionTree::Leaf(false)),
            }),
        }
    }

    #[test]
    fn test_outline() {
        assert_eq!(sample().to_outline(), "a=1\n\t1\na=0\n\tb=1\n\t\t1\n\tb=0\n\t\t0\n");
        assert_eq!(DecisionTree::Leaf(false).to_outline(), "0\n");
    }

    #[test]
    fn test_classify() {
        let tree = sample();
        assert!(tree.classify(&BitVec::from_bytes(&[0b1000_0000])));
        assert!(tree.classify(&BitVec::from_bytes(&[0b0100_0000])));
        assert!(!tree.classify(&BitVec::from_bytes(&[0b0000_0000])));
    }

    #[test]
    fn test_shape() {
        assert_eq!(sample().depth(), 2);
        assert_eq!(sample().leaf_count(), 3);
    }
}
