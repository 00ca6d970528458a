//! # Tree Ensembles
//!
//! Decision-tree regressors stored in the flattened parallel-array layout
//! used by common training libraries:
//!
//! ```text
//! node i:  children_left[i], children_right[i]   (-1 on leaves)
//!          feature[i], threshold[i]               (ignored on leaves)
//!          value[i]                               (prediction on leaves)
//! ```
//!
//! Traversal starts at node 0 and goes left when
//! `x[feature] <= threshold`. Validation requires every child index to be
//! strictly greater than its parent's, which rules out cycles and keeps
//! traversal bounded by the node count.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const LEAF: i64 = -1;

/// One fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    /// A single-leaf tree that always predicts `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    /// Check structural consistency against the ensemble's input width.
    pub fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        const KIND: &str = "decision tree";
        let n = self.value.len();
        if n == 0 {
            return Err(ModelError::invalid(KIND, "tree has no nodes"));
        }
        for (name, len) in [
            ("children_left", self.children_left.len()),
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
        ] {
            if len != n {
                return Err(ModelError::invalid(
                    KIND,
                    format!("{name} has {len} entries for {n} nodes"),
                ));
            }
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if !self.value[node].is_finite() {
                return Err(ModelError::invalid(KIND, format!("node {node} value is not finite")));
            }
            match (left == LEAF, right == LEAF) {
                (true, true) => continue,
                (false, false) => {}
                _ => {
                    return Err(ModelError::invalid(
                        KIND,
                        format!("node {node} has exactly one child"),
                    ))
                }
            }
            for child in [left, right] {
                let in_range = usize::try_from(child).map(|c| c > node && c < n).unwrap_or(false);
                if !in_range {
                    return Err(ModelError::invalid(
                        KIND,
                        format!("node {node} has out-of-order child {child}"),
                    ));
                }
            }
            let feature_ok = usize::try_from(self.feature[node])
                .map(|f| f < n_features)
                .unwrap_or(false);
            if !feature_ok {
                return Err(ModelError::invalid(
                    KIND,
                    format!(
                        "node {node} splits on feature {} outside width {n_features}",
                        self.feature[node]
                    ),
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(ModelError::invalid(KIND, format!("node {node} threshold is NaN")));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Assumes `validate` has passed and the
    /// row width has been checked.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            // Training libraries compare single-precision inputs against
            // double thresholds; narrowing first reproduces their splits.
            let x = f64::from(row[feature] as f32);
            let next = if x <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
        }
        self.value[node]
    }
}

/// How per-tree outputs combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    Mean,
    /// Sum of tree outputs (gradient boosting).
    Sum,
}

/// A validated ensemble of regression trees.
///
/// `prediction = base_score + learning_rate * aggregate(tree outputs)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnsembleParams", into = "EnsembleParams")]
pub struct TreeEnsemble {
    n_features: usize,
    trees: Vec<DecisionTree>,
    aggregation: Aggregation,
    base_score: f64,
    learning_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnsembleParams {
    n_features: usize,
    trees: Vec<DecisionTree>,
    aggregation: Aggregation,
    #[serde(default)]
    base_score: f64,
    #[serde(default = "unit_learning_rate")]
    learning_rate: f64,
}

fn unit_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    /// Build a validated ensemble.
    pub fn new(
        n_features: usize,
        trees: Vec<DecisionTree>,
        aggregation: Aggregation,
        base_score: f64,
        learning_rate: f64,
    ) -> Result<Self, ModelError> {
        const KIND: &str = "tree ensemble";
        if n_features == 0 {
            return Err(ModelError::invalid(KIND, "n_features is zero"));
        }
        if trees.is_empty() {
            return Err(ModelError::invalid(KIND, "ensemble has no trees"));
        }
        if !base_score.is_finite() || !learning_rate.is_finite() {
            return Err(ModelError::invalid(
                KIND,
                "base_score and learning_rate must be finite",
            ));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features).map_err(|e| {
                ModelError::invalid(KIND, format!("tree {i}: {e}"))
            })?;
        }
        Ok(Self {
            n_features,
            trees,
            aggregation,
            base_score,
            learning_rate,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Predict one row.
    pub fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        ModelError::check_width(self.n_features, row)?;
        let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        let aggregate = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + self.learning_rate * aggregate)
    }
}

impl TryFrom<EnsembleParams> for TreeEnsemble {
    type Error = ModelError;

    fn try_from(p: EnsembleParams) -> Result<Self, Self::Error> {
        Self::new(
            p.n_features,
            p.trees,
            p.aggregation,
            p.base_score,
            p.learning_rate,
        )
    }
}

impl From<TreeEnsemble> for EnsembleParams {
    fn from(e: TreeEnsemble) -> Self {
        Self {
            n_features: e.n_features,
            trees: e.trees,
            aggregation: e.aggregation,
            base_score: e.base_score,
            learning_rate: e.learning_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x[0] <= 5 ? (x[1] <= 0.5 ? 10 : 20) : 30
    fn stump_pair() -> DecisionTree {
        DecisionTree {
            children_left: vec![1, 2, -1, -1, -1],
            children_right: vec![4, 3, -1, -1, -1],
            feature: vec![0, 1, -2, -2, -2],
            threshold: vec![5.0, 0.5, -2.0, -2.0, -2.0],
            value: vec![0.0, 0.0, 10.0, 20.0, 30.0],
        }
    }

    #[test]
    fn traversal_follows_thresholds() {
        let t = stump_pair();
        t.validate(2).unwrap();
        assert_eq!(t.predict(&[1.0, 0.0]), 10.0);
        assert_eq!(t.predict(&[1.0, 1.0]), 20.0);
        assert_eq!(t.predict(&[9.0, 0.0]), 30.0);
    }

    #[test]
    fn threshold_equality_goes_left() {
        assert_eq!(stump_pair().predict(&[5.0, 0.5]), 10.0);
    }

    #[test]
    fn mean_and_sum_aggregation() {
        let trees = vec![stump_pair(), DecisionTree::constant(50.0)];
        let forest = TreeEnsemble::new(2, trees.clone(), Aggregation::Mean, 0.0, 1.0).unwrap();
        assert_eq!(forest.predict(&[9.0, 0.0]).unwrap(), 40.0);

        let boosted = TreeEnsemble::new(2, trees, Aggregation::Sum, 100.0, 0.5).unwrap();
        assert_eq!(boosted.predict(&[9.0, 0.0]).unwrap(), 140.0);
    }

    #[test]
    fn validation_rejects_backward_child() {
        let mut t = stump_pair();
        t.children_left[1] = 0;
        assert!(t.validate(2).is_err());
    }

    #[test]
    fn validation_rejects_feature_outside_width() {
        let t = stump_pair();
        assert!(t.validate(1).is_err());
    }

    #[test]
    fn validation_rejects_ragged_arrays() {
        let mut t = stump_pair();
        t.threshold.pop();
        assert!(t.validate(2).is_err());
    }

    #[test]
    fn validation_rejects_half_leaf() {
        let mut t = stump_pair();
        t.children_right[1] = -1;
        assert!(t.validate(2).is_err());
    }

    #[test]
    fn ensemble_json_defaults() {
        let json = r#"{
            "n_features": 1,
            "aggregation": "mean",
            "trees": [{"children_left":[-1],"children_right":[-1],"feature":[-2],"threshold":[-2.0],"value":[7.5]}]
        }"#;
        let e: TreeEnsemble = serde_json::from_str(json).unwrap();
        assert_eq!(e.tree_count(), 1);
        assert_eq!(e.predict(&[0.0]).unwrap(), 7.5);
    }

    #[test]
    fn empty_ensemble_is_invalid() {
        assert!(TreeEnsemble::new(2, vec![], Aggregation::Mean, 0.0, 1.0).is_err());
    }
}
