//! Random Forest регрессия на деревьях CART

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Дерево регрессии (MSE), пороги - середины между соседними значениями
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    max_depth: usize,
    min_samples_split: usize,
    n_features: usize,
    root: Option<TreeNode>,
}

impl RegressionTree {
    pub fn new(max_depth: usize, min_samples_split: usize) -> Self {
        Self {
            max_depth,
            min_samples_split: min_samples_split.max(2),
            n_features: 0,
            root: None,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(Error::Training("empty dataset".to_string()));
        }
        if X.nrows() != y.len() {
            return Err(Error::Training(format!(
                "{} feature rows but {} targets",
                X.nrows(),
                y.len()
            )));
        }

        self.n_features = X.ncols();
        self.root = Some(self.build_tree(X, y, 0, (0..X.nrows()).collect()));
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::depth)
    }

    fn build_tree(
        &self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        depth: usize,
        indices: Vec<usize>,
    ) -> TreeNode {
        let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64;

        if depth >= self.max_depth || indices.len() < self.min_samples_split {
            return TreeNode::Leaf { value: mean };
        }

        let Some((feature, threshold)) = self.best_split(X, y, &indices) else {
            return TreeNode::Leaf { value: mean };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| X[[i, feature]] < threshold);

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(self.build_tree(X, y, depth + 1, left_indices)),
            right: Box::new(self.build_tree(X, y, depth + 1, right_indices)),
        }
    }

    /// Перебор всех признаков и всех порогов между различными значениями.
    /// Возвращает None, если ни одно разделение не уменьшает сумму квадратов.
    fn best_split(
        &self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
    ) -> Option<(usize, f64)> {
        let n = indices.len() as f64;
        let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();
        let parent_sse = total_sq - total_sum * total_sum / n;

        let mut best: Option<(usize, f64)> = None;
        let mut best_sse = parent_sse - 1e-12;

        for feature in 0..X.ncols() {
            let mut sorted: Vec<(f64, f64)> =
                indices.iter().map(|&i| (X[[i, feature]], y[i])).collect();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 0..sorted.len() - 1 {
                let (x, target) = sorted[k];
                left_sum += target;
                left_sq += target * target;

                let next_x = sorted[k + 1].0;
                if next_x <= x {
                    continue;
                }

                let n_left = (k + 1) as f64;
                let n_right = n - n_left;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;

                let sse = (left_sq - left_sum * left_sum / n_left)
                    + (right_sq - right_sum * right_sum / n_right);

                if sse < best_sse {
                    best_sse = sse;
                    best = Some((feature, (x + next_x) / 2.0));
                }
            }
        }

        best
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(Error::NotTrained)?;
        if X.ncols() != self.n_features {
            return Err(Error::SchemaMismatch(format!(
                "tree expects {} columns, got {}",
                self.n_features,
                X.ncols()
            )));
        }

        Ok(X.rows()
            .into_iter()
            .map(|row| {
                let mut node = root;
                loop {
                    match node {
                        TreeNode::Leaf { value } => break *value,
                        TreeNode::Split {
                            feature,
                            threshold,
                            left,
                            right,
                        } => {
                            node = if row[*feature] < *threshold { &**left } else { &**right };
                        }
                    }
                }
            })
            .collect())
    }
}

/// Ансамбль деревьев на bootstrap-выборках, предсказание - среднее по деревьям
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    max_depth: usize,
    min_samples_split: usize,
    random_state: Option<u64>,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            n_estimators: n_estimators.max(1),
            max_depth: usize::MAX,
            min_samples_split: 2,
            random_state: None,
            trees: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let n_samples = X.nrows();
        if n_samples == 0 {
            return Err(Error::Training("empty dataset".to_string()));
        }
        if n_samples != y.len() {
            return Err(Error::Training(format!(
                "{} feature rows but {} targets",
                n_samples,
                y.len()
            )));
        }

        let mut trees = Vec::with_capacity(self.n_estimators);
        for i in 0..self.n_estimators {
            let mut rng = match self.random_state {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_entropy(),
            };

            // Bootstrap: выборка с возвращением того же размера
            let sample: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let X_boot = X.select(ndarray::Axis(0), &sample);
            let y_boot = y.select(ndarray::Axis(0), &sample);

            let mut tree = RegressionTree::new(self.max_depth, self.min_samples_split);
            tree.fit(&X_boot, &y_boot)?;
            trees.push(tree);
        }

        self.trees = trees;
        tracing::debug!(
            trees = self.trees.len(),
            max_depth = self.trees.iter().map(RegressionTree::depth).max().unwrap_or(0),
            "random forest fitted"
        );
        Ok(())
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(Error::NotTrained);
        }

        let mut predictions = Array1::zeros(X.nrows());
        for tree in &self.trees {
            predictions += &tree.predict(X)?;
        }
        Ok(predictions / self.trees.len() as f64)
    }
}
