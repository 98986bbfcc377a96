//! Random forest regression over listing feature vectors
//!
//! CART trees split on variance reduction, each fitted to a bootstrap sample
//! of the training set. All randomness flows from a single seeded RNG, so a
//! given (data, params) pair always produces the same forest.

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::models::{FeatureVector, FEATURE_COUNT};

/// Forest hyperparameters, kept explicit for reproducibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub random_seed: u64,
    /// Unlimited when `None`
    pub max_depth: Option<usize>,
    /// Smallest node that may still be split
    pub min_samples_split: usize,
    /// Features drawn per split; all features when `None`
    pub max_features: Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_seed: 42,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single regression tree stored as a flat node arena
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    cost: f64,
}

struct TreeBuilder<'a> {
    x: &'a [FeatureVector],
    y: &'a [f64],
    params: &'a ForestParams,
    nodes: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let n = samples.len();
        let mean = samples.iter().map(|&i| self.y[i]).sum::<f64>() / n as f64;

        let depth_exhausted = self.params.max_depth.is_some_and(|max| depth >= max);
        let pure = samples.iter().all(|&i| self.y[i] == self.y[samples[0]]);

        if depth_exhausted || pure || n < self.params.min_samples_split.max(2) {
            return self.push(Node::Leaf { value: mean });
        }

        let Some(split) = self.best_split(&samples, rng) else {
            return self.push(Node::Leaf { value: mean });
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&i| self.x[i][split.feature] <= split.threshold);

        // Reserve this node's slot before the children so the root stays at 0
        let id = self.push(Node::Leaf { value: mean });
        let left = self.build(left_samples, depth + 1, rng);
        let right = self.build(right_samples, depth + 1, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Lowest summed squared error over candidate features and thresholds
    fn best_split(&self, samples: &[usize], rng: &mut StdRng) -> Option<SplitCandidate> {
        let k = self
            .params
            .max_features
            .unwrap_or(FEATURE_COUNT)
            .clamp(1, FEATURE_COUNT);
        let features = index::sample(rng, FEATURE_COUNT, k).into_vec();

        let n = samples.len() as f64;
        let total_sum: f64 = samples.iter().map(|&i| self.y[i]).sum();
        let total_sq: f64 = samples.iter().map(|&i| self.y[i] * self.y[i]).sum();

        let mut best: Option<SplitCandidate> = None;

        for feature in features {
            let mut order = samples.to_vec();
            order.sort_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for pos in 0..order.len() - 1 {
                let yi = self.y[order[pos]];
                left_sum += yi;
                left_sq += yi * yi;

                let here = self.x[order[pos]][feature];
                let next = self.x[order[pos + 1]][feature];
                if here == next {
                    continue;
                }

                let left_n = (pos + 1) as f64;
                let right_n = n - left_n;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let cost = (left_sq - left_sum * left_sum / left_n)
                    + (right_sq - right_sum * right_sum / right_n);

                if best.as_ref().map_or(true, |b| cost < b.cost) {
                    let mut threshold = here + (next - here) / 2.0;
                    // Midpoint can round up to `next` for adjacent floats
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        cost,
                    });
                }
            }
        }

        best
    }
}

impl RegressionTree {
    /// Fits a tree on the given sample indices (duplicates allowed)
    fn fit(
        x: &[FeatureVector],
        y: &[f64],
        samples: Vec<usize>,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = TreeBuilder {
            x,
            y,
            params,
            nodes: Vec::new(),
        };
        builder.build(samples, 0, rng);
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Bagged ensemble of regression trees; predictions are the tree mean
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Fits the forest. Returns `None` for an empty training set or zero estimators.
    pub fn fit(x: &[FeatureVector], y: &[f64], params: &ForestParams) -> Option<Self> {
        if x.is_empty() || x.len() != y.len() || params.n_estimators == 0 {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(params.random_seed);
        let n = x.len();

        let trees = (0..params.n_estimators)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(x, y, bootstrap, params, &mut rng)
            })
            .collect();

        Some(Self { trees })
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        total / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(n_estimators: usize) -> ForestParams {
        ForestParams {
            n_estimators,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_single_tree_fits_separable_data() {
        let x = vec![
            [100.0, 1.0, 0.0, 0.0],
            [200.0, 2.0, 0.0, 0.0],
            [300.0, 3.0, 1.0, 0.0],
            [400.0, 4.0, 1.0, 1.0],
        ];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let mut rng = StdRng::seed_from_u64(0);

        let tree = RegressionTree::fit(&x, &y, (0..4).collect(), &ForestParams::default(), &mut rng);
        for (features, target) in x.iter().zip(&y) {
            assert_eq!(tree.predict(features), *target);
        }
        // Three splits and four leaves for four distinct targets
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_max_depth_zero_predicts_mean() {
        let x = vec![[1.0, 0.0, 0.0, 0.0], [2.0, 0.0, 0.0, 0.0]];
        let y = vec![2.0, 4.0];
        let p = ForestParams {
            max_depth: Some(0),
            ..ForestParams::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        let tree = RegressionTree::fit(&x, &y, vec![0, 1], &p, &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[5.0, 0.0, 0.0, 0.0]), 3.0);
    }

    #[test]
    fn test_identical_features_cannot_split() {
        let x = vec![[1.0, 1.0, 1.0, 1.0], [1.0, 1.0, 1.0, 1.0]];
        let y = vec![1.0, 3.0];
        let mut rng = StdRng::seed_from_u64(0);

        let tree = RegressionTree::fit(&x, &y, vec![0, 1], &ForestParams::default(), &mut rng);
        assert_eq!(tree.predict(&x[0]), 2.0);
    }

    #[test]
    fn test_empty_training_set() {
        assert!(RandomForest::fit(&[], &[], &params(10)).is_none());
        assert!(RandomForest::fit(&[[0.0; 4]], &[1.0], &params(0)).is_none());
    }

    #[test]
    fn test_forest_is_deterministic() {
        let x = vec![
            [300_000.0, 3.0, 1.0, 0.0],
            [250_000.0, 2.0, 0.0, 0.0],
            [400_000.0, 4.0, 1.0, 1.0],
            [200_000.0, 2.0, 1.0, 1.0],
        ];
        let y = vec![4.0, 2.0, 5.0, 3.5];

        let a = RandomForest::fit(&x, &y, &params(25)).unwrap();
        let b = RandomForest::fit(&x, &y, &params(25)).unwrap();
        assert_eq!(a, b);
        for features in &x {
            assert_eq!(a.predict(features), b.predict(features));
        }
        assert_eq!(a.n_trees(), 25);
    }

    #[test]
    fn test_predictions_within_target_range() {
        let x = vec![
            [300_000.0, 3.0, 1.0, 0.0],
            [250_000.0, 2.0, 0.0, 0.0],
            [400_000.0, 4.0, 1.0, 1.0],
        ];
        let y = vec![4.0, 1.0, 5.0];
        let forest = RandomForest::fit(&x, &y, &params(50)).unwrap();

        for features in &x {
            let prediction = forest.predict(features);
            assert!((1.0..=5.0).contains(&prediction));
        }
    }

    #[test]
    fn test_feature_subsampling_is_deterministic() {
        let x = vec![
            [1.0, 5.0, 0.0, 1.0],
            [2.0, 4.0, 1.0, 0.0],
            [3.0, 3.0, 0.0, 1.0],
            [4.0, 2.0, 1.0, 0.0],
        ];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        let p = ForestParams {
            n_estimators: 10,
            max_features: Some(1),
            ..ForestParams::default()
        };

        let a = RandomForest::fit(&x, &y, &p).unwrap();
        let b = RandomForest::fit(&x, &y, &p).unwrap();
        assert_eq!(a.predict(&[2.5, 3.5, 0.0, 1.0]), b.predict(&[2.5, 3.5, 0.0, 1.0]));
    }
}
