//! CART regression tree
//!
//! Shared building block for [`RandomForest`](crate::RandomForest) and
//! [`GradientBoosting`](crate::GradientBoosting). Splits minimize the sum of
//! squared errors; on 0/1 targets this ranks splits the same way as Gini
//! impurity. Nodes live in a flat arena indexed from the root at `0`.

use feature_spi::{FeatureVector, FEATURE_COUNT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

const MIN_GAIN: f64 = 1e-12;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// `None` grows until leaves are pure or too small to split.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Candidate features per split. `None` considers all of them.
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// Fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl DecisionTree {
    /// Grow a tree on `rows[i]` for each `i` in `sample`.
    ///
    /// Leaves predict the mean target. When `hessians` are supplied the leaf
    /// value is `sum(target) / sum(hessian)`, a single Newton step.
    pub fn fit(
        rows: &[FeatureVector],
        targets: &[f64],
        hessians: Option<&[f64]>,
        sample: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut stack = vec![(0usize, sample.to_vec(), 0usize)];

        while let Some((slot, indices, depth)) = stack.pop() {
            let value = leaf_value(targets, hessians, &indices);
            let can_split = indices.len() >= params.min_samples_split.max(2)
                && params.max_depth.map_or(true, |max| depth < max);

            let split = if can_split {
                best_split(rows, targets, &indices, params, rng)
            } else {
                None
            };

            match split {
                Some(candidate) => {
                    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                        .iter()
                        .partition(|&&i| rows[i][candidate.feature] <= candidate.threshold);
                    let left = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::Leaf { value: 0.0 });
                    nodes.push(Node::Leaf { value: 0.0 });
                    nodes[slot] = Node::Split {
                        feature: candidate.feature,
                        threshold: candidate.threshold,
                        left,
                        right,
                    };
                    stack.push((right, right_idx, depth + 1));
                    stack.push((left, left_idx, depth + 1));
                }
                None => nodes[slot] = Node::Leaf { value },
            }
        }

        Self { nodes }
    }

    pub fn predict_row(&self, row: &FeatureVector) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
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

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }

    /// Every child index points inside the arena and past its parent, so
    /// [`predict_row`](Self::predict_row) always reaches a leaf.
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(i, n)| match n {
                Node::Leaf { value } => value.is_finite(),
                Node::Split {
                    left,
                    right,
                    threshold,
                    feature,
                } => {
                    *left > i
                        && *right > i
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                        && *feature < FEATURE_COUNT
                        && threshold.is_finite()
                }
            })
    }
}

fn leaf_value(targets: &[f64], hessians: Option<&[f64]>, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    match hessians {
        Some(h) => {
            let denom: f64 = indices.iter().map(|&i| h[i]).sum();
            sum / denom.max(1e-12)
        }
        None => sum / indices.len() as f64,
    }
}

fn best_split(
    rows: &[FeatureVector],
    targets: &[f64],
    indices: &[usize],
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;
    if parent_sse <= MIN_GAIN {
        return None;
    }

    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    if let Some(k) = params.max_features {
        features.shuffle(rng);
        features.truncate(k.clamp(1, FEATURE_COUNT));
    }

    let min_leaf = params.min_samples_leaf.max(1);
    let mut best: Option<SplitCandidate> = None;
    let mut order = indices.to_vec();

    for &feature in &features {
        order.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for pos in 0..n - 1 {
            let t = targets[order[pos]];
            left_sum += t;
            left_sq += t * t;

            let left_n = pos + 1;
            let right_n = n - left_n;
            if left_n < min_leaf || right_n < min_leaf {
                continue;
            }
            let here = rows[order[pos]][feature];
            let next = rows[order[pos + 1]][feature];
            if here == next {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_sse = left_sq - left_sum * left_sum / left_n as f64;
            let right_sse = right_sq - right_sum * right_sum / right_n as f64;
            let gain = parent_sse - left_sse - right_sse;

            if gain > MIN_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: here + (next - here) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn step_data() -> (Vec<FeatureVector>, Vec<f64>) {
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for i in 0..20 {
            let mut row = [0.0; FEATURE_COUNT];
            row[2] = i as f64;
            rows.push(row);
            targets.push(if i < 10 { 0.0 } else { 1.0 });
        }
        (rows, targets)
    }

    #[test]
    fn test_single_split_separates_step() {
        let (rows, targets) = step_data();
        let sample: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(
            &rows,
            &targets,
            None,
            &sample,
            &TreeParams::default(),
            &mut rng,
        );

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 2);
        assert!(tree.is_well_formed());

        let mut low = [0.0; FEATURE_COUNT];
        low[2] = 3.0;
        let mut high = [0.0; FEATURE_COUNT];
        high[2] = 15.0;
        assert_eq!(tree.predict_row(&low), 0.0);
        assert_eq!(tree.predict_row(&high), 1.0);
    }

    #[test]
    fn test_malformed_arenas() {
        let split = |left, right| Node::Split {
            feature: 0,
            threshold: 0.0,
            left,
            right,
        };
        let leaf = Node::Leaf { value: 0.5 };
        let cases = [
            vec![],
            vec![split(1, 2), leaf.clone()],
            vec![split(0, 1), leaf.clone()],
            vec![leaf.clone(), split(0, 0)],
            vec![Node::Leaf { value: f64::NAN }],
        ];
        for nodes in cases {
            assert!(!DecisionTree { nodes }.is_well_formed());
        }
        assert!(DecisionTree {
            nodes: vec![split(1, 2), leaf.clone(), leaf]
        }
        .is_well_formed());
    }

    #[test]
    fn test_max_depth_zero_is_stump_leaf() {
        let (rows, targets) = step_data();
        let sample: Vec<usize> = (0..rows.len()).collect();
        let params = TreeParams {
            max_depth: Some(0),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&rows, &targets, None, &sample, &params, &mut rng);
        assert_eq!(tree.node_count(), 1);
        assert!((tree.predict_row(&rows[0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_min_samples_leaf_respected() {
        let (rows, mut targets) = step_data();
        targets[19] = 0.0;
        targets[18] = 0.0;
        let sample: Vec<usize> = (0..rows.len()).collect();
        let params = TreeParams {
            min_samples_leaf: 5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&rows, &targets, None, &sample, &params, &mut rng);
        assert!(tree.is_well_formed());
        // No leaf can isolate the two flipped rows.
        let mut last = [0.0; FEATURE_COUNT];
        last[2] = 19.0;
        assert!(tree.predict_row(&last) > 0.0);
    }

    #[test]
    fn test_hessian_leaf_value() {
        let rows = vec![[0.0; FEATURE_COUNT]; 4];
        let targets = vec![0.5, 0.5, 0.5, 0.5];
        let hessians = vec![0.25; 4];
        let sample = vec![0, 1, 2, 3];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(
            &rows,
            &targets,
            Some(&hessians),
            &sample,
            &TreeParams::default(),
            &mut rng,
        );
        assert!((tree.predict_row(&rows[0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_features_yield_leaf() {
        let rows = vec![[1.0; FEATURE_COUNT]; 6];
        let targets = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let sample: Vec<usize> = (0..6).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(
            &rows,
            &targets,
            None,
            &sample,
            &TreeParams::default(),
            &mut rng,
        );
        assert_eq!(tree.node_count(), 1);
    }
}
