//! Latent Dirichlet Allocation fitted by batch variational Bayes.
//!
//! Each outer iteration runs an E-step over every document (bounded inner loop on the
//! per-document topic parameters) and an M-step updating the topic-word parameters `lambda`.
//! There are exactly `max_iterations` outer passes with no perplexity-based early stop.
//! The seeded RNG makes repeated fits over the same matrix identical.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::topics::vectorizer::DocumentTermMatrix;
use crate::topics::TopicError;

/// Terms reported per topic.
pub const TOP_TERMS_PER_TOPIC: usize = 5;

const MAX_DOC_UPDATE_ITER: usize = 100;
const MEAN_CHANGE_TOL: f64 = 1e-3;
const EPS: f64 = 1e-100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdaParams {
    pub num_topics: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            num_topics: 1,
            max_iterations: 10,
            seed: 42,
        }
    }
}

/// Fit artifact: one weight per (topic, column). Consumed once per request.
#[derive(Debug, Clone)]
pub struct TopicModel {
    components: Vec<Vec<f64>>,
}

impl TopicModel {
    #[cfg(test)]
    pub fn num_topics(&self) -> usize {
        self.components.len()
    }

    #[cfg(test)]
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Column indices of the `n` heaviest terms per topic, heaviest first.
    /// Equal weights keep ascending column order.
    pub fn top_columns(&self, n: usize) -> Vec<Vec<usize>> {
        self.components
            .iter()
            .map(|weights| {
                let mut order: Vec<usize> = (0..weights.len()).collect();
                order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
                order.truncate(n);
                order
            })
            .collect()
    }

    /// One comma-joined label per topic built from the top terms of `matrix`'s vocabulary.
    pub fn labels(&self, matrix: &DocumentTermMatrix, n: usize) -> Vec<String> {
        let terms = matrix.terms();
        self.top_columns(n)
            .into_iter()
            .map(|columns| {
                columns
                    .into_iter()
                    .filter_map(|j| terms.get(j).map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|label| !label.is_empty())
            .collect()
    }
}

/// Fits the model and returns the per-topic label strings in topic order.
pub fn infer_topics(
    matrix: &DocumentTermMatrix,
    params: &LdaParams,
) -> Result<Vec<String>, TopicError> {
    let model = fit(matrix, params)?;
    Ok(model.labels(matrix, TOP_TERMS_PER_TOPIC))
}

pub fn fit(matrix: &DocumentTermMatrix, params: &LdaParams) -> Result<TopicModel, TopicError> {
    if params.num_topics == 0 {
        return Err(TopicError::InvalidTopicCount(params.num_topics));
    }
    if matrix.is_degenerate() {
        return Err(TopicError::EmptyMatrix);
    }

    let k = params.num_topics;
    let n_terms = matrix.n_cols();
    let alpha = 1.0 / k as f64;
    let eta = 1.0 / k as f64;
    let mut rng = StdRng::seed_from_u64(params.seed);

    // Sparse view of each row: (column, weight) for non-zero cells.
    let docs: Vec<Vec<(usize, f64)>> = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v > 0.0)
                .map(|(j, v)| (j, *v))
                .collect()
        })
        .collect();

    let mut lambda: Vec<Vec<f64>> = (0..k)
        .map(|_| (0..n_terms).map(|_| rng.random_range(0.9..1.1)).collect())
        .collect();

    for iteration in 0..params.max_iterations {
        let exp_elog_beta: Vec<Vec<f64>> = lambda
            .iter()
            .map(|row| exp_dirichlet_expectation(row))
            .collect();
        let mut sstats = vec![vec![0.0; n_terms]; k];

        for doc in &docs {
            if doc.is_empty() {
                continue;
            }
            let mut gamma: Vec<f64> = (0..k).map(|_| rng.random_range(0.9..1.1)).collect();
            let mut exp_elog_theta = exp_dirichlet_expectation(&gamma);
            let mut phi_norm = phi_normalizers(doc, &exp_elog_theta, &exp_elog_beta);

            for _ in 0..MAX_DOC_UPDATE_ITER {
                let previous = gamma.clone();
                for (t, g) in gamma.iter_mut().enumerate() {
                    let dot: f64 = doc
                        .iter()
                        .zip(&phi_norm)
                        .map(|(&(j, x), &norm)| x / norm * exp_elog_beta[t][j])
                        .sum();
                    *g = alpha + exp_elog_theta[t] * dot;
                }
                exp_elog_theta = exp_dirichlet_expectation(&gamma);
                phi_norm = phi_normalizers(doc, &exp_elog_theta, &exp_elog_beta);

                let mean_change = gamma
                    .iter()
                    .zip(&previous)
                    .map(|(a, b)| (a - b).abs())
                    .sum::<f64>()
                    / k as f64;
                if mean_change < MEAN_CHANGE_TOL {
                    break;
                }
            }

            for (t, stats) in sstats.iter_mut().enumerate() {
                for (&(j, x), &norm) in doc.iter().zip(&phi_norm) {
                    stats[j] += exp_elog_theta[t] * x / norm;
                }
            }
        }

        for ((topic, stats), beta) in lambda.iter_mut().zip(&sstats).zip(&exp_elog_beta) {
            for ((weight, s), b) in topic.iter_mut().zip(stats).zip(beta) {
                *weight = eta + s * b;
            }
        }
        debug!(iteration, topics = k, terms = n_terms, "LDA pass complete");
    }

    Ok(TopicModel { components: lambda })
}

fn phi_normalizers(
    doc: &[(usize, f64)],
    exp_elog_theta: &[f64],
    exp_elog_beta: &[Vec<f64>],
) -> Vec<f64> {
    doc.iter()
        .map(|&(j, _)| {
            exp_elog_theta
                .iter()
                .zip(exp_elog_beta)
                .map(|(theta, beta)| theta * beta[j])
                .sum::<f64>()
                + EPS
        })
        .collect()
}

/// exp(E[log x]) for x ~ Dirichlet(params).
fn exp_dirichlet_expectation(params: &[f64]) -> Vec<f64> {
    let total = digamma(params.iter().sum());
    params.iter().map(|&p| (digamma(p) - total).exp()).collect()
}

/// Digamma via upward recurrence to x >= 6, then the asymptotic series.
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let series = 1.0 / 12.0
        - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0)));
    result + x.ln() - 0.5 * inv - inv2 * series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::vectorizer::vectorize;

    fn sample_matrix() -> DocumentTermMatrix {
        let chunks = [
            "python backend developer python django api developer",
            "backend api microservice python cloud deployment",
            "developer python testing backend api",
        ];
        vectorize(&chunks, 2000).unwrap()
    }

    #[test]
    fn test_digamma_known_values() {
        // psi(1) = -gamma_euler, psi(0.5) = -gamma_euler - 2 ln 2
        let euler = 0.577_215_664_901_532_9;
        assert!((digamma(1.0) + euler).abs() < 1e-8);
        assert!((digamma(0.5) + euler + 2.0 * 2f64.ln()).abs() < 1e-8);
        assert!((digamma(10.0) - 2.251_752_589_066_721).abs() < 1e-8);
    }

    #[test]
    fn test_fit_is_deterministic_for_fixed_seed() {
        let matrix = sample_matrix();
        let params = LdaParams::default();
        let first = infer_topics(&matrix, &params).unwrap();
        let second = infer_topics(&matrix, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_topic_label_has_five_terms() {
        let labels = infer_topics(&sample_matrix(), &LdaParams::default()).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].split(", ").count(), TOP_TERMS_PER_TOPIC);
    }

    #[test]
    fn test_single_topic_ranks_heaviest_column_first() {
        let matrix = sample_matrix();
        let model = fit(&matrix, &LdaParams::default()).unwrap();
        let column_mass: Vec<f64> = (0..matrix.n_cols())
            .map(|j| matrix.rows().iter().map(|r| r[j]).sum())
            .collect();
        let heaviest = (0..column_mass.len())
            .max_by(|&a, &b| column_mass[a].total_cmp(&column_mass[b]).then(b.cmp(&a)))
            .unwrap();
        assert_eq!(model.top_columns(1)[0][0], heaviest);
        assert_eq!(matrix.terms()[heaviest], "python");
    }

    #[test]
    fn test_fewer_terms_than_top_n() {
        let matrix = vectorize(&["rust rust go"], 2000).unwrap();
        let labels = infer_topics(&matrix, &LdaParams::default()).unwrap();
        assert_eq!(labels, vec!["rust, go"]);
    }

    #[test]
    fn test_multiple_topics_produce_one_label_each() {
        let params = LdaParams {
            num_topics: 3,
            ..LdaParams::default()
        };
        let model = fit(&sample_matrix(), &params).unwrap();
        assert_eq!(model.num_topics(), 3);
        assert!(model.components().iter().flatten().all(|w| *w > 0.0));
        assert_eq!(model.labels(&sample_matrix(), 5).len(), 3);
    }

    #[test]
    fn test_degenerate_matrix_is_rejected() {
        let matrix = vectorize(&["a b c"], 2000).unwrap();
        assert!(matches!(
            fit(&matrix, &LdaParams::default()),
            Err(TopicError::EmptyMatrix)
        ));
    }

    #[test]
    fn test_zero_topics_is_rejected() {
        let params = LdaParams {
            num_topics: 0,
            ..LdaParams::default()
        };
        assert!(matches!(
            fit(&sample_matrix(), &params),
            Err(TopicError::InvalidTopicCount(0))
        ));
    }

    #[test]
    fn test_top_columns_tie_break_by_index() {
        let model = TopicModel {
            components: vec![vec![1.0, 3.0, 3.0, 2.0, 3.0]],
        };
        assert_eq!(model.top_columns(4), vec![vec![1, 2, 4, 3]]);
    }
}
