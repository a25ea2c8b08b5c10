use ndarray::{Array1, Array2, ArrayView1};

/// Cosine similarity between two vectors of equal dimension.
///
/// A zero vector is orthogonal to everything, so any comparison against it
/// scores 0.0 instead of dividing by zero.
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Rank every row of `documents` by descending cosine similarity to `query`
/// and keep the top `k`.
///
/// Ties resolve by original row order (the sort is stable), so rankings are
/// reproducible. `k` larger than the number of rows returns every row; an
/// empty matrix returns an empty ranking.
pub fn rank_by_similarity(
    documents: &Array2<f32>,
    query: &Array1<f32>,
    k: usize,
) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = documents
        .outer_iter()
        .enumerate()
        .map(|(index, row)| (index, cosine_similarity(row, query.view())))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}
