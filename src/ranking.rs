use std::cmp::Ordering;

use crate::{entities::movie, models::RankedMovie};

/// Orders movies by rating, best first, and numbers them from 1.
///
/// Unrated movies sort after every rated one. Equal ratings keep id order, so
/// the result depends only on the input set and repeated calls agree.
pub fn rank(mut movies: Vec<movie::Model>) -> Vec<RankedMovie> {
    movies.sort_by(|a, b| by_rating_desc(a.rating, b.rating).then(a.id.cmp(&b.id)));

    movies
        .into_iter()
        .zip(1..)
        .map(|(movie, rank)| RankedMovie { rank, movie })
        .collect()
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `(id, rank)` pairs whose stored ranking is out of date.
pub fn stale_ranks(ranked: &[RankedMovie]) -> Vec<(i32, i32)> {
    ranked
        .iter()
        .filter(|r| r.movie.ranking != Some(r.rank))
        .map(|r| (r.movie.id, r.rank))
        .collect()
}
