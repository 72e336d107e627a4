use crate::{
    entities::movie,
    error::AppResult,
    models::RankedMovie,
    ranking,
    store::MovieStore,
    tmdb::TmdbClient,
};

/// Reads the whole collection in rank order and refreshes stored ranks.
///
/// The rank write-back is best-effort; a failure is logged and the freshly
/// computed order is still returned.
pub async fn ranked(store: &MovieStore) -> AppResult<Vec<RankedMovie>> {
    let ranked = ranking::rank(store.list_all().await?);

    let stale = ranking::stale_ranks(&ranked);
    if let Err(err) = store.save_ranks(&stale).await {
        tracing::warn!(error = %err, stale = stale.len(), "failed to persist ranks");
    }

    Ok(ranked)
}

/// Resolves a provider candidate and stores it as a new, unrated movie.
pub async fn import(
    tmdb: &TmdbClient,
    store: &MovieStore,
    provider_id: i64,
) -> AppResult<movie::Model> {
    let new = tmdb.fetch_detail(provider_id).await?;
    tracing::debug!(provider_id, title = %new.title, "resolved candidate");
    store.insert(new).await
}
