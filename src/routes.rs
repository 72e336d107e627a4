use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};

use crate::{
    AppState, collection,
    error::{AppError, AppResult},
    models::{FindMovieRequest, MovieIdQuery, RateMovieRequest, SelectCandidateRequest},
    templates,
};

/// Matches the `review` column width.
const MAX_REVIEW_CHARS: usize = 250;

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = collection::ranked(&state.store).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page())
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(req): Form<FindMovieRequest>,
) -> AppResult<Html<String>> {
    let title = req.title.trim().to_string();
    let candidates = state.tmdb.search(&title).await?;
    Ok(Html(templates::select_page(&title, &candidates)))
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    Form(req): Form<SelectCandidateRequest>,
) -> AppResult<Redirect> {
    let movie = collection::import(&state.tmdb, &state.store, req.provider_id()?).await?;
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieIdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.movie_id()?).await?;
    Ok(Html(templates::edit_page(&movie)))
}

pub async fn rate(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieIdQuery>,
    Form(req): Form<RateMovieRequest>,
) -> AppResult<Redirect> {
    let id = q.movie_id()?;
    let rating = parse_rating(&req.rating)?;
    let review = parse_review(&req.review)?;
    state.store.update_rating(id, rating, review).await?;
    Ok(Redirect::to("/"))
}

pub async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieIdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.movie_id()?).await?;
    Ok(Html(templates::delete_page(&movie)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieIdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.movie_id()?).await?;
    Ok(Redirect::to("/"))
}

fn parse_rating(raw: &str) -> AppResult<f64> {
    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("rating must be a number, got {raw:?}")))?;

    if !(0.0..=10.0).contains(&rating) {
        return Err(AppError::InvalidInput("rating must be between 0 and 10".to_string()));
    }
    Ok(rating)
}

fn parse_review(raw: &str) -> AppResult<String> {
    let review = raw.trim();
    if review.chars().count() > MAX_REVIEW_CHARS {
        return Err(AppError::InvalidInput(format!(
            "review must be at most {MAX_REVIEW_CHARS} characters"
        )));
    }
    Ok(review.to_string())
}
