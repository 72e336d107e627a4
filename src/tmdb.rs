use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::TmdbConfig,
    error::{AppError, AppResult},
    models::{Candidate, NewMovie},
};

pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, config: TmdbConfig) -> Self {
        // Warn once on app load if using mock data
        if config.api_key.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_API_KEY provided");
        }

        let rps = NonZeroU32::new(config.rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, config, limiter }
    }

    fn is_mock(&self) -> bool {
        self.config.api_key.trim().is_empty()
    }

    /// Title search. Results come back in provider (relevance) order.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Candidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput("title is required".to_string()));
        }

        if self.is_mock() {
            return Ok(mock::search(query));
        }

        let url = format!("{}/search/movie", self.config.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self.get_json(url, &[("query", query)]).await?;

        tracing::debug!(query, hits = resp.results.len(), "tmdb search");
        Ok(resp.results)
    }

    pub async fn fetch_detail(&self, provider_id: i64) -> AppResult<NewMovie> {
        if self.is_mock() {
            let detail = mock::detail(provider_id).ok_or_else(|| {
                AppError::malformed(format!("no mock movie with id {provider_id}"))
            })?;
            return new_movie_from_detail(detail, &self.config.image_base_url);
        }

        let url = format!("{}/movie/{}", self.config.base_url.trim_end_matches('/'), provider_id);
        let detail: MovieDetail =
            self.get_json(url, &[("language", self.config.language.as_str())]).await?;

        new_movie_from_detail(detail, &self.config.image_base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        self.limiter.until_ready().await;

        let body = self
            .client
            .get(url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|err| AppError::malformed(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct MovieDetail {
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
}

fn new_movie_from_detail(detail: MovieDetail, image_base_url: &str) -> AppResult<NewMovie> {
    let title = required(detail.title, "title")?;
    let release_date = required(detail.release_date, "release_date")?;
    let poster_path = required(detail.poster_path, "poster_path")?;
    let description = required(detail.overview, "overview")?;

    let year = year_from_release_date(&release_date)
        .ok_or_else(|| AppError::malformed(format!("bad release_date {release_date:?}")))?;

    Ok(NewMovie { title, year, description, img_url: poster_url(image_base_url, &poster_path) })
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::malformed(format!("missing {field}")))
}

/// "2021-10-22" -> 2021
fn year_from_release_date(release_date: &str) -> Option<i32> {
    release_date.split('-').next()?.trim().parse().ok()
}

fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}/{}", image_base_url.trim_end_matches('/'), poster_path.trim_start_matches('/'))
}

mod mock {
    use super::MovieDetail;
    use crate::models::Candidate;

    struct MockMovie {
        id: i64,
        title: &'static str,
        release_date: &'static str,
        poster_path: &'static str,
        overview: &'static str,
    }

    const MOVIES: [MockMovie; 2] = [
        MockMovie {
            id: 438631,
            title: "Dune",
            release_date: "2021-09-15",
            poster_path: "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
            overview: "Paul Atreides, a brilliant and gifted young man born into a great \
                       destiny beyond his understanding, must travel to the most dangerous \
                       planet in the universe to ensure the future of his family and his people.",
        },
        MockMovie {
            id: 603,
            title: "The Matrix",
            release_date: "1999-03-30",
            poster_path: "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            overview: "Set in the 22nd century, The Matrix tells the story of a computer \
                       hacker who joins a group of underground insurgents fighting the vast \
                       and powerful computers who now rule the earth.",
        },
    ];

    pub(super) fn search(query: &str) -> Vec<Candidate> {
        let needle = query.to_lowercase();
        MOVIES
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .map(|m| Candidate {
                id: m.id,
                title: Some(m.title.to_string()),
                release_date: Some(m.release_date.to_string()),
                poster_path: Some(m.poster_path.to_string()),
                overview: Some(m.overview.to_string()),
            })
            .collect()
    }

    pub(super) fn detail(id: i64) -> Option<MovieDetail> {
        MOVIES.iter().find(|m| m.id == id).map(|m| MovieDetail {
            title: Some(m.title.to_string()),
            release_date: Some(m.release_date.to_string()),
            poster_path: Some(m.poster_path.to_string()),
            overview: Some(m.overview.to_string()),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
    };
    use serde_json::{Value, json};

    use super::*;

    const API_KEY: &str = "test-key";

    pub(crate) fn mock_client() -> TmdbClient {
        TmdbClient::new(reqwest::Client::new(), TmdbConfig::default())
    }

    fn authorized(params: &HashMap<String, String>) -> bool {
        params.get("api_key").map(String::as_str) == Some(API_KEY)
    }

    async fn stub_search(
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if !authorized(&params) {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let results = match params.get("query").map(String::as_str) {
            Some("Dune") => json!([
                {"id": 438631, "title": "Dune", "release_date": "2021-09-15",
                 "poster_path": "/abc.jpg", "overview": "Spice."},
                {"id": 841, "title": "Dune", "release_date": "1984-12-14",
                 "poster_path": "/old.jpg", "overview": "Also spice."},
                {"id": 1, "title": "Dune Drifter", "release_date": "", "poster_path": null}
            ]),
            _ => json!([]),
        };
        Ok(Json(json!({ "page": 1, "results": results })))
    }

    async fn stub_detail(
        Path(id): Path<i64>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if !authorized(&params) || params.get("language").map(String::as_str) != Some("en-US") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        match id {
            438631 => Ok(Json(json!({
                "id": 438631, "title": "Dune", "release_date": "2021-10-22",
                "poster_path": "/abc.jpg", "overview": "Spice.", "runtime": 155
            }))),
            7 => Ok(Json(json!({ "id": 7, "title": "Nameless", "release_date": "2001-01-01" }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn stub_provider() -> String {
        let app = Router::new()
            .route("/search/movie", get(stub_search))
            .route("/movie/{id}", get(stub_detail));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn client_for(base_url: String, api_key: &str) -> TmdbClient {
        TmdbClient::new(
            reqwest::Client::new(),
            TmdbConfig {
                api_key: api_key.to_string(),
                base_url,
                image_base_url: "https://img/".to_string(),
                rps: 100,
                ..TmdbConfig::default()
            },
        )
    }

    fn detail(title: &str, release_date: &str, poster_path: &str, overview: &str) -> MovieDetail {
        MovieDetail {
            title: Some(title.into()),
            release_date: Some(release_date.into()),
            poster_path: Some(poster_path.into()),
            overview: Some(overview.into()),
        }
    }

    #[test]
    fn detail_becomes_new_movie() {
        let movie =
            new_movie_from_detail(detail("Dune", "2021-10-22", "/abc.jpg", "..."), "https://img/")
                .unwrap();
        assert_eq!(
            movie,
            NewMovie {
                title: "Dune".into(),
                year: 2021,
                description: "...".into(),
                img_url: "https://img/abc.jpg".into(),
            }
        );
    }

    #[test]
    fn poster_url_joins_with_single_slash() {
        assert_eq!(poster_url("https://image.tmdb.org/t/p/w500", "/x.jpg"), "https://image.tmdb.org/t/p/w500/x.jpg");
        assert_eq!(poster_url("https://img/", "x.jpg"), "https://img/x.jpg");
    }

    #[test]
    fn year_is_text_before_first_dash() {
        assert_eq!(year_from_release_date("1999-03-30"), Some(1999));
        assert_eq!(year_from_release_date("1999"), Some(1999));
        assert_eq!(year_from_release_date(""), None);
        assert_eq!(year_from_release_date("soon"), None);
    }

    #[test]
    fn missing_fields_are_malformed() {
        let mut d = detail("Dune", "2021-10-22", "/abc.jpg", "...");
        d.poster_path = None;
        let err = new_movie_from_detail(d, "https://img/").unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderData { ref detail } if detail.contains("poster_path")));

        let err = new_movie_from_detail(detail("", "2021", "/a.jpg", "x"), "https://img/").unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderData { .. }));

        let err =
            new_movie_from_detail(detail("Dune", "TBA", "/a.jpg", "x"), "https://img/").unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderData { .. }));
    }

    #[tokio::test]
    async fn mock_mode_serves_dune() {
        let client = mock_client();
        let hits = client.search("dune").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_title(), "Dune");

        let movie = client.fetch_detail(hits[0].id).await.unwrap();
        assert_eq!(movie.year, 2021);
        assert!(movie.img_url.starts_with("https://image.tmdb.org/t/p/w500/"));
    }

    #[tokio::test]
    async fn blank_search_is_rejected() {
        let err = mock_client().search("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn search_returns_provider_results_in_order() {
        let client = client_for(stub_provider().await, API_KEY);

        let hits = client.search("Dune").await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![438631, 841, 1]);
        assert_eq!(hits[2].poster_path, None);
        assert_eq!(hits[2].year(), None);
        assert_eq!(hits[1].year(), Some("1984"));

        assert!(client.search("Nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_detail_uses_language_and_image_base() {
        let client = client_for(stub_provider().await, API_KEY);

        let movie = client.fetch_detail(438631).await.unwrap();
        assert_eq!(movie.title, "Dune");
        assert_eq!(movie.year, 2021);
        assert_eq!(movie.img_url, "https://img/abc.jpg");
    }

    #[tokio::test]
    async fn incomplete_detail_is_malformed() {
        let client = client_for(stub_provider().await, API_KEY);
        let err = client.fetch_detail(7).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedProviderData { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let base = stub_provider().await;

        let err = client_for(base.clone(), API_KEY).fetch_detail(404).await.unwrap_err();
        assert!(matches!(err, AppError::LookupUnavailable(_)));

        let err = client_for(base, "wrong-key").search("Dune").await.unwrap_err();
        assert!(matches!(err, AppError::LookupUnavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{addr}"), API_KEY).search("Dune").await.unwrap_err();
        assert!(matches!(err, AppError::LookupUnavailable(_)));
    }
}
