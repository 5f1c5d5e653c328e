use reelist_models::{MediaType, Movie, MovieDetail, RatingScore, SearchPage};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbMovie>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type")]
    media_type: String,
    #[serde(rename = "Poster")]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Awards")]
    awards: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Website")]
    website: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

/// OMDB reports missing fields as the literal string "N/A".
fn na_opt(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty() && s != "N/A")
}

fn movie_from_dto(dto: OmdbMovie) -> Movie {
    Movie {
        id: dto.imdb_id,
        title: dto.title,
        year: dto.year,
        media_type: MediaType::parse(&dto.media_type),
        poster: na_opt(Some(dto.poster)),
    }
}

fn detail_from_dto(dto: OmdbDetailResponse, requested_id: &str) -> MovieDetail {
    MovieDetail {
        id: na_opt(dto.imdb_id).unwrap_or_else(|| requested_id.to_string()),
        title: dto.title.unwrap_or_default(),
        year: dto.year.unwrap_or_default(),
        media_type: MediaType::parse(dto.media_type.as_deref().unwrap_or("")),
        poster: na_opt(dto.poster),
        rated: na_opt(dto.rated),
        released: na_opt(dto.released),
        runtime: na_opt(dto.runtime),
        genre: na_opt(dto.genre),
        director: na_opt(dto.director),
        writer: na_opt(dto.writer),
        actors: na_opt(dto.actors),
        plot: na_opt(dto.plot),
        language: na_opt(dto.language),
        country: na_opt(dto.country),
        awards: na_opt(dto.awards),
        ratings: dto
            .ratings
            .into_iter()
            .map(|r| RatingScore {
                source: r.source,
                value: r.value,
            })
            .collect(),
        metascore: na_opt(dto.metascore),
        imdb_rating: na_opt(dto.imdb_rating),
        imdb_votes: na_opt(dto.imdb_votes),
        box_office: na_opt(dto.box_office),
        website: na_opt(dto.website),
    }
}

/// Run a paged title search. A body with `"Response": "False"` is an
/// empty page carrying the remote's message, not a failure: the remote
/// answers that way both for exhausted pagination and for queries with
/// no matches.
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
) -> Result<SearchPage, ProviderError> {
    let url = format!(
        "{}/?s={}&page={}&apikey={}",
        base_url,
        urlencoding::encode(query),
        page,
        api_key
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::FetchFailed(format!(
            "search returned HTTP {}",
            response.status()
        )));
    }

    let body: OmdbSearchResponse = response.json().await?;
    if body.response != "True" {
        let message = body.error.unwrap_or_else(|| "unknown error".to_string());
        warn!("Search for {:?} page {} came back empty: {}", query, page, message);
        return Ok(SearchPage {
            movies: Vec::new(),
            total_results: None,
            error: Some(message),
        });
    }

    let movies: Vec<Movie> = body
        .search
        .unwrap_or_default()
        .into_iter()
        .map(movie_from_dto)
        .collect();
    let total_results = body.total_results.and_then(|t| t.parse::<u32>().ok());
    debug!(
        "Search for {:?} page {}: {} movies, total {:?}",
        query,
        page,
        movies.len(),
        total_results
    );

    Ok(SearchPage {
        movies,
        total_results,
        error: None,
    })
}

/// Fetch the full record for one title id.
pub async fn fetch_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, ProviderError> {
    let url = format!(
        "{}/?i={}&plot=full&apikey={}",
        base_url,
        urlencoding::encode(id),
        api_key
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::FetchFailed(format!(
            "detail returned HTTP {}",
            response.status()
        )));
    }

    let body: OmdbDetailResponse = response.json().await?;
    if body.response != "True" {
        let message = body.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(ProviderError::FetchFailed(format!(
            "detail for {}: {}",
            id, message
        )));
    }

    Ok(detail_from_dto(body, id))
}
