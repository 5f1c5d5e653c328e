use chrono::Utc;
use reelist_models::{MediaType, Movie, MovieDetail, RatingScore, SearchPage};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::traits::Category;

#[derive(Debug, Deserialize)]
struct TmdbPagedResponse {
    page: u32,
    results: Vec<TmdbMovie>,
    total_pages: u32,
    total_results: u32,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    id: u64,
    imdb_id: Option<String>,
    title: String,
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    genres: Vec<TmdbGenre>,
    spoken_languages: Vec<TmdbSpokenLanguage>,
    production_countries: Vec<TmdbProductionCountry>,
    poster_path: Option<String>,
    homepage: Option<String>,
    vote_average: f64,
    vote_count: u64,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbSpokenLanguage {
    english_name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbProductionCountry {
    name: String,
}

fn year_of(release_date: Option<&str>) -> String {
    release_date
        .and_then(|d| d.get(..4))
        .unwrap_or_default()
        .to_string()
}

fn poster_url(image_base_url: &str, path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{}{}", image_base_url, p))
}

fn movie_from_dto(dto: TmdbMovie, image_base_url: &str) -> Movie {
    Movie {
        id: dto.id.to_string(),
        title: dto.title,
        year: year_of(dto.release_date.as_deref()),
        media_type: MediaType::Movie,
        poster: poster_url(image_base_url, dto.poster_path.as_deref()),
    }
}

fn detail_from_dto(dto: TmdbMovieDetail, image_base_url: &str) -> MovieDetail {
    let join = |names: Vec<String>| {
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    };

    MovieDetail {
        // The provider-portable id is preferred so saved entries keep the
        // same identity regardless of which provider found them.
        id: dto
            .imdb_id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| dto.id.to_string()),
        title: dto.title,
        year: year_of(dto.release_date.as_deref()),
        media_type: MediaType::Movie,
        poster: poster_url(image_base_url, dto.poster_path.as_deref()),
        rated: None,
        released: dto.release_date,
        runtime: dto.runtime.map(|m| format!("{} min", m)),
        genre: join(dto.genres.into_iter().map(|g| g.name).collect()),
        director: None,
        writer: None,
        actors: None,
        plot: dto.overview.filter(|s| !s.is_empty()),
        language: join(
            dto.spoken_languages
                .into_iter()
                .map(|l| l.english_name)
                .collect(),
        ),
        country: join(
            dto.production_countries
                .into_iter()
                .map(|c| c.name)
                .collect(),
        ),
        awards: None,
        ratings: vec![RatingScore {
            source: "TMDB".to_string(),
            value: format!("{:.1}/10 ({} votes)", dto.vote_average, dto.vote_count),
        }],
        metascore: None,
        imdb_rating: None,
        imdb_votes: None,
        box_office: None,
        website: dto.homepage.filter(|s| !s.is_empty()),
    }
}

fn category_params(category: Category) -> String {
    match category {
        Category::Popular => "sort_by=popularity.desc".to_string(),
        Category::TopRated => "sort_by=vote_average.desc&vote_count.gte=200".to_string(),
        Category::Upcoming => format!(
            "sort_by=popularity.desc&primary_release_date.gte={}",
            Utc::now().date_naive()
        ),
    }
}

async fn fetch_page(client: &Client, url: &str) -> Result<TmdbPagedResponse, ProviderError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::FetchFailed(format!(
            "listing returned HTTP {}",
            response.status()
        )));
    }
    Ok(response.json().await?)
}

fn page_from_response(body: TmdbPagedResponse, image_base_url: &str) -> SearchPage {
    debug!(
        "Listing page {}/{}: {} movies, total {}",
        body.page,
        body.total_pages,
        body.results.len(),
        body.total_results
    );
    SearchPage {
        movies: body
            .results
            .into_iter()
            .map(|m| movie_from_dto(m, image_base_url))
            .collect(),
        total_results: Some(body.total_results),
        error: None,
    }
}

pub async fn search(
    client: &Client,
    base_url: &str,
    image_base_url: &str,
    api_key: &str,
    language: &str,
    query: &str,
    page: u32,
) -> Result<SearchPage, ProviderError> {
    let url = format!(
        "{}/search/movie?api_key={}&language={}&include_adult=false&query={}&page={}",
        base_url,
        api_key,
        language,
        urlencoding::encode(query),
        page
    );
    let body = fetch_page(client, &url).await?;
    Ok(page_from_response(body, image_base_url))
}

pub async fn discover(
    client: &Client,
    base_url: &str,
    image_base_url: &str,
    api_key: &str,
    language: &str,
    category: Category,
    page: u32,
) -> Result<SearchPage, ProviderError> {
    let url = format!(
        "{}/discover/movie?api_key={}&language={}&include_adult=false&include_video=false&page={}&{}",
        base_url,
        api_key,
        language,
        page,
        category_params(category)
    );
    let body = fetch_page(client, &url).await?;
    Ok(page_from_response(body, image_base_url))
}

pub async fn fetch_detail(
    client: &Client,
    base_url: &str,
    image_base_url: &str,
    api_key: &str,
    language: &str,
    id: &str,
) -> Result<MovieDetail, ProviderError> {
    let url = format!(
        "{}/movie/{}?api_key={}&language={}",
        base_url,
        urlencoding::encode(id),
        api_key,
        language
    );
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::FetchFailed(format!(
            "detail for {} returned HTTP {}",
            id,
            response.status()
        )));
    }
    let body: TmdbMovieDetail = response.json().await?;
    Ok(detail_from_dto(body, image_base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_paged_response_maps_movies() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30", "poster_path": "/matrix.jpg"},
                {"id": 604, "title": "The Matrix Reloaded", "release_date": null, "poster_path": null}
            ],
            "total_pages": 42,
            "total_results": 833
        }"#;
        let body: TmdbPagedResponse = serde_json::from_str(json).unwrap();
        let page = page_from_response(body, IMAGE_BASE);

        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].id, "603");
        assert_eq!(page.movies[0].year, "1999");
        assert_eq!(
            page.movies[0].poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/matrix.jpg")
        );
        assert_eq!(page.movies[1].year, "");
        assert_eq!(page.movies[1].poster, None);
        assert_eq!(page.total_results, Some(833));
    }

    #[test]
    fn test_detail_prefers_portable_id() {
        let json = r#"{
            "id": 603,
            "imdb_id": "tt0133093",
            "title": "The Matrix",
            "overview": "A computer hacker learns about the true nature of reality.",
            "release_date": "1999-03-30",
            "runtime": 136,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "poster_path": "/matrix.jpg",
            "homepage": "",
            "vote_average": 8.2,
            "vote_count": 24000
        }"#;
        let body: TmdbMovieDetail = serde_json::from_str(json).unwrap();
        let detail = detail_from_dto(body, IMAGE_BASE);

        assert_eq!(detail.id, "tt0133093");
        assert_eq!(detail.year, "1999");
        assert_eq!(detail.runtime.as_deref(), Some("136 min"));
        assert_eq!(detail.genre.as_deref(), Some("Action, Science Fiction"));
        assert_eq!(detail.country.as_deref(), Some("United States of America"));
        assert_eq!(detail.website, None);
        assert_eq!(detail.ratings.len(), 1);
        assert_eq!(detail.ratings[0].source, "TMDB");
    }

    #[test]
    fn test_detail_falls_back_to_numeric_id() {
        let json = r#"{
            "id": 98765,
            "imdb_id": null,
            "title": "Obscure Film",
            "overview": "",
            "release_date": null,
            "runtime": null,
            "genres": [],
            "spoken_languages": [],
            "production_countries": [],
            "poster_path": null,
            "homepage": null,
            "vote_average": 0.0,
            "vote_count": 0
        }"#;
        let body: TmdbMovieDetail = serde_json::from_str(json).unwrap();
        let detail = detail_from_dto(body, IMAGE_BASE);

        assert_eq!(detail.id, "98765");
        assert_eq!(detail.plot, None);
        assert_eq!(detail.genre, None);
        assert_eq!(detail.runtime, None);
    }

    #[test]
    fn test_category_params() {
        assert_eq!(category_params(Category::Popular), "sort_by=popularity.desc");
        assert!(category_params(Category::TopRated).contains("vote_count.gte"));
        assert!(category_params(Category::Upcoming).contains("primary_release_date.gte"));
    }
}
