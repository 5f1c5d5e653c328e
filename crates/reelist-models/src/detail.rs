use serde::{Deserialize, Serialize};

use crate::movie::MediaType;

/// Full per-title record fetched from a provider's detail endpoint.
/// Fields the provider omits (or reports as "N/A") are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub poster: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub ratings: Vec<RatingScore>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub box_office: Option<String>,
    pub website: Option<String>,
}

/// A single critic/user score as reported by a named rating source,
/// e.g. `{ "Internet Movie Database", "8.1/10" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingScore {
    pub source: String,
    pub value: String,
}
