//! Catalog JSON wire format.
//!
//! The catalog serves IMDb-style records with loosely typed fields: years and
//! runtimes may arrive as strings or numbers, genres as a comma-separated
//! string, and missing values as sentinels (`"N/A"`, `"\N"`, `"Plot not
//! available"`). Everything is normalized here so the domain types only ever
//! see `Option`s.

use crate::domain::{MovieDetail, MovieSummary, NetworkFailure};
use serde::Deserialize;

/// Value meaning "not available" (no poster, no director, ...).
pub const NOT_AVAILABLE: &str = "N/A";

/// Plot value meaning "no plot known".
pub const PLOT_UNAVAILABLE: &str = "Plot not available";

/// IMDb dataset null marker.
const NULL_MARKER: &str = "\\N";

/// A movie as serialized by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub tconst: String,
    pub primary_title: Option<String>,
    pub start_year: Option<YearField>,
    pub genres: Option<GenresField>,
    pub average_rating: Option<f64>,
    pub num_votes: Option<u64>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    pub runtime: Option<RuntimeField>,
    pub director: Option<String>,
    pub cast: Option<String>,
}

/// Release year, numeric or textual.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YearField {
    Number(u16),
    Text(String),
}

/// Runtime, either minutes or display text such as `"142 min"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuntimeField {
    Minutes(u32),
    Text(String),
}

/// Genres, either a list or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenresField {
    List(Vec<String>),
    Joined(String),
}

/// Trims a text field and drops empty values and sentinels.
fn present(value: Option<String>, sentinel: &str) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != sentinel && v != NULL_MARKER)
}

impl YearField {
    fn year(self) -> Option<u16> {
        let year = match self {
            Self::Number(year) => Some(year),
            Self::Text(text) => text.trim().parse::<u16>().ok(),
        };
        year.filter(|year| *year > 0)
    }
}

impl RuntimeField {
    fn minutes(self) -> Option<u32> {
        let minutes = match self {
            Self::Minutes(minutes) => Some(minutes),
            Self::Text(text) => {
                let digits: String = text
                    .trim_start_matches(|c: char| !c.is_ascii_digit())
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse::<u32>().ok()
            }
        };
        minutes.filter(|minutes| *minutes > 0)
    }
}

impl GenresField {
    fn genres(self) -> Vec<String> {
        let raw = match self {
            Self::List(list) => list,
            Self::Joined(joined) => joined.split(',').map(String::from).collect(),
        };
        raw.into_iter()
            .map(|genre| genre.trim().to_string())
            .filter(|genre| !genre.is_empty() && genre != NULL_MARKER)
            .collect()
    }
}

impl MovieRecord {
    /// Converts to the summary-level domain record.
    #[must_use]
    pub fn into_summary(self) -> MovieSummary {
        self.split().0
    }

    /// Converts to the detail-level domain record.
    #[must_use]
    pub fn into_detail(self) -> MovieDetail {
        let (summary, extras) = self.split();
        MovieDetail {
            summary,
            plot: present(extras.plot, PLOT_UNAVAILABLE),
            director: present(extras.director, NOT_AVAILABLE),
            cast: present(extras.cast, NOT_AVAILABLE),
        }
    }

    fn split(self) -> (MovieSummary, DetailExtras) {
        let id = self.tconst.trim().to_string();
        let title = present(self.primary_title, NOT_AVAILABLE).unwrap_or_else(|| id.clone());

        let summary = MovieSummary {
            title,
            release_year: self.start_year.and_then(YearField::year),
            runtime_minutes: self.runtime.and_then(RuntimeField::minutes),
            genres: self.genres.map(GenresField::genres).unwrap_or_default(),
            poster_url: present(self.poster, NOT_AVAILABLE),
            average_rating: self.average_rating.filter(|rating| rating.is_finite()),
            vote_count: self.num_votes,
            id,
        };

        let extras = DetailExtras {
            plot: self.plot,
            director: self.director,
            cast: self.cast,
        };

        (summary, extras)
    }
}

struct DetailExtras {
    plot: Option<String>,
    director: Option<String>,
    cast: Option<String>,
}

fn malformed(err: &serde_json::Error) -> NetworkFailure {
    NetworkFailure::Decode(err.to_string())
}

/// Decodes a list response (`top-rated` or title search).
///
/// # Errors
///
/// Returns [`NetworkFailure::Decode`] if the body is not a JSON array of
/// movie records.
pub fn decode_movies(body: &[u8]) -> Result<Vec<MovieSummary>, NetworkFailure> {
    let records: Vec<MovieRecord> = serde_json::from_slice(body).map_err(|e| malformed(&e))?;
    Ok(records.into_iter().map(MovieRecord::into_summary).collect())
}

/// Decodes a detail response and checks it answers for `expected_id`.
///
/// # Errors
///
/// Returns [`NetworkFailure::Decode`] if the body is not a movie record or
/// describes a different movie.
pub fn decode_detail(body: &[u8], expected_id: &str) -> Result<MovieDetail, NetworkFailure> {
    let record: MovieRecord = serde_json::from_slice(body).map_err(|e| malformed(&e))?;
    let detail = record.into_detail();

    if detail.id() != expected_id {
        return Err(NetworkFailure::Decode(format!(
            "requested {expected_id} but catalog answered {}",
            detail.id()
        )));
    }

    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAWSHANK: &str = r#"{
        "tconst": "tt0111161",
        "primaryTitle": "The Shawshank Redemption",
        "startYear": "1994",
        "genres": "Drama, Crime",
        "averageRating": 9.3,
        "numVotes": 2900000,
        "plot": "Two imprisoned men bond over a number of years.",
        "poster": "https://img.example/shawshank.jpg",
        "runtime": "142 min",
        "director": "Frank Darabont",
        "cast": "Tim Robbins, Morgan Freeman",
        "actorName": null
    }"#;

    #[test]
    fn full_record_decodes_into_detail() {
        let detail = decode_detail(SHAWSHANK.as_bytes(), "tt0111161").unwrap();

        assert_eq!(detail.summary.title, "The Shawshank Redemption");
        assert_eq!(detail.summary.release_year, Some(1994));
        assert_eq!(detail.summary.runtime_minutes, Some(142));
        assert_eq!(detail.summary.genres, vec!["Drama", "Crime"]);
        assert_eq!(detail.summary.vote_count, Some(2_900_000));
        assert!(detail.summary.has_poster());
        assert_eq!(detail.director.as_deref(), Some("Frank Darabont"));
    }

    #[test]
    fn sentinels_become_absent_values() {
        let body = r#"{
            "tconst": "tt9999999",
            "primaryTitle": "Obscure",
            "startYear": "\\N",
            "genres": "\\N",
            "poster": "N/A",
            "runtime": "N/A",
            "plot": "Plot not available",
            "director": ""
        }"#;

        let detail = decode_detail(body.as_bytes(), "tt9999999").unwrap();
        assert_eq!(detail.summary.release_year, None);
        assert_eq!(detail.summary.runtime_minutes, None);
        assert!(detail.summary.genres.is_empty());
        assert_eq!(detail.summary.poster_url, None);
        assert_eq!(detail.plot, None);
        assert_eq!(detail.director, None);
    }

    #[test]
    fn numeric_fields_and_genre_lists_are_accepted() {
        let body = r#"[{
            "tconst": "tt0133093",
            "primaryTitle": "The Matrix",
            "startYear": 1999,
            "runtime": 136,
            "genres": ["Action", " Sci-Fi "]
        }]"#;

        let movies = decode_movies(body.as_bytes()).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].release_year, Some(1999));
        assert_eq!(movies[0].runtime_minutes, Some(136));
        assert_eq!(movies[0].genres, vec!["Action", "Sci-Fi"]);
    }

    #[test]
    fn missing_title_falls_back_to_id() {
        let movies = decode_movies(br#"[{"tconst": "tt0000001"}]"#).unwrap();
        assert_eq!(movies[0].title, "tt0000001");
    }

    #[test]
    fn empty_array_is_a_valid_list() {
        assert_eq!(decode_movies(b"[]").unwrap(), Vec::new());
    }

    #[test]
    fn malformed_bodies_are_decode_failures() {
        assert!(matches!(decode_movies(b"<html>"), Err(NetworkFailure::Decode(_))));
        assert!(matches!(
            decode_movies(br#"[{"primaryTitle": "no id"}]"#),
            Err(NetworkFailure::Decode(_))
        ));
    }

    #[test]
    fn detail_for_another_movie_is_rejected() {
        let result = decode_detail(SHAWSHANK.as_bytes(), "tt0068646");
        assert!(matches!(result, Err(NetworkFailure::Decode(msg)) if msg.contains("tt0068646")));
    }
}
