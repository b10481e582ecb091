//! Movie domain model.
//!
//! A [`MovieSummary`] is what the catalog returns for list queries; a
//! [`MovieDetail`] extends it with the enriched fields shown in the overlay.
//! Both are produced only by catalog responses and never mutated afterwards.
//! [`Selection`] is the content of the overlay: whichever of the two is
//! currently known for the open movie.

use serde::{Deserialize, Serialize};

/// Number of minutes in one hour.
const MINUTES_PER_HOUR: u32 = 60;

/// Summary-level movie record as listed in the results grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Stable catalog key (IMDb `tconst`, e.g. `tt0111161`).
    pub id: String,
    pub title: String,
    pub release_year: Option<u16>,
    pub runtime_minutes: Option<u32>,
    /// Genres in catalog order, possibly empty.
    pub genres: Vec<String>,
    /// Poster image URL; `None` when the catalog has no image.
    pub poster_url: Option<String>,
    pub average_rating: Option<f64>,
    pub vote_count: Option<u64>,
}

impl MovieSummary {
    /// Creates a summary with only identity and title known.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinedex::domain::MovieSummary;
    ///
    /// let movie = MovieSummary::new("tt0133093", "The Matrix");
    /// assert_eq!(movie.id, "tt0133093");
    /// assert!(movie.genres.is_empty());
    /// assert!(movie.average_rating.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year: None,
            runtime_minutes: None,
            genres: Vec::new(),
            poster_url: None,
            average_rating: None,
            vote_count: None,
        }
    }

    /// Formats the runtime for display, e.g. `2h 22m` or `45m`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinedex::domain::MovieSummary;
    ///
    /// let mut movie = MovieSummary::new("tt0111161", "The Shawshank Redemption");
    /// assert_eq!(movie.runtime_label(), None);
    ///
    /// movie.runtime_minutes = Some(142);
    /// assert_eq!(movie.runtime_label().as_deref(), Some("2h 22m"));
    /// ```
    #[must_use]
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime_minutes.map(|minutes| {
            let hours = minutes / MINUTES_PER_HOUR;
            let rest = minutes % MINUTES_PER_HOUR;
            if hours == 0 {
                format!("{rest}m")
            } else {
                format!("{hours}h {rest:02}m")
            }
        })
    }

    /// Formats the rating with one decimal, e.g. `9.3`.
    #[must_use]
    pub fn rating_label(&self) -> Option<String> {
        self.average_rating.map(|rating| format!("{rating:.1}"))
    }

    /// Whether a poster image is available.
    #[must_use]
    pub const fn has_poster(&self) -> bool {
        self.poster_url.is_some()
    }
}

/// Enriched movie record for the detail overlay.
///
/// Always corresponds to exactly one [`MovieSummary::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub summary: MovieSummary,
    /// Plot text; `None` when the catalog reports it as unavailable.
    pub plot: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
}

impl MovieDetail {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary.id
    }
}

/// Content of the detail overlay.
///
/// Starts as the summary the user picked and is upgraded in place to the
/// detail record once it arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Only summary data is known (detail pending or failed).
    Summary(MovieSummary),
    /// The enriched record has been resolved.
    Detail(MovieDetail),
}

impl Selection {
    /// Catalog id of the selected movie.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Summary(summary) => &summary.id,
            Self::Detail(detail) => detail.id(),
        }
    }

    /// Summary-level fields, regardless of resolution state.
    #[must_use]
    pub const fn summary(&self) -> &MovieSummary {
        match self {
            Self::Summary(summary) => summary,
            Self::Detail(detail) => &detail.summary,
        }
    }

    /// Detail record, if resolved.
    #[must_use]
    pub const fn detail(&self) -> Option<&MovieDetail> {
        match self {
            Self::Summary(_) => None,
            Self::Detail(detail) => Some(detail),
        }
    }

    /// Plot text, only ever present on a resolved detail.
    #[must_use]
    pub fn plot(&self) -> Option<&str> {
        self.detail().and_then(|detail| detail.plot.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_label_handles_short_and_long_films() {
        let mut movie = MovieSummary::new("tt1", "Short");
        movie.runtime_minutes = Some(45);
        assert_eq!(movie.runtime_label().as_deref(), Some("45m"));

        movie.runtime_minutes = Some(60);
        assert_eq!(movie.runtime_label().as_deref(), Some("1h 00m"));
    }

    #[test]
    fn rating_label_rounds_to_one_decimal() {
        let mut movie = MovieSummary::new("tt1", "Rated");
        movie.average_rating = Some(8.66);
        assert_eq!(movie.rating_label().as_deref(), Some("8.7"));
    }

    #[test]
    fn selection_exposes_summary_fields_in_both_states() {
        let summary = MovieSummary::new("tt1", "Alien");
        let pending = Selection::Summary(summary.clone());
        assert_eq!(pending.id(), "tt1");
        assert!(pending.plot().is_none());

        let resolved = Selection::Detail(MovieDetail {
            summary: summary.clone(),
            plot: Some("In space no one can hear you scream.".into()),
            director: Some("Ridley Scott".into()),
            cast: None,
        });
        assert_eq!(resolved.id(), "tt1");
        assert_eq!(resolved.summary(), &summary);
        assert!(resolved.plot().is_some());
    }
}
