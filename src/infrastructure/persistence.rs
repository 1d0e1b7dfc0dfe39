use crate::domain::{Club, DirectoryError, DirectoryResult};
use std::collections::HashSet;
use std::fs;

/// Data source adapter for the club directory.
///
/// Performs the single startup fetch of the club collection, from a local
/// JSON file or an HTTP(S) URL. Called exactly once per session; there is
/// no retry policy, a failed load leaves the directory empty.
pub struct ClubRepository;

impl ClubRepository {
    /// Loads the club collection from a file path or URL.
    ///
    /// Sources starting with `http://` or `https://` are fetched over the
    /// network; anything else is treated as a filesystem path. The loaded
    /// collection is validated for id uniqueness before being returned.
    pub fn load_clubs(source: &str) -> DirectoryResult<Vec<Club>> {
        let clubs = if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch_from_url(source)?
        } else {
            Self::read_from_file(source)?
        };

        Self::check_unique_ids(&clubs)?;
        Ok(clubs)
    }

    fn fetch_from_url(url: &str) -> DirectoryResult<Vec<Club>> {
        let response = reqwest::blocking::get(url)
            .map_err(|e| DirectoryError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::Fetch(format!(
                "unexpected status {} from {}",
                response.status(),
                url
            )));
        }

        response
            .json::<Vec<Club>>()
            .map_err(|e| DirectoryError::InvalidData(e.to_string()))
    }

    fn read_from_file(path: &str) -> DirectoryResult<Vec<Club>> {
        let content = fs::read_to_string(path).map_err(|e| DirectoryError::Fetch(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| DirectoryError::InvalidData(e.to_string()))
    }

    // Ids identify clubs for the expand/collapse state; a collection with
    // duplicates is rejected as invalid rather than silently accepted.
    fn check_unique_ids(clubs: &[Club]) -> DirectoryResult<()> {
        let mut seen = HashSet::new();
        for club in clubs {
            if !seen.insert(club.id) {
                return Err(DirectoryError::InvalidData(format!(
                    "duplicate club id {}",
                    club.id
                )));
            }
        }
        Ok(())
    }
}
