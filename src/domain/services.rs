//! Directory filtering services for the club browser.
//!
//! This module provides the core view derivation engine that computes the
//! visible slice of the club directory from the raw collection and the
//! active filter state, plus the CSV roster export.

use super::models::{Club, CATEGORY_ALL};

/// The derived view of the directory for one filter state.
///
/// Produced by [`DirectoryFilter::derive`]; consumed by the presentation
/// layer. `visible` is the prefix of the matched set exposed to the user,
/// bounded by the reveal count.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView<'a> {
    /// The revealed prefix of the matched set, in collection order.
    pub visible: Vec<&'a Club>,
    /// Number of clubs passing both filters.
    pub matched_count: usize,
    /// Size of the full loaded collection.
    pub total_count: usize,
    /// Whether the matched set extends beyond the reveal window.
    pub has_more: bool,
}

impl DirectoryView<'_> {
    /// Number of clubs actually shown.
    pub fn shown_count(&self) -> usize {
        self.visible.len()
    }
}

/// Filter engine that derives the visible slice of a club collection.
///
/// Category and search are independent filters combined with AND: a club
/// must pass both. The category filter is an exact, case-sensitive string
/// match unless the category is `"all"`; an unrecognized category simply
/// matches nothing. The search filter is a case-insensitive substring match
/// against the club's name, description, or long description (OR across the
/// three fields). Filtering never reorders the collection.
///
/// # Examples
///
/// ```
/// use tclubs::domain::{Club, Contact, DirectoryFilter};
///
/// # fn club(id: u32, name: &str, category: &str) -> Club {
/// #     Club {
/// #         id,
/// #         name: name.to_string(),
/// #         category: category.to_string(),
/// #         description: String::new(),
/// #         long_description: String::new(),
/// #         logo: String::new(),
/// #         members: 0,
/// #         meetings: String::new(),
/// #         activities: vec![],
/// #         contact: Contact { email: String::new(), president: String::new() },
/// #     }
/// # }
/// let clubs = vec![
///     club(1, "Robotics Club", "Mecatronique"),
///     club(2, "Hiking Society", "Sports"),
/// ];
/// let filter = DirectoryFilter::new(&clubs);
///
/// let view = filter.derive("Sports", "", 6);
/// assert_eq!(view.shown_count(), 1);
/// assert_eq!(view.visible[0].id, 2);
/// assert!(!view.has_more);
///
/// // Search is case-insensitive.
/// let view = filter.derive("all", "ROBOT", 6);
/// assert_eq!(view.visible[0].name, "Robotics Club");
/// ```
pub struct DirectoryFilter<'a> {
    /// The full loaded collection, in original order
    clubs: &'a [Club],
}

impl<'a> DirectoryFilter<'a> {
    /// Creates a filter engine over the given collection.
    pub fn new(clubs: &'a [Club]) -> Self {
        Self { clubs }
    }

    /// Returns the clubs passing both active filters, in collection order.
    ///
    /// # Arguments
    ///
    /// * `category` - Category tag, `"all"` to match every category
    /// * `query` - Free-text search, empty to match every club
    pub fn matched(&self, category: &str, query: &str) -> Vec<&'a Club> {
        let query_lower = query.to_lowercase();
        self.clubs
            .iter()
            .filter(|club| Self::matches(club, category, &query_lower))
            .collect()
    }

    /// Derives the complete view for one filter state.
    ///
    /// The visible set is the first `reveal_count` elements of the matched
    /// set; truncation always starts from the beginning, there is no paging
    /// offset. A reveal count past the end of the matched set is not an
    /// error, the visible set just stops growing.
    pub fn derive(&self, category: &str, query: &str, reveal_count: usize) -> DirectoryView<'a> {
        let matched = self.matched(category, query);
        let matched_count = matched.len();

        DirectoryView {
            visible: matched.into_iter().take(reveal_count).collect(),
            matched_count,
            total_count: self.clubs.len(),
            has_more: reveal_count < matched_count,
        }
    }

    fn matches(club: &Club, category: &str, query_lower: &str) -> bool {
        if category != CATEGORY_ALL && club.category != category {
            return false;
        }

        if query_lower.is_empty() {
            return true;
        }

        club.name.to_lowercase().contains(query_lower)
            || club.description.to_lowercase().contains(query_lower)
            || club.long_description.to_lowercase().contains(query_lower)
    }
}

/// Writes club rosters out as CSV files.
pub struct RosterExporter;

impl RosterExporter {
    /// Exports the given clubs to a CSV file, one row per club.
    ///
    /// The export covers whatever slice the caller passes in; the
    /// application exports the matched set rather than the revealed prefix.
    ///
    /// # Arguments
    ///
    /// * `clubs` - Clubs to export, written in the given order
    /// * `filename` - Destination path
    ///
    /// # Returns
    ///
    /// The destination path on success, or an error message for the status
    /// bar on failure.
    pub fn export_to_csv(clubs: &[&Club], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer
            .write_record([
                "id",
                "name",
                "category",
                "members",
                "meetings",
                "email",
                "president",
            ])
            .map_err(|e| e.to_string())?;

        for club in clubs {
            writer
                .write_record([
                    club.id.to_string().as_str(),
                    &club.name,
                    &club.category,
                    club.members.to_string().as_str(),
                    &club.meetings,
                    &club.contact.email,
                    &club.contact.president,
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contact;

    fn club(id: u32, name: &str, category: &str, description: &str, long: &str) -> Club {
        Club {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            long_description: long.to_string(),
            logo: format!("{}.png", id),
            members: 10 + id,
            meetings: "Weekly".to_string(),
            activities: vec!["Meetups".to_string()],
            contact: Contact {
                email: format!("club{}@uni.example", id),
                president: "President".to_string(),
            },
        }
    }

    fn sample_clubs() -> Vec<Club> {
        vec![
            club(1, "Robotics Club", "Mecatronique", "Build robots", "Annual robot race"),
            club(2, "Hiking Society", "Sports", "Mountain trips", "Weekend hikes in the Alps"),
            club(3, "Green Campus", "Environnement", "Recycling drives", "Campus sustainability projects"),
            club(4, "Chess Circle", "Social", "Casual chess", "Open boards every evening"),
            club(5, "Futsal Team", "Sports", "Indoor football", "League matches and training"),
        ]
    }

    #[test]
    fn test_no_filters_matches_everything_in_order() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let matched = filter.matched(CATEGORY_ALL, "");
        let ids: Vec<u32> = matched.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_category_filter_is_exact_and_case_sensitive() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let ids: Vec<u32> = filter.matched("Sports", "").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 5]);

        // Case matters for category tags.
        assert!(filter.matched("sports", "").is_empty());
    }

    #[test]
    fn test_unrecognized_category_matches_nothing() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        assert!(filter.matched("Quidditch", "").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_over_name() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        for query in ["robot", "ROBOT", "RoBoT"] {
            let matched = filter.matched(CATEGORY_ALL, query);
            assert!(matched.iter().any(|c| c.name == "Robotics Club"), "query {:?}", query);
        }
    }

    #[test]
    fn test_search_spans_description_and_long_description() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        // "recycling" only appears in a description
        let ids: Vec<u32> = filter.matched(CATEGORY_ALL, "recycling").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);

        // "alps" only appears in a long description
        let ids: Vec<u32> = filter.matched(CATEGORY_ALL, "alps").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_category_and_search_combine_with_and() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let ids: Vec<u32> = filter.matched("Sports", "league").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_filters_commute() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let combined: Vec<u32> = filter.matched("Sports", "in").iter().map(|c| c.id).collect();

        let category_first: Vec<Club> =
            filter.matched("Sports", "").into_iter().cloned().collect();
        let then_search: Vec<u32> = DirectoryFilter::new(&category_first)
            .matched(CATEGORY_ALL, "in")
            .iter()
            .map(|c| c.id)
            .collect();

        let search_first: Vec<Club> =
            filter.matched(CATEGORY_ALL, "in").into_iter().cloned().collect();
        let then_category: Vec<u32> = DirectoryFilter::new(&search_first)
            .matched("Sports", "")
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(combined, then_search);
        assert_eq!(combined, then_category);
    }

    #[test]
    fn test_derive_truncates_to_reveal_count() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let view = filter.derive(CATEGORY_ALL, "", 3);
        assert_eq!(view.shown_count(), 3);
        assert_eq!(view.matched_count, 5);
        assert_eq!(view.total_count, 5);
        assert!(view.has_more);

        let ids: Vec<u32> = view.visible.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_derive_reveal_past_end_stops_growing() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);

        let view = filter.derive("Sports", "", 6);
        assert_eq!(view.shown_count(), 2);
        assert_eq!(view.matched_count, 2);
        assert!(!view.has_more);

        // A much larger reveal count changes nothing.
        let view = filter.derive("Sports", "", 60);
        assert_eq!(view.shown_count(), 2);
        assert!(!view.has_more);
    }

    #[test]
    fn test_derive_empty_collection() {
        let clubs: Vec<Club> = Vec::new();
        let filter = DirectoryFilter::new(&clubs);

        let view = filter.derive(CATEGORY_ALL, "", 6);
        assert_eq!(view.shown_count(), 0);
        assert_eq!(view.matched_count, 0);
        assert_eq!(view.total_count, 0);
        assert!(!view.has_more);
    }

    #[test]
    fn test_export_to_csv_writes_one_row_per_club() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);
        let matched = filter.matched("Sports", "");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        let path_str = path.to_str().unwrap();

        let result = RosterExporter::export_to_csv(&matched, path_str);
        assert_eq!(result.unwrap(), path_str);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // header + two Sports clubs
        assert!(lines[0].starts_with("id,name,category"));
        assert!(lines[1].contains("Hiking Society"));
        assert!(lines[2].contains("Futsal Team"));
    }

    #[test]
    fn test_export_to_csv_bad_path_reports_error() {
        let clubs = sample_clubs();
        let filter = DirectoryFilter::new(&clubs);
        let matched = filter.matched(CATEGORY_ALL, "");

        let result = RosterExporter::export_to_csv(&matched, "/nonexistent-dir/roster.csv");
        assert!(result.is_err());
    }
}
