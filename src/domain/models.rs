use serde::{Deserialize, Serialize};

/// Category tag that matches every club.
pub const CATEGORY_ALL: &str = "all";

/// Contact details for a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub president: String,
}

/// A single university club record.
///
/// Records are identified by `id`, which is unique across a loaded
/// collection. The collection is read-only once loaded; nothing in the
/// application mutates club data.
///
/// The wire format uses camelCase field names (`longDescription`), matching
/// the club dataset JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub long_description: String,
    pub logo: String,
    pub members: u32,
    pub meetings: String,
    pub activities: Vec<String>,
    pub contact: Contact,
}
