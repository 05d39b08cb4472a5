use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Cafe,
    Park,
    Museum,
    Bar,
    Shopping,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Restaurant,
        Category::Cafe,
        Category::Park,
        Category::Museum,
        Category::Bar,
        Category::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
            Category::Park => "park",
            Category::Museum => "museum",
            Category::Bar => "bar",
            Category::Shopping => "shopping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    // Case-insensitive; this is the single place category strings are parsed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restaurant" => Ok(Category::Restaurant),
            "cafe" => Ok(Category::Cafe),
            "park" => Ok(Category::Park),
            "museum" => Ok(Category::Museum),
            "bar" => Ok(Category::Bar),
            "shopping" => Ok(Category::Shopping),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub location: Coordinates,
    pub address: String,
    pub open_now: bool,
    pub image_url: String,
    /// Recomputed per query relative to the query center; the value held by
    /// the repository is a stale placeholder.
    pub distance_km: f64,
}
