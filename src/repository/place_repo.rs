use crate::geo::Coordinates;
use crate::models::{Category, Place};

/// Read-only in-memory place table. Built once at startup and shared behind
/// an `Arc`; nothing mutates it afterwards, so no locking is needed.
pub struct PlaceRepository {
    places: Vec<Place>,
}

impl PlaceRepository {
    pub fn new() -> Self {
        PlaceRepository {
            places: fixture_places(),
        }
    }

    /// All places, optionally filtered by category. Returns clones; the
    /// `distance_km` on them is a stale placeholder until the discovery
    /// engine recomputes it.
    pub fn list_places(&self, category: Option<Category>) -> Vec<Place> {
        self.places
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Place> {
        self.places.iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for PlaceRepository {
    fn default() -> Self {
        PlaceRepository::new()
    }
}

fn place(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    latitude: f64,
    longitude: f64,
    address: &str,
    open_now: bool,
) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        location: Coordinates::new(latitude, longitude),
        address: address.to_string(),
        open_now,
        image_url: format!("https://images.example.com/places/{}.jpg", id),
        distance_km: 0.0,
    }
}

/// Sample places around lower Manhattan. Storm King is deliberately outside
/// the 50 km maximum radius so out-of-range behavior stays testable.
fn fixture_places() -> Vec<Place> {
    vec![
        place(
            "p-001",
            "Katz's Delicatessen",
            Category::Restaurant,
            "Pastrami institution on the Lower East Side",
            40.7223,
            -73.9874,
            "205 E Houston St, New York, NY 10002",
            true,
        ),
        place(
            "p-002",
            "Joe's Pizza",
            Category::Restaurant,
            "Greenwich Village slice joint",
            40.7305,
            -74.0021,
            "7 Carmine St, New York, NY 10014",
            true,
        ),
        place(
            "p-003",
            "Blue Bottle Coffee",
            Category::Cafe,
            "Pour-over specialists in Tribeca",
            40.7195,
            -74.0027,
            "101 W Broadway, New York, NY 10013",
            true,
        ),
        place(
            "p-004",
            "Stumptown Coffee Roasters",
            Category::Cafe,
            "Flatiron espresso bar",
            40.7459,
            -73.9884,
            "18 W 29th St, New York, NY 10001",
            false,
        ),
        place(
            "p-005",
            "Central Park",
            Category::Park,
            "843 acres of lawns, lakes and trails",
            40.7829,
            -73.9654,
            "New York, NY 10024",
            true,
        ),
        place(
            "p-006",
            "Washington Square Park",
            Category::Park,
            "Arch, fountain and chess tables",
            40.7308,
            -73.9973,
            "Washington Square, New York, NY 10012",
            true,
        ),
        place(
            "p-007",
            "The Metropolitan Museum of Art",
            Category::Museum,
            "Encyclopedic art museum on Fifth Avenue",
            40.7794,
            -73.9632,
            "1000 5th Ave, New York, NY 10028",
            true,
        ),
        place(
            "p-008",
            "9/11 Memorial & Museum",
            Category::Museum,
            "Memorial pools and exhibition at the World Trade Center",
            40.7115,
            -74.0134,
            "180 Greenwich St, New York, NY 10007",
            true,
        ),
        place(
            "p-009",
            "Death & Co",
            Category::Bar,
            "East Village cocktail den",
            40.7264,
            -73.9847,
            "433 E 6th St, New York, NY 10009",
            false,
        ),
        place(
            "p-010",
            "Attaboy",
            Category::Bar,
            "No-menu cocktails on Eldridge Street",
            40.7190,
            -73.9913,
            "134 Eldridge St, New York, NY 10002",
            true,
        ),
        place(
            "p-011",
            "Westfield World Trade Center",
            Category::Shopping,
            "Mall under the Oculus",
            40.7116,
            -74.0107,
            "185 Greenwich St, New York, NY 10007",
            true,
        ),
        place(
            "p-012",
            "Chelsea Market",
            Category::Shopping,
            "Food hall and shops in the old Nabisco factory",
            40.7420,
            -74.0048,
            "75 9th Ave, New York, NY 10011",
            true,
        ),
        place(
            "p-013",
            "Brooklyn Botanic Garden",
            Category::Park,
            "Cherry esplanade and conservatories",
            40.6676,
            -73.9632,
            "990 Washington Ave, Brooklyn, NY 11225",
            true,
        ),
        place(
            "p-014",
            "Storm King Art Center",
            Category::Park,
            "Open-air sculpture park in the Hudson Valley",
            41.4253,
            -74.0560,
            "1 Museum Rd, New Windsor, NY 12553",
            true,
        ),
    ]
}
