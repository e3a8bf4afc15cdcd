//! Favorite associations between a user and one catalog entity.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Which catalog table a favorite points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    People,
    Planet,
    Vehicle,
}

impl FavoriteKind {
    pub const ALL: [FavoriteKind; 3] = [FavoriteKind::People, FavoriteKind::Planet, FavoriteKind::Vehicle];

    /// Kind for a URL segment (`people`, `planets`, `vehicles`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "people" => Some(FavoriteKind::People),
            "planets" => Some(FavoriteKind::Planet),
            "vehicles" => Some(FavoriteKind::Vehicle),
            _ => None,
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            FavoriteKind::People => "people",
            FavoriteKind::Planet => "planets",
            FavoriteKind::Vehicle => "vehicles",
        }
    }

    /// Association table.
    pub fn table(self) -> &'static str {
        match self {
            FavoriteKind::People => "people_favorites",
            FavoriteKind::Planet => "planet_favorites",
            FavoriteKind::Vehicle => "vehicles_favorites",
        }
    }

    /// Foreign key column pointing at the target table.
    pub fn target_column(self) -> &'static str {
        match self {
            FavoriteKind::People => "people_id",
            FavoriteKind::Planet => "planet_id",
            FavoriteKind::Vehicle => "vehicles_id",
        }
    }

    pub fn target_table(self) -> &'static str {
        match self {
            FavoriteKind::People => "people",
            FavoriteKind::Planet => "planets",
            FavoriteKind::Vehicle => "vehicles",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FavoriteKind::People => "people",
            FavoriteKind::Planet => "planet",
            FavoriteKind::Vehicle => "vehicle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub kind: FavoriteKind,
    pub target_id: i32,
}

/// Serialized with the kind-specific column name, e.g. `{"id":1,"user_id":7,"people_id":3}`.
impl Serialize for Favorite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("user_id", &self.user_id)?;
        map.serialize_entry(self.kind.target_column(), &self.target_id)?;
        map.end()
    }
}

/// Row shape shared by the three association tables; the target column is aliased.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct FavoriteRow {
    pub id: i32,
    pub user_id: i32,
    pub target_id: i32,
}

impl FavoriteRow {
    pub fn into_favorite(self, kind: FavoriteKind) -> Favorite {
        Favorite {
            id: self.id,
            user_id: self.user_id,
            kind,
            target_id: self.target_id,
        }
    }
}

/// All favorites of one user, grouped by kind.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct UserFavorites {
    pub people: Vec<Favorite>,
    pub planets: Vec<Favorite>,
    pub vehicles: Vec<Favorite>,
}

impl UserFavorites {
    pub fn push(&mut self, favorite: Favorite) {
        match favorite.kind {
            FavoriteKind::People => self.people.push(favorite),
            FavoriteKind::Planet => self.planets.push(favorite),
            FavoriteKind::Vehicle => self.vehicles.push(favorite),
        }
    }
}
