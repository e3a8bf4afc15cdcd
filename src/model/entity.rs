//! People, planets and vehicles.

use super::{NewResource, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct People {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub skin_color: String,
    pub birth: String,
    pub eyes_color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewPeople {
    pub name: String,
    pub gender: String,
    pub skin_color: String,
    pub birth: String,
    pub eyes_color: String,
}

impl Resource for People {
    const TABLE: &'static str = "people";
    const LABEL: &'static str = "people";
    const COLUMNS: &'static [&'static str] = &["name", "gender", "skin_color", "birth", "eyes_color"];
    type New = NewPeople;

    fn id(&self) -> i32 {
        self.id
    }
}

impl NewResource for NewPeople {
    fn values(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.gender.as_str(),
            self.skin_color.as_str(),
            self.birth.as_str(),
            self.eyes_color.as_str(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub diameter: String,
    pub climate: String,
    pub population: String,
    pub gravity: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewPlanet {
    pub name: String,
    pub diameter: String,
    pub climate: String,
    pub population: String,
    pub gravity: String,
}

impl Resource for Planet {
    const TABLE: &'static str = "planets";
    const LABEL: &'static str = "planet";
    const COLUMNS: &'static [&'static str] = &["name", "diameter", "climate", "population", "gravity"];
    type New = NewPlanet;

    fn id(&self) -> i32 {
        self.id
    }
}

impl NewResource for NewPlanet {
    fn values(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.diameter.as_str(),
            self.climate.as_str(),
            self.population.as_str(),
            self.gravity.as_str(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub crafter: String,
    pub tripulation: String,
    pub speed: String,
    pub passengers: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewVehicle {
    pub name: String,
    pub crafter: String,
    pub tripulation: String,
    pub speed: String,
    pub passengers: String,
}

impl Resource for Vehicle {
    const TABLE: &'static str = "vehicles";
    const LABEL: &'static str = "vehicle";
    const COLUMNS: &'static [&'static str] = &["name", "crafter", "tripulation", "speed", "passengers"];
    type New = NewVehicle;

    fn id(&self) -> i32 {
        self.id
    }
}

impl NewResource for NewVehicle {
    fn values(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.crafter.as_str(),
            self.tripulation.as_str(),
            self.speed.as_str(),
            self.passengers.as_str(),
        ]
    }
}
