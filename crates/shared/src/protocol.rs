use serde::{Deserialize, Serialize};

use crate::domain::{HumilityScore, SortOrder, Superhero};

pub const SUPERHEROES_ROUTE: &str = "/superheroes";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListSuperheroesQuery {
    pub order: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperheroListResponse {
    pub data: Vec<Superhero>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuperheroRequest {
    pub name: String,
    pub superpower: String,
    pub humility_score: HumilityScore,
}

impl From<&Superhero> for CreateSuperheroRequest {
    fn from(hero: &Superhero) -> Self {
        Self {
            name: hero.name.clone(),
            superpower: hero.superpower.clone(),
            humility_score: hero.humility_score,
        }
    }
}
