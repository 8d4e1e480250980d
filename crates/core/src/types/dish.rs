//! Catalog entries: dishes and the chefs who cook them.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChefId, Cuisine, DishId, Price};

/// A chef, embedded in every dish they cook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chef {
    pub id: ChefId,
    pub name: String,
    pub avatar: Url,
    pub rating: f32,
    pub speciality: String,
}

/// A single orderable meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub image: Url,
    pub cuisine: Cuisine,
    pub price: Price,
    pub rating: f32,
    /// Free-form preparation time, e.g. `"25 min"`.
    pub cook_time: String,
    pub chef: Chef,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}
