use serde::{Deserialize, Serialize};

use beerstock_inventory::{Beer, BeerType, NewBeer};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/v1/beers`. Every field is required; an `id` sent by the
/// client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateBeerRequest {
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl From<CreateBeerRequest> for NewBeer {
    fn from(req: CreateBeerRequest) -> Self {
        NewBeer {
            name: req.name,
            brand: req.brand,
            max: req.max,
            quantity: req.quantity,
            beer_type: req.beer_type,
        }
    }
}

/// Body of the increment/decrement endpoints.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeerResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl From<Beer> for BeerResponse {
    fn from(beer: Beer) -> Self {
        BeerResponse {
            id: beer.id.value(),
            name: beer.name,
            brand: beer.brand,
            max: beer.max,
            quantity: beer.quantity,
            beer_type: beer.beer_type,
        }
    }
}
