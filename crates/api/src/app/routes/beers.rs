use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use beerstock_core::BeerId;
use beerstock_inventory::{NewBeer, StockAdjustment};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `{beer}` is a name for `GET` and a numeric id everywhere else.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_beers).post(create_beer))
        .route("/:beer", get(get_beer_by_name).delete(delete_beer))
        .route("/:beer/increment", patch(increment_stock))
        .route("/:beer/decrement", patch(decrement_stock))
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateBeerRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.beers().create(NewBeer::from(body)).await {
        Ok(beer) => (StatusCode::CREATED, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_beer_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.beers().find_by_name(&name).await {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_beers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.beers().list_all().await {
        Ok(beers) => {
            let body: Vec<dto::BeerResponse> = beers.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.beers().delete_by_id(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    adjust_stock(&services, StockAdjustment::Increment, &id, body).await
}

pub async fn decrement_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    adjust_stock(&services, StockAdjustment::Decrement, &id, body).await
}

async fn adjust_stock(
    services: &AppServices,
    adjustment: StockAdjustment,
    id: &str,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let result = match adjustment {
        StockAdjustment::Increment => services.beers().increment(id, body.quantity).await,
        StockAdjustment::Decrement => services.beers().decrement(id, body.quantity).await,
    };

    match result {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
