use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use crate::db::SharedRepository;
use crate::error::AppError;
use crate::models::ingredient::{Ingredient, IngredientInput};

/// Path ids are signed in the URL but unsigned in storage, so a negative id is
/// well-formed and simply matches nothing.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) => u64::try_from(id).map_err(|_| AppError::NotFound),
        Err(_) => Err(AppError::InvalidId),
    }
}

fn parse_name(body: Result<Json<IngredientInput>, JsonRejection>) -> Result<String, AppError> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!("Rejected request body: {rejection}");
        AppError::InvalidBody
    })?;

    if input.name.is_empty() {
        return Err(AppError::NameRequired);
    }
    Ok(input.name)
}

pub async fn get(
    Extension(db): Extension<SharedRepository>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let items = db
        .scan()
        .await
        .map_err(|e| AppError::storage("Failed to fetch ingredients", e))?;
    Ok(Json(items))
}

pub async fn create(
    Extension(db): Extension<SharedRepository>,
    body: Result<Json<IngredientInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let name = parse_name(body)?;

    let item = db
        .create(name)
        .await
        .map_err(|e| AppError::storage("Failed to create ingredient", e))?;
    tracing::debug!(id = item.id, "Created ingredient {}", item.name);

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

pub async fn update(
    Extension(db): Extension<SharedRepository>,
    Path(id): Path<String>,
    body: Result<Json<IngredientInput>, JsonRejection>,
) -> Result<Json<Ingredient>, AppError> {
    const ACTION: &str = "Failed to update ingredient";

    let id = parse_id(&id)?;
    let mut item = db
        .get_item(id)
        .await
        .map_err(|e| AppError::storage(ACTION, e))?
        .ok_or(AppError::NotFound)?;

    item.name = parse_name(body)?;

    let item = db
        .update(item)
        .await
        .map_err(|e| AppError::storage(ACTION, e))?;
    Ok(Json(item))
}

pub async fn delete(
    Extension(db): Extension<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    const ACTION: &str = "Failed to delete ingredient";

    let id = parse_id(&id)?;
    db.get_item(id)
        .await
        .map_err(|e| AppError::storage(ACTION, e))?
        .ok_or(AppError::NotFound)?;

    db.soft_delete(id)
        .await
        .map_err(|e| AppError::storage(ACTION, e))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Ingredient deleted successfully" })),
    )
        .into_response())
}
