//! Categorias API endpoints.

use api_types::categoria::{CategoriaView, CategoriaWrite};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_categoria(model: engine::categorias::Model) -> CategoriaView {
    CategoriaView {
        id: model.id,
        nombre: model.nombre,
        fecha_creacion: model.fecha_creacion,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoriaView>>, ServerError> {
    let categorias = state
        .engine
        .list_categorias()
        .await?
        .into_iter()
        .map(map_categoria)
        .collect();
    Ok(Json(categorias))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(categoria_id): Path<i64>,
) -> Result<Json<CategoriaView>, ServerError> {
    let categoria = state.engine.categoria(categoria_id).await?;
    Ok(Json(map_categoria(categoria)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoriaWrite>,
) -> Result<(StatusCode, Json<CategoriaView>), ServerError> {
    let categoria = state
        .engine
        .create_categoria(payload.nombre.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(map_categoria(categoria))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(categoria_id): Path<i64>,
    Json(payload): Json<CategoriaWrite>,
) -> Result<Json<CategoriaView>, ServerError> {
    let categoria = state
        .engine
        .update_categoria(categoria_id, payload.nombre.as_deref(), false)
        .await?;
    Ok(Json(map_categoria(categoria)))
}

pub async fn update_partial(
    State(state): State<ServerState>,
    Path(categoria_id): Path<i64>,
    Json(payload): Json<CategoriaWrite>,
) -> Result<Json<CategoriaView>, ServerError> {
    let categoria = state
        .engine
        .update_categoria(categoria_id, payload.nombre.as_deref(), true)
        .await?;
    Ok(Json(map_categoria(categoria)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(categoria_id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_categoria(categoria_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
