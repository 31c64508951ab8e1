//! Gastos API endpoints.

use api_types::gasto::{GastoListQuery, GastoView, GastoWrite, TotalView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{GastoCmd, GastoListFilter, GastoOrden, Monto};

use crate::{ServerError, server::ServerState};

fn map_gasto((gasto, categoria_nombre): (engine::gastos::Model, String)) -> GastoView {
    GastoView {
        id: gasto.id,
        descripcion: gasto.descripcion,
        monto: Monto::new(gasto.monto_centimos).as_f64(),
        fecha_gasto: gasto.fecha_gasto,
        categoria: gasto.categoria_id,
        categoria_nombre,
        fecha_creacion: gasto.fecha_creacion,
        fecha_actualizacion: gasto.fecha_actualizacion,
    }
}

fn map_cmd(payload: GastoWrite) -> GastoCmd {
    GastoCmd {
        descripcion: payload.descripcion,
        monto: payload.monto,
        fecha_gasto: payload.fecha_gasto,
        categoria: payload.categoria,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<GastoListQuery>,
) -> Result<Json<Vec<GastoView>>, ServerError> {
    let filter = GastoListFilter {
        categoria: query.categoria,
        search: query.search,
        // Unknown ordering values fall back to the default order.
        orden: query.ordering.as_deref().and_then(GastoOrden::parse),
    };

    let gastos = state
        .engine
        .list_gastos(&filter)
        .await?
        .into_iter()
        .map(map_gasto)
        .collect();
    Ok(Json(gastos))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(gasto_id): Path<i64>,
) -> Result<Json<GastoView>, ServerError> {
    let gasto = state.engine.gasto(gasto_id).await?;
    Ok(Json(map_gasto(gasto)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GastoWrite>,
) -> Result<(StatusCode, Json<GastoView>), ServerError> {
    let gasto = state.engine.create_gasto(map_cmd(payload)).await?;
    Ok((StatusCode::CREATED, Json(map_gasto(gasto))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(gasto_id): Path<i64>,
    Json(payload): Json<GastoWrite>,
) -> Result<Json<GastoView>, ServerError> {
    let gasto = state
        .engine
        .update_gasto(gasto_id, map_cmd(payload), false)
        .await?;
    Ok(Json(map_gasto(gasto)))
}

pub async fn update_partial(
    State(state): State<ServerState>,
    Path(gasto_id): Path<i64>,
    Json(payload): Json<GastoWrite>,
) -> Result<Json<GastoView>, ServerError> {
    let gasto = state
        .engine
        .update_gasto(gasto_id, map_cmd(payload), true)
        .await?;
    Ok(Json(map_gasto(gasto)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(gasto_id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_gasto(gasto_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Global sum of every gasto; zero when the table is empty.
pub async fn total(State(state): State<ServerState>) -> Result<Json<TotalView>, ServerError> {
    let total = state.engine.total_gastos().await?;
    Ok(Json(TotalView {
        total: total.as_f64(),
    }))
}
