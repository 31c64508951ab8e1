use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, GastoCmd, Monto, ResultEngine, categorias, gastos,
    validation::{self, GastoValidado},
};

use super::super::{Engine, with_tx};

impl Engine {
    /// Creates a gasto after running the validation pipeline.
    pub async fn create_gasto(&self, cmd: GastoCmd) -> ResultEngine<(gastos::Model, String)> {
        let valid = validation::validate_gasto(&cmd)?;
        with_tx!(self, |db_tx| {
            Self::require_triple_free(&db_tx, &valid, None).await?;
            let categoria = Self::require_categoria(&db_tx, valid.categoria_id).await?;

            let now = Utc::now();
            let active = gastos::ActiveModel {
                descripcion: ActiveValue::Set(valid.descripcion.clone()),
                monto_centimos: ActiveValue::Set(valid.monto.centimos()),
                fecha_gasto: ActiveValue::Set(valid.fecha_gasto),
                categoria_id: ActiveValue::Set(valid.categoria_id),
                fecha_creacion: ActiveValue::Set(now),
                fecha_actualizacion: ActiveValue::Set(now),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok((model, categoria.nombre))
        })
    }

    /// Updates a gasto, re-running the full validation pipeline.
    ///
    /// With `partial` set, missing fields keep their stored values. The
    /// duplicate check skips the row being updated, so saving a gasto
    /// unchanged never conflicts.
    pub async fn update_gasto(
        &self,
        gasto_id: i64,
        cmd: GastoCmd,
        partial: bool,
    ) -> ResultEngine<(gastos::Model, String)> {
        with_tx!(self, |db_tx| {
            let current = gastos::Entity::find_by_id(gasto_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("gasto not found".to_string()))?;

            let cmd = if partial { merge_cmd(cmd, &current) } else { cmd };
            let valid = validation::validate_gasto(&cmd)?;

            Self::require_triple_free(&db_tx, &valid, Some(gasto_id)).await?;
            let categoria = Self::require_categoria(&db_tx, valid.categoria_id).await?;

            let mut active: gastos::ActiveModel = current.into();
            active.descripcion = ActiveValue::Set(valid.descripcion.clone());
            active.monto_centimos = ActiveValue::Set(valid.monto.centimos());
            active.fecha_gasto = ActiveValue::Set(valid.fecha_gasto);
            active.categoria_id = ActiveValue::Set(valid.categoria_id);
            active.fecha_actualizacion = ActiveValue::Set(Utc::now());
            let model = active.update(&db_tx).await?;
            Ok((model, categoria.nombre))
        })
    }

    /// Deletes a gasto by id.
    pub async fn delete_gasto(&self, gasto_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let current = gastos::Entity::find_by_id(gasto_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("gasto not found".to_string()))?;
            current.delete(&db_tx).await?;
            Ok(())
        })
    }

    /// Rejects a (descripcion, monto, fecha_gasto) triple that already
    /// exists on another row.
    ///
    /// Application-level check only; there is no unique constraint behind
    /// it, so two simultaneous identical submissions can still both pass.
    async fn require_triple_free(
        db_tx: &DatabaseTransaction,
        valid: &GastoValidado,
        exclude_id: Option<i64>,
    ) -> ResultEngine<()> {
        let mut query = gastos::Entity::find()
            .filter(gastos::Column::Descripcion.eq(valid.descripcion.as_str()))
            .filter(gastos::Column::MontoCentimos.eq(valid.monto.centimos()))
            .filter(gastos::Column::FechaGasto.eq(valid.fecha_gasto));
        if let Some(gasto_id) = exclude_id {
            query = query.filter(gastos::Column::Id.ne(gasto_id));
        }

        if query.count(db_tx).await? > 0 {
            return Err(EngineError::Conflict(
                "an expense with the same description, amount, and date already exists"
                    .to_string(),
            ));
        }
        Ok(())
    }

    async fn require_categoria(
        db_tx: &DatabaseTransaction,
        categoria_id: i64,
    ) -> ResultEngine<categorias::Model> {
        categorias::Entity::find_by_id(categoria_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound("categoria not found".to_string()))
    }
}

fn merge_cmd(cmd: GastoCmd, current: &gastos::Model) -> GastoCmd {
    GastoCmd {
        descripcion: cmd
            .descripcion
            .or_else(|| Some(current.descripcion.clone())),
        monto: cmd
            .monto
            .or_else(|| Some(Monto::new(current.monto_centimos).as_f64())),
        fecha_gasto: cmd.fecha_gasto.or(Some(current.fecha_gasto)),
        categoria: cmd.categoria.or(Some(current.categoria_id)),
    }
}
