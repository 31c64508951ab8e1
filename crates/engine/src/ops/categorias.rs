//! Categoria operations.

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{EngineError, ResultEngine, categorias, gastos, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Lists every categoria, oldest first.
    pub async fn list_categorias(&self) -> ResultEngine<Vec<categorias::Model>> {
        let models = categorias::Entity::find()
            .order_by_asc(categorias::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models)
    }

    /// Returns a categoria by id.
    pub async fn categoria(&self, categoria_id: i64) -> ResultEngine<categorias::Model> {
        categorias::Entity::find_by_id(categoria_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("categoria not found".to_string()))
    }

    /// Creates a categoria with a unique nombre.
    pub async fn create_categoria(&self, nombre: Option<&str>) -> ResultEngine<categorias::Model> {
        let nombre = validation::validate_nombre(nombre)?;
        with_tx!(self, |db_tx| {
            Self::require_nombre_free(&db_tx, &nombre, None).await?;

            let active = categorias::ActiveModel {
                nombre: ActiveValue::Set(nombre.clone()),
                fecha_creacion: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    /// Updates a categoria nombre.
    ///
    /// With `partial` set, a missing nombre leaves the record untouched.
    pub async fn update_categoria(
        &self,
        categoria_id: i64,
        nombre: Option<&str>,
        partial: bool,
    ) -> ResultEngine<categorias::Model> {
        with_tx!(self, |db_tx| {
            let current = categorias::Entity::find_by_id(categoria_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("categoria not found".to_string()))?;

            let nombre = match nombre {
                None if partial => current.nombre.clone(),
                value => validation::validate_nombre(value)?,
            };
            if nombre != current.nombre {
                Self::require_nombre_free(&db_tx, &nombre, Some(categoria_id)).await?;
            }

            let mut active: categorias::ActiveModel = current.into();
            active.nombre = ActiveValue::Set(nombre);
            let model = active.update(&db_tx).await?;
            Ok(model)
        })
    }

    /// Deletes a categoria.
    ///
    /// Fails while any gasto still references it; deletes never cascade.
    pub async fn delete_categoria(&self, categoria_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let current = categorias::Entity::find_by_id(categoria_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("categoria not found".to_string()))?;

            let referencing = gastos::Entity::find()
                .filter(gastos::Column::CategoriaId.eq(categoria_id))
                .count(&db_tx)
                .await?;
            match referencing {
                0 => {
                    current.delete(&db_tx).await?;
                    Ok(())
                }
                n => Err(EngineError::ReferentialIntegrity(format!(
                    "categoria is referenced by {n} gastos and cannot be deleted"
                ))),
            }
        })
    }

    async fn require_nombre_free(
        db_tx: &DatabaseTransaction,
        nombre: &str,
        exclude_id: Option<i64>,
    ) -> ResultEngine<()> {
        let mut query =
            categorias::Entity::find().filter(categorias::Column::Nombre.eq(nombre));
        if let Some(categoria_id) = exclude_id {
            query = query.filter(categorias::Column::Id.ne(categoria_id));
        }

        if query.count(db_tx).await? > 0 {
            return Err(EngineError::Conflict(format!(
                "a categoria named \"{nombre}\" already exists"
            )));
        }
        Ok(())
    }
}
