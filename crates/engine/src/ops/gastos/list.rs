use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, Statement, prelude::*};

use crate::{EngineError, Monto, ResultEngine, categorias, gastos};

use super::super::Engine;

/// Filters for listing gastos. All of them compose.
#[derive(Clone, Debug, Default)]
pub struct GastoListFilter {
    /// Restrict to gastos of this categoria.
    pub categoria: Option<i64>,
    /// Case-insensitive substring match on descripcion.
    pub search: Option<String>,
    /// Sort key; `None` means fecha_gasto, newest first.
    pub orden: Option<GastoOrden>,
}

/// Sort key for [`Engine::list_gastos`].
///
/// The string form mirrors the query parameter: a bare field sorts
/// ascending, a `-` prefix sorts descending (`"-monto"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GastoOrden {
    pub campo: OrdenCampo,
    pub descendente: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrdenCampo {
    FechaGasto,
    Monto,
    Descripcion,
    CategoriaNombre,
}

impl GastoOrden {
    pub const DEFAULT: GastoOrden = GastoOrden {
        campo: OrdenCampo::FechaGasto,
        descendente: true,
    };

    /// Parses an ordering query value (`"monto"`, `"-fecha_gasto"`, ...).
    ///
    /// Returns `None` for unknown fields so callers can fall back to the
    /// default ordering instead of failing the request.
    pub fn parse(value: &str) -> Option<GastoOrden> {
        let (descendente, campo) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let campo = match campo {
            "fecha_gasto" => OrdenCampo::FechaGasto,
            "monto" => OrdenCampo::Monto,
            "descripcion" => OrdenCampo::Descripcion,
            "categoria__nombre" => OrdenCampo::CategoriaNombre,
            _ => return None,
        };
        Some(GastoOrden { campo, descendente })
    }
}

fn apply_orden<Q>(query: Q, orden: GastoOrden) -> Q
where
    Q: QueryOrder,
{
    match (orden.campo, orden.descendente) {
        (OrdenCampo::FechaGasto, false) => query.order_by_asc(gastos::Column::FechaGasto),
        (OrdenCampo::FechaGasto, true) => query.order_by_desc(gastos::Column::FechaGasto),
        (OrdenCampo::Monto, false) => query.order_by_asc(gastos::Column::MontoCentimos),
        (OrdenCampo::Monto, true) => query.order_by_desc(gastos::Column::MontoCentimos),
        (OrdenCampo::Descripcion, false) => query.order_by_asc(gastos::Column::Descripcion),
        (OrdenCampo::Descripcion, true) => query.order_by_desc(gastos::Column::Descripcion),
        (OrdenCampo::CategoriaNombre, false) => query.order_by_asc(categorias::Column::Nombre),
        (OrdenCampo::CategoriaNombre, true) => query.order_by_desc(categorias::Column::Nombre),
    }
}

impl Engine {
    /// Lists gastos together with the nombre of their categoria.
    ///
    /// Filters compose: `categoria` narrows to one categoria, `search`
    /// matches a case-insensitive substring of descripcion. Rows with the
    /// same sort value come back in id order.
    pub async fn list_gastos(
        &self,
        filter: &GastoListFilter,
    ) -> ResultEngine<Vec<(gastos::Model, String)>> {
        let mut query = gastos::Entity::find().find_also_related(categorias::Entity);

        if let Some(categoria_id) = filter.categoria {
            query = query.filter(gastos::Column::CategoriaId.eq(categoria_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(gastos::Column::Descripcion.contains(search));
        }

        query = apply_orden(query, filter.orden.unwrap_or(GastoOrden::DEFAULT));
        query = query.order_by_asc(gastos::Column::Id);

        let rows: Vec<(gastos::Model, Option<categorias::Model>)> =
            query.all(&self.database).await?;

        let mut out = Vec::with_capacity(rows.len());
        for (gasto, categoria) in rows {
            let Some(categoria) = categoria else {
                continue;
            };
            out.push((gasto, categoria.nombre));
        }
        Ok(out)
    }

    /// Returns a gasto by id, with the nombre of its categoria.
    pub async fn gasto(&self, gasto_id: i64) -> ResultEngine<(gastos::Model, String)> {
        let row = gastos::Entity::find_by_id(gasto_id)
            .find_also_related(categorias::Entity)
            .one(&self.database)
            .await?;

        match row {
            Some((gasto, Some(categoria))) => Ok((gasto, categoria.nombre)),
            _ => Err(EngineError::NotFound("gasto not found".to_string())),
        }
    }

    /// Sums monto across every gasto in storage.
    ///
    /// List filters never apply here; an empty table sums to zero.
    pub async fn total_gastos(&self) -> ResultEngine<Monto> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_string(
            backend,
            "SELECT COALESCE(SUM(monto_centimos), 0) AS total FROM gastos",
        );

        let row = self.database.query_one(stmt).await?;
        let centimos: i64 = match row {
            Some(row) => row.try_get("", "total")?,
            None => 0,
        };
        Ok(Monto::new(centimos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_fields() {
        assert_eq!(
            GastoOrden::parse("monto"),
            Some(GastoOrden {
                campo: OrdenCampo::Monto,
                descendente: false
            })
        );
        assert_eq!(
            GastoOrden::parse("-fecha_gasto"),
            Some(GastoOrden {
                campo: OrdenCampo::FechaGasto,
                descendente: true
            })
        );
        assert_eq!(
            GastoOrden::parse("categoria__nombre"),
            Some(GastoOrden {
                campo: OrdenCampo::CategoriaNombre,
                descendente: false
            })
        );
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        assert_eq!(GastoOrden::parse("id"), None);
        assert_eq!(GastoOrden::parse("-total"), None);
        assert_eq!(GastoOrden::parse(""), None);
    }
}
