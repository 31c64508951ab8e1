use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod categoria {
    use super::*;

    /// Request body for creating or updating a categoria.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoriaWrite {
        pub nombre: Option<String>,
    }

    /// A categoria as returned by the API.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriaView {
        pub id: i64,
        pub nombre: String,
        /// RFC3339 timestamp, set once at creation.
        pub fecha_creacion: DateTime<Utc>,
    }
}

pub mod gasto {
    use super::*;

    /// Request body for creating or updating a gasto.
    ///
    /// Every field is optional on the wire; which ones may be omitted
    /// depends on the verb (PATCH keeps stored values, POST and PUT
    /// validate presence).
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GastoWrite {
        pub descripcion: Option<String>,
        /// Amount as a JSON number with at most two decimals.
        pub monto: Option<f64>,
        pub fecha_gasto: Option<DateTime<Utc>>,
        /// Id of the owning categoria.
        pub categoria: Option<i64>,
    }

    /// Query parameters accepted by the gasto list endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GastoListQuery {
        /// Exact categoria id.
        pub categoria: Option<i64>,
        /// Substring match on descripcion, case-insensitive.
        pub search: Option<String>,
        /// One of `fecha_gasto`, `monto`, `descripcion`,
        /// `categoria__nombre`; prefix with `-` for descending.
        pub ordering: Option<String>,
    }

    /// A gasto as returned by the API.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GastoView {
        pub id: i64,
        pub descripcion: String,
        pub monto: f64,
        pub fecha_gasto: DateTime<Utc>,
        /// Id of the owning categoria.
        pub categoria: i64,
        /// Derived, read-only.
        pub categoria_nombre: String,
        pub fecha_creacion: DateTime<Utc>,
        pub fecha_actualizacion: DateTime<Utc>,
    }

    /// Response body of the total endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TotalView {
        pub total: f64,
    }
}
