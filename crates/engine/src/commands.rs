//! Command structs for engine write operations.
//!
//! These types group parameters for writes, keeping call sites readable and
//! avoiding long argument lists.

use chrono::{DateTime, Utc};

/// Field values for creating or updating a gasto.
///
/// Every field is optional so the same command serves create, full update,
/// and partial update; the validation pipeline decides which missing fields
/// are errors.
#[derive(Clone, Debug, Default)]
pub struct GastoCmd {
    pub descripcion: Option<String>,
    pub monto: Option<f64>,
    pub fecha_gasto: Option<DateTime<Utc>>,
    pub categoria: Option<i64>,
}

impl GastoCmd {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn descripcion(mut self, value: impl Into<String>) -> Self {
        self.descripcion = Some(value.into());
        self
    }

    #[must_use]
    pub fn monto(mut self, value: f64) -> Self {
        self.monto = Some(value);
        self
    }

    #[must_use]
    pub fn fecha_gasto(mut self, value: DateTime<Utc>) -> Self {
        self.fecha_gasto = Some(value);
        self
    }

    #[must_use]
    pub fn categoria(mut self, categoria_id: i64) -> Self {
        self.categoria = Some(categoria_id);
        self
    }
}
