//! Field validation for writes.
//!
//! [`validate_gasto`] is a pure function over the submitted fields: checks
//! run in a fixed order (amount, description, date, category) and stop at
//! the first failure. The database-backed checks (duplicate triple,
//! categoria existence) live in the write ops and run after these.

use chrono::{DateTime, Utc};

use crate::{EngineError, GastoCmd, Monto, ResultEngine};

const NOMBRE_MAX_CHARS: usize = 100;
const DESCRIPCION_MAX_CHARS: usize = 255;

/// A gasto that passed field validation and is ready for the database
/// checks. `descripcion` is already trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct GastoValidado {
    pub descripcion: String,
    pub monto: Monto,
    pub fecha_gasto: DateTime<Utc>,
    pub categoria_id: i64,
}

pub fn validate_gasto(cmd: &GastoCmd) -> ResultEngine<GastoValidado> {
    let monto = match cmd.monto {
        Some(value) => Monto::try_from_f64(value)?,
        None => Monto::ZERO,
    };
    if !monto.is_positive() {
        return Err(EngineError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }

    let descripcion = match cmd.descripcion.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => {
            return Err(EngineError::Validation(
                "description cannot be empty".to_string(),
            ));
        }
    };
    if descripcion.chars().count() > DESCRIPCION_MAX_CHARS {
        return Err(EngineError::Validation(format!(
            "description cannot exceed {DESCRIPCION_MAX_CHARS} characters"
        )));
    }

    let fecha_gasto = cmd.fecha_gasto.ok_or_else(|| {
        EngineError::Validation("expense date is required".to_string())
    })?;

    let categoria_id = cmd
        .categoria
        .ok_or_else(|| EngineError::Validation("category is required".to_string()))?;

    Ok(GastoValidado {
        descripcion,
        monto,
        fecha_gasto,
        categoria_id,
    })
}

/// Trims and requires a categoria nombre.
pub fn validate_nombre(value: Option<&str>) -> ResultEngine<String> {
    let nombre = match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => return Err(EngineError::Validation("name is required".to_string())),
    };
    if nombre.chars().count() > NOMBRE_MAX_CHARS {
        return Err(EngineError::Validation(format!(
            "name cannot exceed {NOMBRE_MAX_CHARS} characters"
        )));
    }
    Ok(nombre)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_cmd() -> GastoCmd {
        GastoCmd::new()
            .descripcion("Lunch")
            .monto(12.5)
            .fecha_gasto("2024-01-01T12:00:00Z".parse().unwrap())
            .categoria(1)
    }

    #[test]
    fn accepts_a_complete_gasto() {
        let valid = validate_gasto(&full_cmd()).unwrap();
        assert_eq!(valid.descripcion, "Lunch");
        assert_eq!(valid.monto, Monto::new(1250));
        assert_eq!(valid.categoria_id, 1);
    }

    #[test]
    fn rejects_missing_or_non_positive_monto() {
        for cmd in [
            GastoCmd { monto: None, ..full_cmd() },
            full_cmd().monto(0.0),
            full_cmd().monto(-5.0),
        ] {
            assert_eq!(
                validate_gasto(&cmd),
                Err(EngineError::Validation(
                    "amount must be greater than zero".to_string()
                ))
            );
        }
    }

    #[test]
    fn monto_is_checked_before_descripcion() {
        let cmd = GastoCmd::new().monto(-1.0);
        assert_eq!(
            validate_gasto(&cmd),
            Err(EngineError::Validation(
                "amount must be greater than zero".to_string()
            ))
        );
    }

    #[test]
    fn rejects_blank_descripcion() {
        for descripcion in [None, Some("".to_string()), Some("   ".to_string())] {
            let cmd = GastoCmd { descripcion, ..full_cmd() };
            assert_eq!(
                validate_gasto(&cmd),
                Err(EngineError::Validation(
                    "description cannot be empty".to_string()
                ))
            );
        }
    }

    #[test]
    fn trims_descripcion() {
        let valid = validate_gasto(&full_cmd().descripcion("  Lunch at cafe  ")).unwrap();
        assert_eq!(valid.descripcion, "Lunch at cafe");
    }

    #[test]
    fn rejects_overlong_descripcion() {
        let cmd = full_cmd().descripcion("x".repeat(256));
        assert!(matches!(
            validate_gasto(&cmd),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn rejects_missing_fecha() {
        let cmd = GastoCmd { fecha_gasto: None, ..full_cmd() };
        assert_eq!(
            validate_gasto(&cmd),
            Err(EngineError::Validation(
                "expense date is required".to_string()
            ))
        );
    }

    #[test]
    fn rejects_missing_categoria() {
        let cmd = GastoCmd { categoria: None, ..full_cmd() };
        assert_eq!(
            validate_gasto(&cmd),
            Err(EngineError::Validation("category is required".to_string()))
        );
    }

    #[test]
    fn nombre_is_trimmed_and_required() {
        assert_eq!(validate_nombre(Some("  Food ")).unwrap(), "Food");
        assert!(validate_nombre(None).is_err());
        assert!(validate_nombre(Some("   ")).is_err());
    }
}
