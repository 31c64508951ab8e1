//! Core engine for the hucha expense tracker.
//!
//! [`Engine`] wraps a database connection and implements every categoria and
//! gasto operation on top of it. Nothing is cached between calls: each
//! operation reads and writes through the database, and each write runs
//! inside a single database transaction.

pub use commands::GastoCmd;
pub use error::EngineError;
pub use money::Monto;
pub use ops::{Engine, EngineBuilder, GastoListFilter, GastoOrden, OrdenCampo};
pub use validation::GastoValidado;

pub mod categorias;
pub mod gastos;

mod commands;
mod error;
mod money;
mod ops;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
