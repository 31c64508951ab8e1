//! Gasto operations: listing, writes, and the total aggregate.

mod list;
mod write;

pub use list::{GastoListFilter, GastoOrden, OrdenCampo};
