//! Gasto entity: a single monetary outlay.
//!
//! `monto_centimos` keeps the amount as integer céntimos; see
//! [`crate::Monto`].

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gastos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub descripcion: String,
    pub monto_centimos: i64,
    pub fecha_gasto: DateTimeUtc,
    pub categoria_id: i64,
    pub fecha_creacion: DateTimeUtc,
    pub fecha_actualizacion: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categorias::Entity",
        from = "Column::CategoriaId",
        to = "super::categorias::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Categorias,
}

impl Related<super::categorias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorias.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
