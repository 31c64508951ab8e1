//! Categoria entity: a named grouping for gastos.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub fecha_creacion: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gastos::Entity")]
    Gastos,
}

impl Related<super::gastos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gastos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
