//! Initial schema: `categorias` and `gastos`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Categorias {
    Table,
    Id,
    Nombre,
    FechaCreacion,
}

#[derive(Iden)]
enum Gastos {
    Table,
    Id,
    Descripcion,
    MontoCentimos,
    FechaGasto,
    CategoriaId,
    FechaCreacion,
    FechaActualizacion,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categorias::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categorias::Nombre)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categorias::FechaCreacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categorias-nombre-unique")
                    .table(Categorias::Table)
                    .col(Categorias::Nombre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gastos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gastos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Gastos::Descripcion)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gastos::MontoCentimos)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gastos::FechaGasto)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Gastos::CategoriaId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Gastos::FechaCreacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gastos::FechaActualizacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-gastos-categoria_id")
                            .from(Gastos::Table, Gastos::CategoriaId)
                            .to(Categorias::Table, Categorias::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-gastos-categoria_id")
                    .table(Gastos::Table)
                    .col(Gastos::CategoriaId)
                    .to_owned(),
            )
            .await?;

        // Non-unique: the duplicate-triple rule is an application check.
        manager
            .create_index(
                Index::create()
                    .name("idx-gastos-triple")
                    .table(Gastos::Table)
                    .col(Gastos::Descripcion)
                    .col(Gastos::MontoCentimos)
                    .col(Gastos::FechaGasto)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gastos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await?;
        Ok(())
    }
}
