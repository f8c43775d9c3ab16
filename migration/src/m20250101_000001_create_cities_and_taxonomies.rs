use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Duplicate city names are tolerated, so no unique index on name.
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Cities::State)
                            .string()
                            .not_null()
                            .default("MI"),
                    )
                    .col(ColumnDef::new(Cities::Description).text().not_null())
                    .col(ColumnDef::new(Cities::Population).integer().not_null())
                    .col(ColumnDef::new(Cities::Climate).string().not_null())
                    .col(
                        ColumnDef::new(Cities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cities_name")
                    .table(Cities::Table)
                    .col(Cities::Name)
                    .to_owned(),
            )
            .await?;

        for table in Taxonomy::tables() {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Taxonomy::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Taxonomy::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in Taxonomy::tables() {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cities {
    Table,
    Id,
    Name,
    State,
    Description,
    Population,
    Climate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Taxonomy {
    Id,
    Name,
}

impl Taxonomy {
    fn tables() -> [Alias; 5] {
        [
            Alias::new("categories"),
            Alias::new("cuisines"),
            Alias::new("event_types"),
            Alias::new("property_types"),
            Alias::new("transport_types"),
        ]
    }
}
