use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn reference<T, C>(name: &str, table: T, column: C, target: &str) -> ForeignKeyCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Alias::new(target), Alias::new("id"))
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attractions::Table)
                    .if_not_exists()
                    .col(id_col(Attractions::Id))
                    .col(ColumnDef::new(Attractions::Name).string().not_null())
                    .col(ColumnDef::new(Attractions::Description).text().not_null())
                    .col(ColumnDef::new(Attractions::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Attractions::CityId).integer().not_null())
                    .col(ColumnDef::new(Attractions::Address).string().not_null())
                    .col(ColumnDef::new(Attractions::Latitude).double().null())
                    .col(ColumnDef::new(Attractions::Longitude).double().null())
                    .col(ColumnDef::new(Attractions::OpeningHours).string().not_null())
                    .col(ColumnDef::new(Attractions::Website).string().null())
                    .col(ColumnDef::new(Attractions::Image).string().null())
                    .col(
                        ColumnDef::new(Attractions::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Attractions::CreatedAt))
                    .col(timestamp_col(Attractions::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_attractions_category",
                        Attractions::Table,
                        Attractions::CategoryId,
                        "categories",
                    ))
                    .foreign_key(&mut reference(
                        "fk_attractions_city",
                        Attractions::Table,
                        Attractions::CityId,
                        "cities",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attractions_natural_key")
                    .table(Attractions::Table)
                    .col(Attractions::Name)
                    .col(Attractions::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(id_col(Restaurants::Id))
                    .col(ColumnDef::new(Restaurants::Name).string().not_null())
                    .col(ColumnDef::new(Restaurants::Description).text().not_null())
                    .col(ColumnDef::new(Restaurants::CuisineId).integer().not_null())
                    .col(ColumnDef::new(Restaurants::CityId).integer().not_null())
                    .col(ColumnDef::new(Restaurants::Address).string().not_null())
                    .col(ColumnDef::new(Restaurants::Latitude).double().null())
                    .col(ColumnDef::new(Restaurants::Longitude).double().null())
                    .col(ColumnDef::new(Restaurants::OpeningHours).string().not_null())
                    .col(ColumnDef::new(Restaurants::Website).string().null())
                    .col(
                        ColumnDef::new(Restaurants::PriceLevel)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Restaurants::Image).string().null())
                    .col(
                        ColumnDef::new(Restaurants::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Restaurants::CreatedAt))
                    .col(timestamp_col(Restaurants::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_restaurants_cuisine",
                        Restaurants::Table,
                        Restaurants::CuisineId,
                        "cuisines",
                    ))
                    .foreign_key(&mut reference(
                        "fk_restaurants_city",
                        Restaurants::Table,
                        Restaurants::CityId,
                        "cities",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_natural_key")
                    .table(Restaurants::Table)
                    .col(Restaurants::Name)
                    .col(Restaurants::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(id_col(Events::Id))
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().not_null())
                    .col(ColumnDef::new(Events::EventTypeId).integer().not_null())
                    .col(ColumnDef::new(Events::CityId).integer().not_null())
                    .col(ColumnDef::new(Events::Venue).string().not_null())
                    .col(ColumnDef::new(Events::Address).string().not_null())
                    .col(ColumnDef::new(Events::Date).date().not_null())
                    .col(ColumnDef::new(Events::Time).time().not_null())
                    .col(ColumnDef::new(Events::Website).string().null())
                    .col(ColumnDef::new(Events::Image).string().null())
                    .col(ColumnDef::new(Events::Latitude).double().null())
                    .col(ColumnDef::new(Events::Longitude).double().null())
                    .col(
                        ColumnDef::new(Events::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Events::CreatedAt))
                    .col(timestamp_col(Events::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_events_event_type",
                        Events::Table,
                        Events::EventTypeId,
                        "event_types",
                    ))
                    .foreign_key(&mut reference(
                        "fk_events_city",
                        Events::Table,
                        Events::CityId,
                        "cities",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_natural_key")
                    .table(Events::Table)
                    .col(Events::Name)
                    .col(Events::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(id_col(Properties::Id))
                    .col(ColumnDef::new(Properties::Title).string().not_null())
                    .col(ColumnDef::new(Properties::Description).text().not_null())
                    .col(ColumnDef::new(Properties::PropertyTypeId).integer().not_null())
                    .col(ColumnDef::new(Properties::CityId).integer().not_null())
                    .col(ColumnDef::new(Properties::Address).string().not_null())
                    .col(ColumnDef::new(Properties::Latitude).double().null())
                    .col(ColumnDef::new(Properties::Longitude).double().null())
                    .col(ColumnDef::new(Properties::Price).big_integer().not_null())
                    .col(ColumnDef::new(Properties::Bedrooms).integer().not_null())
                    .col(ColumnDef::new(Properties::Bathrooms).double().not_null())
                    .col(ColumnDef::new(Properties::SizeSqft).integer().not_null())
                    .col(
                        ColumnDef::new(Properties::ForSale)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Properties::Image).string().null())
                    .col(
                        ColumnDef::new(Properties::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Properties::CreatedAt))
                    .col(timestamp_col(Properties::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_properties_property_type",
                        Properties::Table,
                        Properties::PropertyTypeId,
                        "property_types",
                    ))
                    .foreign_key(&mut reference(
                        "fk_properties_city",
                        Properties::Table,
                        Properties::CityId,
                        "cities",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_natural_key")
                    .table(Properties::Table)
                    .col(Properties::Title)
                    .col(Properties::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(id_col(PropertyImages::Id))
                    .col(ColumnDef::new(PropertyImages::PropertyId).integer().not_null())
                    .col(ColumnDef::new(PropertyImages::Image).string().not_null())
                    .col(timestamp_col(PropertyImages::CreatedAt))
                    .foreign_key(&mut reference(
                        "fk_property_images_property",
                        PropertyImages::Table,
                        PropertyImages::PropertyId,
                        "properties",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportOptions::Table)
                    .if_not_exists()
                    .col(id_col(TransportOptions::Id))
                    .col(
                        ColumnDef::new(TransportOptions::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TransportOptions::Description).text().not_null())
                    .col(
                        ColumnDef::new(TransportOptions::TransportTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransportOptions::CityId).integer().not_null())
                    .col(ColumnDef::new(TransportOptions::Address).string().null())
                    .col(ColumnDef::new(TransportOptions::Routes).text().null())
                    .col(ColumnDef::new(TransportOptions::Schedule).text().null())
                    .col(ColumnDef::new(TransportOptions::Website).string().null())
                    .col(ColumnDef::new(TransportOptions::Image).string().null())
                    .col(
                        ColumnDef::new(TransportOptions::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(TransportOptions::CreatedAt))
                    .col(timestamp_col(TransportOptions::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_transport_options_transport_type",
                        TransportOptions::Table,
                        TransportOptions::TransportTypeId,
                        "transport_types",
                    ))
                    .foreign_key(&mut reference(
                        "fk_transport_options_city",
                        TransportOptions::Table,
                        TransportOptions::CityId,
                        "cities",
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransportOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attractions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Attractions {
    Table,
    Id,
    Name,
    Description,
    CategoryId,
    CityId,
    Address,
    Latitude,
    Longitude,
    OpeningHours,
    Website,
    Image,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Restaurants {
    Table,
    Id,
    Name,
    Description,
    CuisineId,
    CityId,
    Address,
    Latitude,
    Longitude,
    OpeningHours,
    Website,
    PriceLevel,
    Rating,
    Image,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    EventTypeId,
    CityId,
    Venue,
    Address,
    Date,
    Time,
    Website,
    Image,
    Latitude,
    Longitude,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Title,
    Description,
    PropertyTypeId,
    CityId,
    Address,
    Latitude,
    Longitude,
    Price,
    Bedrooms,
    Bathrooms,
    SizeSqft,
    ForSale,
    Image,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PropertyImages {
    Table,
    Id,
    PropertyId,
    Image,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TransportOptions {
    Table,
    Id,
    Name,
    Description,
    TransportTypeId,
    CityId,
    Address,
    Routes,
    Schedule,
    Website,
    Image,
    Featured,
    CreatedAt,
    UpdatedAt,
}
