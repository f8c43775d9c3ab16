// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transport_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub transport_type_id: i32,
    pub city_id: i32,
    pub address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub routes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub schedule: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transport_type::Entity",
        from = "Column::TransportTypeId",
        to = "super::transport_type::Column::Id"
    )]
    TransportType,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
}

impl Related<super::transport_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportType.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
