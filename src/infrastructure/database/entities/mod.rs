// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// SeaORM entities, one module per table
pub mod api_key;
pub mod attraction;
pub mod category;
pub mod city;
pub mod contact;
pub mod cuisine;
pub mod event;
pub mod event_type;
pub mod favorite;
pub mod property;
pub mod property_image;
pub mod property_type;
pub mod restaurant;
pub mod review;
pub mod rsvp;
pub mod transport_option;
pub mod transport_type;
pub mod user;
