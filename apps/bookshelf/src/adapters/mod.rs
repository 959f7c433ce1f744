//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps
//! rows to domain types.

pub mod books_sea;
