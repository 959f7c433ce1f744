#![allow(dead_code)]

pub mod app_builder;

pub use app_builder::{get, PageResponse};
