//! HTTP handlers, grouped by resource.

pub mod contact;
pub mod geo;
pub mod health;
pub mod styles;
pub mod tours;
pub mod travellers;
pub mod visitings;
