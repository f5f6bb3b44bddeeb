//! `SeaORM` Entity prelude

pub use super::sales::Entity as Sales;
