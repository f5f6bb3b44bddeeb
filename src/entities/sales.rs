//! `SeaORM` Entity for sales table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub timestamp: String,
    /// JSON-encoded item list
    #[sea_orm(column_type = "Text")]
    pub items: String,
    pub total_amount: f64,
    pub payment_received: f64,
    pub change_amount: f64,
    pub debt_amount: f64,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
