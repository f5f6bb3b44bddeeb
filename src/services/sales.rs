//! Sale store: the four operations over the `sales` table.
//!
//! Each operation is a single SQL statement against the pool; no connection
//! is held across statements.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{prelude::*, sales};
use crate::error::{SaleError, SaleOperation};
use crate::models::sale::{NewSale, Sale};

/// Insert a new sale. A repeated `transaction_id` fails with `SaleError::Duplicate`.
pub async fn create_sale(db: &DatabaseConnection, sale: NewSale) -> Result<sales::Model, SaleError> {
    let items = serde_json::to_string(&sale.items)
        .map_err(|e| SaleError::storage(SaleOperation::Create)(DbErr::Json(e.to_string())))?;

    let new_sale = sales::ActiveModel {
        transaction_id: Set(sale.transaction_id),
        timestamp: Set(sale.timestamp),
        items: Set(items),
        total_amount: Set(sale.total_amount),
        payment_received: Set(sale.payment_received),
        change_amount: Set(sale.change_amount),
        debt_amount: Set(sale.debt_amount),
        status: Set(sale.status),
        ..Default::default()
    };

    new_sale.insert(db).await.map_err(SaleError::from_insert)
}

/// All sales, newest (highest id) first, with items decoded.
pub async fn list_sales(db: &DatabaseConnection) -> Result<Vec<Sale>, SaleError> {
    let rows = Sales::find()
        .order_by_desc(sales::Column::Id)
        .all(db)
        .await
        .map_err(SaleError::storage(SaleOperation::List))?;

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            Sale::try_from(row).map_err(|e| {
                SaleError::storage(SaleOperation::List)(DbErr::Json(format!(
                    "sale {} has undecodable items: {}",
                    id, e
                )))
            })
        })
        .collect()
}

/// Delete the sale with this transaction id.
pub async fn delete_sale(db: &DatabaseConnection, transaction_id: &str) -> Result<(), SaleError> {
    let result = Sales::delete_many()
        .filter(sales::Column::TransactionId.eq(transaction_id))
        .exec(db)
        .await
        .map_err(SaleError::storage(SaleOperation::Delete))?;

    if result.rows_affected == 0 {
        return Err(SaleError::NotFound);
    }

    Ok(())
}

/// Delete every sale, returning how many rows were removed.
pub async fn delete_all_sales(db: &DatabaseConnection) -> Result<u64, SaleError> {
    let result = Sales::delete_many()
        .exec(db)
        .await
        .map_err(SaleError::storage(SaleOperation::DeleteAll))?;

    Ok(result.rows_affected)
}
