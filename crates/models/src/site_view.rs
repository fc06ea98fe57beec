use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Primary key of the one and only counter row.
pub const GLOBAL_COUNTER_ID: &str = "global_counter";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_views")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Add one to the counter, creating it at 1, and return the new value.
///
/// The upsert is a single statement; the read-back shares its transaction so
/// the caller sees its own increment even under concurrent writers.
pub async fn increment(db: &DatabaseConnection) -> Result<i64, ModelError> {
    let txn = db.begin().await.map_err(|e| ModelError::Db(e.to_string()))?;
    let am = ActiveModel {
        id: Set(GLOBAL_COUNTER_ID.to_string()),
        count: Set(1),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .value(Column::Count, Expr::col(Column::Count).add(1))
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    let row = Entity::find_by_id(GLOBAL_COUNTER_ID)
        .one(&txn)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ModelError::Db(e.to_string()))?;
    row.map(|m| m.count)
        .ok_or_else(|| ModelError::Db("counter row missing after upsert".into()))
}

/// Current value, `None` when the counter was never written.
pub async fn current(db: &DatabaseConnection) -> Result<Option<i64>, ModelError> {
    let row = Entity::find_by_id(GLOBAL_COUNTER_ID)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(row.map(|m| m.count))
}

/// Overwrite the counter, creating it if needed.
pub async fn set_count(db: &DatabaseConnection, count: i64) -> Result<(), ModelError> {
    if count < 0 {
        return Err(ModelError::Validation("count must not be negative".into()));
    }
    let am = ActiveModel {
        id: Set(GLOBAL_COUNTER_ID.to_string()),
        count: Set(count),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_column(Column::Count)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
