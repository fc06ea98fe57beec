use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Key of the locker feature flag.
pub const LOCKER_KEY: &str = "locker";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn get_enabled(db: &DatabaseConnection, key: &str) -> Result<Option<bool>, ModelError> {
    let row = Entity::find_by_id(key)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(row.map(|m| m.enabled))
}

pub async fn set_enabled(db: &DatabaseConnection, key: &str, enabled: bool) -> Result<(), ModelError> {
    if key.trim().is_empty() {
        return Err(ModelError::Validation("setting key required".into()));
    }
    let am = ActiveModel {
        key: Set(key.to_string()),
        enabled: Set(enabled),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_column(Column::Enabled)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
