use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, NotSet, QueryFilter, Set};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// One catalog item. Every attribute is stored verbatim and may be NULL.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apps_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub color: Option<String>,
    pub img: Option<String>,
    pub desc: Option<String>,
    pub link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The eight user-supplied attributes of a catalog item.
///
/// Scalars of any JSON type are accepted and kept in their text form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub img: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

/// Text form of an arbitrary JSON value; `null` stays absent.
pub fn value_to_text(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.and_then(value_to_text))
}

impl AppFields {
    fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            category: Set(self.category),
            title: Set(self.title),
            version: Set(self.version),
            status: Set(self.status),
            color: Set(self.color),
            img: Set(self.img),
            desc: Set(self.desc),
            link: Set(self.link),
        }
    }

    fn into_model(self, id: String) -> Model {
        Model {
            id,
            category: self.category,
            title: self.title,
            version: self.version,
            status: self.status,
            color: self.color,
            img: self.img,
            desc: self.desc,
            link: self.link,
        }
    }
}

/// Every catalog item in natural table order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Insert a new item under a freshly generated id.
pub async fn create(db: &DatabaseConnection, fields: AppFields) -> Result<Model, ModelError> {
    let id = Uuid::new_v4().to_string();
    let mut am = fields.clone().into_active();
    am.id = Set(id.clone());
    Entity::insert(am)
        .exec_without_returning(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(fields.into_model(id))
}

/// Overwrite all eight attributes of `id`; returns the number of rows touched.
pub async fn replace(db: &DatabaseConnection, id: &str, fields: AppFields) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .set(fields.into_active())
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Remove `id`; returns true if a row was deleted.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
