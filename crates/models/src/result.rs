use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::OnConflict, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Upper bound on `origin` and `label`, in characters.
pub const MAX_KEY_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub origin: String,
    pub label: String,
    #[sea_orm(column_type = "Double")]
    pub value: f64,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn validate_key(field: &str, v: &str) -> Result<(), ModelError> {
    if v.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if v.chars().count() > MAX_KEY_LEN {
        return Err(ModelError::Validation(format!("{field} must be at most {MAX_KEY_LEN} characters")));
    }
    Ok(())
}

pub fn validate_origin(origin: &str) -> Result<(), ModelError> { validate_key("origin", origin) }

pub fn validate_label(label: &str) -> Result<(), ModelError> { validate_key("label", label) }

pub async fn find_by_natural_key<C: ConnectionTrait>(
    db: &C,
    origin: &str,
    label: &str,
) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Origin.eq(origin))
        .filter(Column::Label.eq(label))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a row for (origin, label), or overwrite `value` and `last_updated`
/// of the row already holding that pair, in a single statement.
///
/// Relies on the unique index over (origin, label).
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    origin: &str,
    label: &str,
    value: f64,
) -> Result<Model, ModelError> {
    validate_origin(origin)?;
    validate_label(label)?;

    let am = ActiveModel {
        origin: Set(origin.to_string()),
        label: Set(label.to_string()),
        value: Set(value),
        last_updated: Set(Utc::now()),
        ..Default::default()
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::Origin, Column::Label])
                .update_columns([Column::Value, Column::LastUpdated])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    find_by_natural_key(db, origin, label)
        .await?
        .ok_or_else(|| ModelError::Db(format!("row for ({origin}, {label}) missing after upsert")))
}
