use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, ColumnTrait};
use models::result::{self, Entity as ResultEntity};
use crate::errors::ServiceError;
use crate::pagination::Window;

/// Whether an upsert created the row or refreshed an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// Insert or refresh the row keyed by (origin, label).
///
/// The write is a single conflict-resolving statement. It must not run inside
/// a transaction that reads first: SQLite cannot upgrade such a transaction to
/// a writer under contention and fails with `SQLITE_BUSY`. The lookup before
/// it only classifies the outcome and may report `Inserted` for both sides of
/// a race.
pub async fn upsert_result(
    db: &DatabaseConnection,
    origin: &str,
    label: &str,
    value: f64,
) -> Result<(result::Model, UpsertOutcome), ServiceError> {
    let existed = result::find_by_natural_key(db, origin, label).await?.is_some();
    let row = result::upsert(db, origin, label, value).await?;
    let outcome = if existed { UpsertOutcome::Updated } else { UpsertOutcome::Inserted };
    Ok((row, outcome))
}

/// List results inside the window, ordered by origin then id.
pub async fn list_results(db: &DatabaseConnection, window: &Window) -> Result<Vec<result::Model>, ServiceError> {
    let mut finder = ResultEntity::find();
    if let Some(label) = &window.label { finder = finder.filter(result::Column::Label.eq(label.as_str())); }
    let rows = finder
        .filter(result::Column::LastUpdated.gte(window.cutoff))
        .order_by_asc(result::Column::Origin)
        .order_by_asc(result::Column::Id)
        .offset(window.offset)
        .limit(window.limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// Get a result by id.
pub async fn get_result(db: &DatabaseConnection, id: i32) -> Result<Option<result::Model>, ServiceError> {
    Ok(ResultEntity::find_by_id(id).one(db).await?)
}

/// Delete a result; returns true if deleted.
pub async fn delete_result(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = ResultEntity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
