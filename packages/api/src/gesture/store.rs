use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tokio::sync::Mutex;

use crate::entity::gesture_record::{self, truncate_label};

/// Most records `recent` will ever return.
pub const RECENT_WINDOW: u64 = 10;

/// Values taken from a successful classification, ready to be persisted.
#[derive(Clone, Debug)]
pub struct NewPrediction {
    pub predicted_class: u32,
    pub confidence: f64,
    pub label: String,
    pub landmark_data: String,
}

/// Append-only prediction history on top of SeaORM.
///
/// Inserts are serialized through `last_created` so `created_at` never goes
/// backwards in commit order, even if the wall clock does.
pub struct PredictionStore {
    db: DatabaseConnection,
    last_created: Mutex<DateTime<Utc>>,
}

impl PredictionStore {
    /// Store for an empty table. Use [`PredictionStore::open`] when rows may
    /// already exist.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            last_created: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Seeds the insert clock from the newest stored `created_at`, so a restart
    /// behind a clock step back cannot write rows older than existing ones.
    pub async fn open(db: DatabaseConnection) -> Result<Self, DbErr> {
        let latest = gesture_record::Entity::find()
            .order_by_desc(gesture_record::Column::CreatedAt)
            .one(&db)
            .await?
            .map(|record| record.created_at);

        if let Some(latest) = latest {
            tracing::debug!(%latest, "Prediction store resumes after existing records");
        }

        Ok(Self {
            db,
            last_created: Mutex::new(latest.unwrap_or(DateTime::<Utc>::MIN_UTC)),
        })
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert(&self, prediction: NewPrediction) -> Result<gesture_record::Model, DbErr> {
        let mut last_created = self.last_created.lock().await;
        // Postgres keeps microseconds; truncate so stored and returned values agree.
        let created_at = Utc::now().trunc_subsecs(6).max(*last_created);

        let record = gesture_record::ActiveModel {
            predicted_class: Set(i64::from(prediction.predicted_class)),
            confidence: Set(prediction.confidence),
            gesture_label: Set(truncate_label(&prediction.label)),
            landmark_data: Set(prediction.landmark_data),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        *last_created = created_at;
        Ok(record)
    }

    /// Newest first. `limit` is capped at [`RECENT_WINDOW`].
    pub async fn recent(&self, limit: u64) -> Result<Vec<gesture_record::Model>, DbErr> {
        gesture_record::Entity::find()
            .order_by_desc(gesture_record::Column::CreatedAt)
            .order_by_desc(gesture_record::Column::Id)
            .limit(limit.min(RECENT_WINDOW))
            .all(&self.db)
            .await
    }

    pub async fn by_label(&self, label: &str) -> Result<Vec<gesture_record::Model>, DbErr> {
        gesture_record::Entity::find()
            .filter(gesture_record::Column::GestureLabel.eq(label))
            .order_by_asc(gesture_record::Column::Id)
            .all(&self.db)
            .await
    }

    /// Strictly greater than `threshold`.
    pub async fn by_min_confidence(
        &self,
        threshold: f64,
    ) -> Result<Vec<gesture_record::Model>, DbErr> {
        gesture_record::Entity::find()
            .filter(gesture_record::Column::Confidence.gt(threshold))
            .order_by_asc(gesture_record::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn find(&self, id: i32) -> Result<Option<gesture_record::Model>, DbErr> {
        gesture_record::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns `false` when no record had that id.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = gesture_record::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        gesture_record::Entity::find().count(&self.db).await
    }
}
