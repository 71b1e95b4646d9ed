pub mod gesture_record;

use sea_orm::{ConnectionTrait, DbErr, Schema};

/// Creates the tables this service owns when they do not exist yet.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut gesture_records = schema.create_table_from_entity(gesture_record::Entity);
    gesture_records.if_not_exists();
    db.execute(backend.build(&gesture_records)).await?;

    tracing::debug!("Schema ready ({:?})", backend);
    Ok(())
}
