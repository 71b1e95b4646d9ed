use utoipa::OpenApi;

use crate::gesture::{
    GestureInput, HandLandmarks, Landmark, PredictionRecordView, PredictionResult,
    PredictionStatus, PredictionSummary,
};
use crate::routes::{gesture, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SignLearn API",
        description = "Sign language gesture recognition and prediction history"
    ),
    tags(
        (name = "gesture", description = "Gesture classification and prediction history"),
        (name = "health", description = "Liveness, database and classifier checks")
    ),
    paths(
        health::health,
        health::db_health,
        health::classifier_health,
        gesture::predict::predict,
        gesture::get_recent::get_recent,
        gesture::get_by_label::get_by_label,
        gesture::get_by_confidence::get_by_confidence,
        gesture::get_record::get_record,
        gesture::delete_record::delete_record,
    ),
    components(schemas(
        Landmark,
        HandLandmarks,
        GestureInput,
        PredictionStatus,
        PredictionResult,
        PredictionSummary,
        PredictionRecordView,
        health::HealthResponse,
        health::DependencyHealth,
    ))
)]
pub struct ApiDoc;
