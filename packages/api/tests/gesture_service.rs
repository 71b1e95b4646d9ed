mod common;

use chrono::{TimeZone, Utc};
use common::{StubClassifier, hand, memory_db, one_hand, result, service_with};
use signlearn_api::{
    entity::gesture_record,
    gesture::{
        GestureError, GestureInput, GestureService, NewPrediction, PredictionFailure,
        PredictionResult, PredictionStatus, PredictionStore, RECENT_WINDOW,
    },
    sea_orm::{ActiveModelTrait, ConnectionTrait, Set},
};

async fn seed(service: &GestureService, entries: &[(&str, f64)]) -> Vec<i32> {
    let mut ids = Vec::new();
    for (i, (label, confidence)) in entries.iter().enumerate() {
        let record = service
            .store()
            .insert(NewPrediction {
                predicted_class: i as u32,
                confidence: *confidence,
                label: label.to_string(),
                landmark_data: one_hand().to_landmark_data().unwrap(),
            })
            .await
            .unwrap();
        ids.push(record.id);
    }
    ids
}

#[tokio::test]
async fn test_predict_returns_result_and_persists_it() {
    let expected = result(3, 0.92, "감사합니다");
    let classifier = StubClassifier::answering(expected.clone());
    let service = service_with(classifier.clone()).await;

    let returned = service.predict(&one_hand()).await.unwrap();
    assert_eq!(returned, expected);
    assert_eq!(classifier.calls(), 1);

    let recent = service.recent(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].label, "감사합니다");
    assert_eq!(recent[0].predicted_class, 3);
    assert_eq!(recent[0].confidence, 0.92);

    let recent = service.recent(10).await.unwrap();
    assert!(recent.iter().any(|p| p.label == "감사합니다" && p.confidence == 0.92));
}

#[tokio::test]
async fn test_every_predict_calls_classifier() {
    let classifier = StubClassifier::answering(result(1, 0.8, "안녕하세요"));
    let service = service_with(classifier.clone()).await;
    let input = one_hand();

    service.predict(&input).await.unwrap();
    service.predict(&input).await.unwrap();

    assert_eq!(classifier.calls(), 2);
    assert_eq!(service.store().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_classifier_failure_persists_nothing() {
    let service = service_with(StubClassifier::failing()).await;
    seed(&service, &[("안녕하세요", 0.8)]).await;
    let before = service.store().count().await.unwrap();

    let err = service.predict(&one_hand()).await.unwrap_err();
    assert!(matches!(
        err,
        GestureError::PredictionFailed(PredictionFailure::Inference(_))
    ));

    assert_eq!(service.store().count().await.unwrap(), before);
}

#[tokio::test]
async fn test_no_hand_detected_is_still_recorded() {
    let no_hand = PredictionResult {
        status: PredictionStatus::NoHandDetected,
        predicted_class: 0,
        confidence: 0.0,
        probabilities: vec![],
        label: String::new(),
    };
    let service = service_with(StubClassifier::answering(no_hand.clone())).await;

    let returned = service.predict(&GestureInput::default()).await.unwrap();
    assert_eq!(returned.status, PredictionStatus::NoHandDetected);

    let recent = service.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].confidence, 0.0);

    let stored = service.get(recent[0].id).await.unwrap();
    assert!(stored.landmarks.is_empty());
}

#[tokio::test]
async fn test_invalid_shape_never_reaches_classifier() {
    let classifier = StubClassifier::answering(result(1, 0.5, "x"));
    let service = service_with(classifier.clone()).await;

    let mut short = hand(0.0);
    short.0.truncate(5);
    let err = service
        .predict(&GestureInput::new(vec![short]))
        .await
        .unwrap_err();

    assert!(matches!(err, GestureError::InvalidInput(_)));
    assert_eq!(classifier.calls(), 0);
    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unencodable_landmarks_fail_without_write() {
    let classifier = StubClassifier::answering(result(1, 0.5, "x"));
    let service = service_with(classifier.clone()).await;

    let mut points = hand(0.0);
    points.0[3].x = f64::INFINITY;
    let err = service
        .predict(&GestureInput::new(vec![points]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GestureError::PredictionFailed(PredictionFailure::Encoding(_))
    ));
    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_out_of_range_confidence_is_passed_through() {
    let service = service_with(StubClassifier::answering(result(2, 1.5, "이상"))).await;

    service.predict(&one_hand()).await.unwrap();
    assert_eq!(service.recent(1).await.unwrap()[0].confidence, 1.5);
}

#[tokio::test]
async fn test_recent_is_newest_first_and_capped() {
    let service = service_with(StubClassifier::failing()).await;
    let ids = seed(&service, &[("a", 0.1), ("b", 0.2), ("c", 0.3)]).await;

    let recent = service.recent(10).await.unwrap();
    let labels: Vec<_> = recent.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["c", "b", "a"]);
    assert_eq!(recent[0].id, ids[2]);

    let recent = service.recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].label, "c");

    assert!(service.recent(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recent_limit_beyond_window() {
    let service = service_with(StubClassifier::failing()).await;
    let entries: Vec<(String, f64)> = (0..12).map(|i| (format!("g{}", i), 0.5)).collect();
    let entries: Vec<(&str, f64)> = entries.iter().map(|(l, c)| (l.as_str(), *c)).collect();
    seed(&service, &entries).await;

    let recent = service.recent(50).await.unwrap();
    assert_eq!(recent.len() as u64, RECENT_WINDOW);
    assert_eq!(recent[0].label, "g11");
    assert_eq!(recent[9].label, "g2");
}

#[tokio::test]
async fn test_by_min_confidence_is_strict() {
    let service = service_with(StubClassifier::failing()).await;
    seed(&service, &[("low", 0.5), ("edge", 0.7), ("high", 0.9)]).await;

    let above = service.by_min_confidence(0.7).await.unwrap();
    assert_eq!(above.len(), 1);
    assert_eq!(above[0].label, "high");

    let all = service.by_min_confidence(0.0).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(service.by_min_confidence(0.9).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_by_label_is_exact_and_case_sensitive() {
    let service = service_with(StubClassifier::failing()).await;
    seed(
        &service,
        &[("Hello", 0.5), ("hello", 0.6), ("Hello", 0.7), ("Hello there", 0.8)],
    )
    .await;

    let matches = service.by_label("Hello").await.unwrap();
    let confidences: Vec<_> = matches.iter().map(|p| p.confidence).collect();
    assert_eq!(confidences, [0.5, 0.7]);

    assert!(service.by_label("HELLO").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_and_repeated() {
    let service = service_with(StubClassifier::failing()).await;
    let ids = seed(&service, &[("a", 0.4), ("b", 0.6)]).await;

    assert!(matches!(
        service.delete(9999).await,
        Err(GestureError::NotFound(9999))
    ));

    service.delete(ids[0]).await.unwrap();
    assert!(matches!(
        service.delete(ids[0]).await,
        Err(GestureError::NotFound(id)) if id == ids[0]
    ));

    let remaining = service.recent(10).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ids[1]);
}

#[tokio::test]
async fn test_get_replays_stored_landmarks() {
    let service = service_with(StubClassifier::answering(result(4, 0.66, "사랑합니다"))).await;
    let input = GestureInput::new(vec![hand(0.0), hand(-0.2)]);

    service.predict(&input).await.unwrap();
    let id = service.recent(1).await.unwrap()[0].id;

    let record = service.get(id).await.unwrap();
    assert_eq!(record.landmarks, input.landmarks);
    assert_eq!(record.predicted_class, 4);

    assert!(matches!(
        service.get(id + 100).await,
        Err(GestureError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_long_labels_are_truncated() {
    let label = "수".repeat(80);
    let service = service_with(StubClassifier::answering(result(1, 0.9, &label))).await;

    let returned = service.predict(&one_hand()).await.unwrap();
    assert_eq!(returned.label, label);

    let stored = &service.recent(1).await.unwrap()[0];
    assert_eq!(stored.label.chars().count(), 50);
}

#[tokio::test]
async fn test_created_at_never_decreases() {
    let service = service_with(StubClassifier::failing()).await;
    seed(&service, &[("a", 0.1), ("b", 0.1), ("c", 0.1), ("d", 0.1)]).await;

    let mut previous = None;
    for id in service.by_min_confidence(0.0).await.unwrap().iter().map(|p| p.id) {
        let created_at = service.get(id).await.unwrap().created_at;
        if let Some(previous) = previous {
            assert!(created_at >= previous);
        }
        previous = Some(created_at);
    }
}

#[tokio::test]
async fn test_reopened_store_stays_after_existing_rows() {
    let db = memory_db().await;
    let future = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
    let existing = gesture_record::ActiveModel {
        predicted_class: Set(7),
        confidence: Set(0.5),
        gesture_label: Set("earlier".to_string()),
        landmark_data: Set("[]".to_string()),
        created_at: Set(future),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    let store = PredictionStore::open(db).await.unwrap();
    let service = GestureService::new(store, StubClassifier::answering(result(1, 0.9, "later")));
    service.predict(&one_hand()).await.unwrap();

    let recent = service.recent(10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].label, "later");
    assert_eq!(recent[1].id, existing.id);
    assert!(service.get(recent[0].id).await.unwrap().created_at >= future);
}

#[tokio::test]
async fn test_store_errors_surface_as_persistence_failed() {
    let classifier = StubClassifier::answering(result(1, 0.9, "x"));
    let service = service_with(classifier.clone()).await;
    service
        .store()
        .db()
        .execute_unprepared("DROP TABLE gesture_records")
        .await
        .unwrap();

    assert!(matches!(
        service.recent(5).await,
        Err(GestureError::PersistenceFailed(_))
    ));
    assert!(matches!(
        service.by_label("x").await,
        Err(GestureError::PersistenceFailed(_))
    ));
    assert!(matches!(
        service.delete(1).await,
        Err(GestureError::PersistenceFailed(_))
    ));
    assert!(matches!(
        service.predict(&one_hand()).await,
        Err(GestureError::PersistenceFailed(_))
    ));
    assert_eq!(classifier.calls(), 1);
}
