use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;

use doctor_cell::models::{
    ConsultationType, Doctor, DoctorError, FilterCriteria, RatingBucket, SortStrategy,
};
use doctor_cell::services::{DoctorRanker, DoctorSearchService};

use super::StaticDirectory;

fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "d-100".into(),
            name: "Dr. Farah Khan".into(),
            specialization: "Neurology".into(),
            average_rating: Some(4.9.into()),
            total_appointments: 80.0.into(),
            consultation_modes: Some(vec!["video".into()]),
            ..Default::default()
        },
        Doctor {
            id: "d-200".into(),
            name: "Dr. Sunil Verma".into(),
            specialization: "Neurology".into(),
            rating: Some(4.6.into()),
            total_appointments: 510.0.into(),
            total_reviews: 40.0.into(),
            ..Default::default()
        },
        Doctor {
            id: "d-300".into(),
            name: "Dr. Leela Menon".into(),
            specialization: "Orthopedics".into(),
            rating: Some(3.8.into()),
            ..Default::default()
        },
    ]
}

fn service(directory: StaticDirectory) -> DoctorSearchService {
    DoctorSearchService::new(Arc::new(directory), DoctorRanker::default())
}

#[tokio::test]
async fn test_search_filters_then_ranks() {
    let service = service(StaticDirectory(Ok(doctors())));
    let criteria = FilterCriteria {
        specialization: Some("neurology".into()),
        rating: RatingBucket::FourHalfPlus,
        ..Default::default()
    };

    let by_rating = service.search(&criteria, SortStrategy::Rating).await;
    let ids: Vec<_> = by_rating.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d-100", "d-200"]);

    let by_best = service.search(&criteria, SortStrategy::Best).await;
    let ids: Vec<_> = by_best.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d-200", "d-100"]);
}

#[tokio::test]
async fn test_search_mode_facet() {
    let service = service(StaticDirectory(Ok(doctors())));
    let criteria = FilterCriteria {
        modes: HashSet::from([ConsultationType::Physical]),
        ..Default::default()
    };

    let result = service.search(&criteria, SortStrategy::Best).await;
    assert!(result.iter().all(|d| d.id != "d-100"));
    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_search_directory_failure_is_empty() {
    let service = service(StaticDirectory(Err("firestore unavailable")));

    let result = service.search(&FilterCriteria::default(), SortStrategy::Best).await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_get_doctor_errors() {
    let found = service(StaticDirectory(Ok(doctors())));
    assert_eq!(found.get_doctor("d-300").await.unwrap().name, "Dr. Leela Menon");
    assert_matches!(found.get_doctor("nobody").await, Err(DoctorError::NotFound));

    let broken = service(StaticDirectory(Err("timeout")));
    assert_matches!(broken.get_doctor("d-300").await, Err(DoctorError::DirectoryError(_)));
}
