//! Tests for the retreat catalogue service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockRetreatRepository;
use crate::domain::{ErrorCode, RetreatDraft, RetreatId};

fn make_service(repo: MockRetreatRepository) -> RetreatCatalogueService<MockRetreatRepository> {
    RetreatCatalogueService::new(Arc::new(repo))
}

fn new_retreat() -> NewRetreat {
    NewRetreat::new(RetreatDraft {
        title: "Silent Forest".into(),
        description: "Five days without screens".into(),
        location: "Black Forest".into(),
        price: 640.0,
        duration: 5,
        capacity: 12,
    })
    .expect("valid retreat")
}

#[tokio::test]
async fn create_returns_record_with_assigned_id() {
    let mut repo = MockRetreatRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|retreat| Ok(retreat.clone().into_retreat(RetreatId::new(7))));

    let created = make_service(repo)
        .create_retreat(new_retreat())
        .await
        .expect("retreat created");

    assert_eq!(created.id, RetreatId::new(7));
    assert_eq!(created.title, "Silent Forest");
    assert_eq!(created.capacity, 12);
}

#[tokio::test]
async fn create_maps_store_failure_to_internal_error_with_details() {
    let mut repo = MockRetreatRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(RetreatRepositoryError::query("value too long")));

    let err = make_service(repo)
        .create_retreat(new_retreat())
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), CREATE_RETREAT_FAILED);
    let details = err.details().and_then(Value::as_str).expect("details string");
    assert!(details.contains("value too long"));
}

#[tokio::test]
async fn list_forwards_filter_and_page() {
    let mut repo = MockRetreatRepository::new();
    repo.expect_search()
        .withf(|filter, page| filter.search_terms() == ["yoga"] && page.page() == 2)
        .times(1)
        .return_once(|_, page| Ok(Page::new(Vec::new(), 11, page)));

    let filter = RetreatFilter::default().with_search("yoga");
    let page = PageRequest::new(2, 10).expect("valid page");
    let result = make_service(repo)
        .list_retreats(&filter, page)
        .await
        .expect("listing succeeds");

    assert!(result.items().is_empty());
    assert_eq!(result.meta().total, 11);
    assert_eq!(result.meta().prev, Some(1));
}

#[tokio::test]
async fn list_maps_connection_failure_to_internal_error() {
    let mut repo = MockRetreatRepository::new();
    repo.expect_search()
        .return_once(|_, _| Err(RetreatRepositoryError::connection("pool timed out")));

    let err = make_service(repo)
        .list_retreats(&RetreatFilter::default(), PageRequest::default())
        .await
        .expect_err("connection failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), LIST_RETREATS_FAILED);
}
