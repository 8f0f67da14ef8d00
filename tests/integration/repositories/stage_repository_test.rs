// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashSet;
use uuid::Uuid;

use super::super::helpers::TestFrontier;
use url_admission::domain::models::candidate::{AdmissionDecision, Candidate, RejectReason};
use url_admission::domain::repositories::frontier_repository::{
    AcceptSink, DuplicateCorpus, PendingSource, RejectSink, SnapshotCursor,
};
use url_admission::infrastructure::database::entities::crawl_url;

#[tokio::test]
async fn test_next_batch_orders_by_url_descending() {
    let frontier = TestFrontier::new().await;
    for url in ["http://b.test/", "http://c.test/", "http://a.test/"] {
        frontier.pending.enqueue(url).await.unwrap();
    }

    let batch = frontier.pending.next_batch(None, 10).await.unwrap();
    let urls: Vec<&str> = batch.iter().map(|c| c.url()).collect();

    assert_eq!(urls, vec!["http://c.test/", "http://b.test/", "http://a.test/"]);
    assert!(batch.iter().all(|c| c.domain().is_none()));
}

/// 测试键集分页
///
/// 每页两条，重复URL跨页时也只访问一次
#[tokio::test]
async fn test_next_batch_keyset_visits_every_row_once() {
    let frontier = TestFrontier::new().await;
    let urls = [
        "http://a.test/",
        "http://b.test/",
        "http://b.test/",
        "http://b.test/",
        "http://c.test/",
    ];
    for url in urls {
        frontier.pending.enqueue(url).await.unwrap();
    }

    let mut seen = HashSet::new();
    let mut visited = Vec::new();
    let mut cursor: Option<SnapshotCursor> = None;
    loop {
        let batch = frontier
            .pending
            .next_batch(cursor.as_ref(), 2)
            .await
            .unwrap();
        if batch.is_empty() {
            break;
        }
        for candidate in &batch {
            assert!(seen.insert(candidate.id), "row visited twice");
            visited.push(candidate.url().to_string());
        }
        cursor = batch.last().map(SnapshotCursor::after);
    }

    assert_eq!(
        visited,
        vec![
            "http://c.test/",
            "http://b.test/",
            "http://b.test/",
            "http://b.test/",
            "http://a.test/",
        ]
    );
}

#[tokio::test]
async fn test_next_batch_after_cursor_survives_concurrent_deletes() {
    let frontier = TestFrontier::new().await;
    for url in ["http://a.test/", "http://b.test/", "http://c.test/", "http://d.test/"] {
        frontier.pending.enqueue(url).await.unwrap();
    }

    let first = frontier.pending.next_batch(None, 2).await.unwrap();
    // claiming the first page must not shift the second
    for candidate in &first {
        assert!(frontier.pending.claim(candidate).await.unwrap());
    }
    let cursor = SnapshotCursor::after(first.last().unwrap());
    let second = frontier.pending.next_batch(Some(&cursor), 2).await.unwrap();

    let urls: Vec<&str> = second.iter().map(|c| c.url()).collect();
    assert_eq!(urls, vec!["http://b.test/", "http://a.test/"]);
}

#[tokio::test]
async fn test_claim_succeeds_once() {
    let frontier = TestFrontier::new().await;
    let candidate = frontier.pending.enqueue("http://a.test/").await.unwrap();

    assert!(frontier.pending.claim(&candidate).await.unwrap());
    assert!(!frontier.pending.claim(&candidate).await.unwrap());
    assert_eq!(frontier.pending.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_claim_is_scoped_to_stage() {
    let frontier = TestFrontier::new().await;
    let candidate = frontier.done.enqueue("http://a.test/").await.unwrap();

    assert!(!frontier.pending.claim(&candidate).await.unwrap());
    assert_eq!(frontier.done.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_exists_is_exact_and_stage_scoped() {
    let frontier = TestFrontier::new().await;
    frontier.done.enqueue("http://a.test/page").await.unwrap();

    assert!(frontier.done.exists("http://a.test/page").await.unwrap());
    assert!(!frontier.done.exists("http://a.test/page/").await.unwrap());
    assert!(!frontier.done.exists("HTTP://a.test/page").await.unwrap());
    assert!(!frontier.queue.exists("http://a.test/page").await.unwrap());
    assert_eq!(frontier.done.name(), "done");
}

#[tokio::test]
async fn test_reject_sink_records_reason() {
    let frontier = TestFrontier::new().await;
    let original = frontier.pending.enqueue("ftp://a.test/").await.unwrap();

    let mut candidate = original.clone();
    candidate
        .finalize(
            AdmissionDecision::Reject(RejectReason::InvalidUrl),
            Utc::now(),
        )
        .unwrap();
    RejectSink::append(frontier.rejects.as_ref(), &candidate)
        .await
        .unwrap();

    let rows = crawl_url::Entity::find()
        .filter(crawl_url::Column::Stage.eq("rejects"))
        .all(frontier.db.as_ref())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.url, "ftp://a.test/");
    assert_eq!(row.status.as_deref(), Some("REJECTED"));
    assert_eq!(row.reject_reason.as_deref(), Some("INVALID_URL"));
    assert!(row.processed_at.is_some());
    assert_ne!(row.id, original.id);
}

#[tokio::test]
async fn test_accept_sink_records_domain() {
    let frontier = TestFrontier::new().await;
    let mut candidate = Candidate::pending(
        Uuid::new_v4(),
        "http://www.example.co.uk/a",
        Some("example.co.uk".to_string()),
    );
    candidate
        .finalize(AdmissionDecision::Accept, Utc::now())
        .unwrap();

    AcceptSink::append(frontier.big_queue.as_ref(), &candidate)
        .await
        .unwrap();

    assert!(frontier
        .big_queue
        .exists("http://www.example.co.uk/a")
        .await
        .unwrap());
    let row = crawl_url::Entity::find()
        .filter(crawl_url::Column::Stage.eq("big_queue"))
        .one(frontier.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.domain.as_deref(), Some("example.co.uk"));
    assert_eq!(row.status.as_deref(), Some("QUEUED"));
    assert!(row.reject_reason.is_none());
}
