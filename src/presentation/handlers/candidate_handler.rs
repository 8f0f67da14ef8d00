// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domain::repositories::frontier_repository::PendingSource;
use crate::infrastructure::cache::dns_cache::DnsCache;
use crate::presentation::errors::{AppError, ValidationError};

#[derive(Debug, Deserialize)]
pub struct SubmitCandidatesPayload {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitCandidatesResponse {
    pub enqueued: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DnsCacheStats {
    pub entries: usize,
    pub lookups_started: u64,
}

/// 提交候选URL
///
/// URL原样写入待处理来源，不做规范化；空白字符串会被忽略。
/// 是否可抓取由准入循环判定。
pub async fn submit_candidates(
    Extension(source): Extension<Arc<dyn PendingSource>>,
    Json(payload): Json<SubmitCandidatesPayload>,
) -> Result<(StatusCode, Json<SubmitCandidatesResponse>), AppError> {
    if payload.urls.is_empty() {
        return Err(ValidationError("urls cannot be empty".to_string()).into());
    }

    let mut enqueued = 0;
    for url in payload.urls.iter().filter(|u| !u.trim().is_empty()) {
        source.enqueue(url).await?;
        enqueued += 1;
    }

    info!("Enqueued {} candidate URLs", enqueued);
    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitCandidatesResponse { enqueued }),
    ))
}

/// DNS缓存统计
pub async fn dns_cache_stats(Extension(cache): Extension<Arc<DnsCache>>) -> Json<DnsCacheStats> {
    Json(DnsCacheStats {
        entries: cache.len(),
        lookups_started: cache.lookups_started(),
    })
}
