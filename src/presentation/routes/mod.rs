// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::repositories::frontier_repository::PendingSource;
use crate::infrastructure::cache::dns_cache::DnsCache;
use crate::presentation::handlers::candidate_handler;

/// 创建应用路由
///
/// # 参数
///
/// * `pending` - 候选URL写入的待处理来源
/// * `dns_cache` - 准入循环共用的DNS缓存
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(pending: Arc<dyn PendingSource>, dns_cache: Arc<DnsCache>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/candidates", post(candidate_handler::submit_candidates))
        .route("/v1/dns-cache", get(candidate_handler::dns_cache_stats))
        .layer(Extension(pending))
        .layer(Extension(dns_cache))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 版本信息
pub async fn version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
