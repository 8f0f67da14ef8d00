// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::util::ServiceExt;

use super::helpers::{setup_db, StaticResolver};
use url_admission::domain::repositories::frontier_repository::{FrontierStage, PendingSource};
use url_admission::infrastructure::cache::dns_cache::DnsCache;
use url_admission::infrastructure::repositories::stage_repo_impl::StageRepositoryImpl;
use url_admission::presentation::routes;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let db = setup_db().await;
    let pending: Arc<dyn PendingSource> =
        Arc::new(StageRepositoryImpl::new(db, FrontierStage::Pending));
    let dns_cache = Arc::new(DnsCache::new(Arc::new(StaticResolver::default()), 1));
    let app = routes::routes(pending, dns_cache);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
