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

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use url_admission::config::settings::Settings;
use url_admission::domain::repositories::frontier_repository::{
    AcceptSink, DuplicateCorpus, FrontierStage, PendingSource, RejectSink,
};
use url_admission::domain::services::validation_service::ValidationService;
use url_admission::infrastructure::cache::dns_cache::DnsCache;
use url_admission::infrastructure::database::connection;
use url_admission::infrastructure::dns::resolver::SystemResolver;
use url_admission::infrastructure::metrics;
use url_admission::infrastructure::repositories::stage_repo_impl::StageRepositoryImpl;
use url_admission::presentation::routes;
use url_admission::utils::telemetry;
use url_admission::workers::admission_worker::{AdmissionConfig, AdmissionWorker};
use url_admission::workers::manager::WorkerManager;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动准入循环和HTTP服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration; logging format comes from it
    let settings = Settings::new()?;
    telemetry::init_telemetry(settings.logging.format);
    info!("Starting url-admission...");

    // 2. Prometheus exporter
    metrics::init_metrics(&settings.metrics);

    // 3. Database
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Frontier stages
    let pending: Arc<dyn PendingSource> =
        Arc::new(StageRepositoryImpl::new(db.clone(), FrontierStage::Pending));
    let rejects: Arc<dyn RejectSink> =
        Arc::new(StageRepositoryImpl::new(db.clone(), FrontierStage::Rejects));
    let big_queue: Arc<dyn AcceptSink> =
        Arc::new(StageRepositoryImpl::new(db.clone(), FrontierStage::BigQueue));
    let corpora: Vec<Arc<dyn DuplicateCorpus>> = FrontierStage::DUPLICATE_CORPORA
        .iter()
        .map(|stage| {
            Arc::new(StageRepositoryImpl::new(db.clone(), *stage)) as Arc<dyn DuplicateCorpus>
        })
        .collect();

    // 5. Validation
    let dns_cache = Arc::new(DnsCache::new(
        Arc::new(SystemResolver),
        settings.dns.max_concurrent_lookups,
    ));
    let validator = Arc::new(ValidationService::new(corpora, dns_cache.clone()));

    // 6. Admission loop
    let worker = AdmissionWorker::new(
        pending.clone(),
        validator,
        rejects,
        big_queue,
        AdmissionConfig::from(&settings.admission),
    );
    let mut worker_manager = WorkerManager::new();
    worker_manager.start(Arc::new(worker));

    // 7. Intake API
    let app = routes::routes(pending, dns_cache);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    worker_manager.wait_for_shutdown().await;
    server.abort();

    Ok(())
}
