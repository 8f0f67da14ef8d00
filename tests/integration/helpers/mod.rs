// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use url_admission::config::settings::DatabaseSettings;
use url_admission::domain::repositories::frontier_repository::{
    AcceptSink, DuplicateCorpus, FrontierStage, PendingSource, RejectSink,
};
use url_admission::domain::services::validation_service::ValidationService;
use url_admission::infrastructure::cache::dns_cache::DnsCache;
use url_admission::infrastructure::database::connection;
use url_admission::infrastructure::dns::resolver::DnsLookup;
use url_admission::infrastructure::repositories::stage_repo_impl::StageRepositoryImpl;
use url_admission::presentation::routes;
use url_admission::workers::admission_worker::{AdmissionConfig, AdmissionWorker};

/// 测试用解析器
///
/// 主机名以 `unresolvable.test` 结尾时解析失败，以 `wildcard.test`
/// 结尾时返回 0.0.0.0，其余返回回环地址。
#[derive(Default)]
pub struct StaticResolver {
    pub calls: AtomicUsize,
}

impl StaticResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsLookup for StaticResolver {
    async fn lookup(&self, hostname: &str) -> io::Result<Vec<IpAddr>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if hostname.ends_with("unresolvable.test") {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such host"))
        } else if hostname.ends_with("wildcard.test") {
            Ok(vec![IpAddr::V4(Ipv4Addr::UNSPECIFIED)])
        } else {
            Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
        }
    }
}

/// 创建已迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    Arc::new(
        connection::connect_and_migrate(&settings)
            .await
            .expect("Failed to set up test database"),
    )
}

/// 绑定到同一数据库的各前沿阶段
#[allow(dead_code)]
pub struct TestFrontier {
    pub db: Arc<DatabaseConnection>,
    pub pending: Arc<StageRepositoryImpl>,
    pub big_queue: Arc<StageRepositoryImpl>,
    pub queue: Arc<StageRepositoryImpl>,
    pub done: Arc<StageRepositoryImpl>,
    pub out: Arc<StageRepositoryImpl>,
    pub rejects: Arc<StageRepositoryImpl>,
    pub resolver: Arc<StaticResolver>,
    pub dns_cache: Arc<DnsCache>,
}

impl TestFrontier {
    pub async fn new() -> Self {
        let db = setup_db().await;
        let stage = |stage| Arc::new(StageRepositoryImpl::new(db.clone(), stage));
        let resolver = Arc::new(StaticResolver::default());
        let dns_cache = Arc::new(DnsCache::new(resolver.clone(), 8));

        Self {
            pending: stage(FrontierStage::Pending),
            big_queue: stage(FrontierStage::BigQueue),
            queue: stage(FrontierStage::Queue),
            done: stage(FrontierStage::Done),
            out: stage(FrontierStage::Out),
            rejects: stage(FrontierStage::Rejects),
            db,
            resolver,
            dns_cache,
        }
    }

    /// 构造读写本前沿的准入循环
    pub fn admission_worker(&self, config: AdmissionConfig) -> AdmissionWorker {
        let corpora: Vec<Arc<dyn DuplicateCorpus>> = vec![
            self.big_queue.clone(),
            self.queue.clone(),
            self.done.clone(),
            self.out.clone(),
        ];
        let validator = Arc::new(ValidationService::new(corpora, self.dns_cache.clone()));

        let pending: Arc<dyn PendingSource> = self.pending.clone();
        let rejects: Arc<dyn RejectSink> = self.rejects.clone();
        let big_queue: Arc<dyn AcceptSink> = self.big_queue.clone();
        AdmissionWorker::new(pending, validator, rejects, big_queue, config)
    }

    /// 创建挂载本前沿的测试服务器
    pub fn server(&self) -> TestServer {
        let pending: Arc<dyn PendingSource> = self.pending.clone();
        TestServer::new(routes::routes(pending, self.dns_cache.clone()))
            .expect("Failed to create test server")
    }
}
