// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::infrastructure::dns::resolver::{is_routable, DnsLookup};

/// 一次解析的共享结果句柄
pub type DnsOutcome = Shared<BoxFuture<'static, bool>>;

/// 单飞DNS缓存
///
/// 每个主机名最多发起一次解析。首次访问时通过 `DashMap` 的 entry API
/// 原子地插入结果句柄并启动后台查询；并发或之后的调用者拿到同一个句柄。
/// 结果永久保留，进程生命周期内不会过期或重查。
///
/// 解析错误、空结果、通配地址以及查询任务异常全部折算为 `false`，
/// 调用者只会看到布尔值。
///
/// 后台查询由信号量限流，最多 `max_concurrent_lookups` 个同时进行。
pub struct DnsCache {
    entries: DashMap<String, DnsOutcome>,
    resolver: Arc<dyn DnsLookup>,
    permits: Arc<Semaphore>,
    lookups_started: AtomicU64,
}

impl DnsCache {
    pub fn new(resolver: Arc<dyn DnsLookup>, max_concurrent_lookups: usize) -> Self {
        Self {
            entries: DashMap::new(),
            resolver,
            permits: Arc::new(Semaphore::new(max_concurrent_lookups)),
            lookups_started: AtomicU64::new(0),
        }
    }

    /// 获取主机名的解析结果句柄
    ///
    /// 必须在 tokio 运行时内调用：首次访问会派生后台任务。
    pub fn resolve(&self, hostname: &str) -> DnsOutcome {
        if let Some(existing) = self.entries.get(hostname) {
            return existing.clone();
        }

        match self.entries.entry(hostname.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let outcome = self.start_lookup(hostname.to_string());
                entry.insert(outcome.clone());
                outcome
            }
        }
    }

    /// 等待主机名的解析结果
    pub async fn is_reachable(&self, hostname: &str) -> bool {
        self.resolve(hostname).await
    }

    /// 已完成解析的结果，未开始或进行中返回 `None`
    pub fn peek(&self, hostname: &str) -> Option<bool> {
        self.entries
            .get(hostname)
            .and_then(|outcome| outcome.peek().copied())
    }

    /// 已登记的主机名数量（含进行中）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 已发起的查询次数
    pub fn lookups_started(&self) -> u64 {
        self.lookups_started.load(Ordering::Relaxed)
    }

    fn start_lookup(&self, hostname: String) -> DnsOutcome {
        self.lookups_started.fetch_add(1, Ordering::Relaxed);

        let resolver = self.resolver.clone();
        let permits = self.permits.clone();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed; a missing permit only means no limit
            let _permit = permits.acquire_owned().await.ok();

            debug!(hostname = %hostname, "Querying DNS");
            let reachable = match resolver.lookup(&hostname).await {
                Ok(addrs) => is_routable(&addrs),
                Err(e) => {
                    debug!(hostname = %hostname, error = %e, "No valid DNS");
                    false
                }
            };

            let result = if reachable { "ok" } else { "failed" };
            metrics::counter!("dns_lookups_total", "result" => result).increment(1);
            reachable
        });

        handle
            .map(|joined| match joined {
                Ok(reachable) => reachable,
                Err(e) => {
                    warn!("DNS lookup task failed: {}", e);
                    false
                }
            })
            .boxed()
            .shared()
    }
}
