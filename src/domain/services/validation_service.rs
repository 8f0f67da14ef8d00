// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::candidate::{AdmissionDecision, Candidate, RejectReason};
use crate::domain::repositories::frontier_repository::{DuplicateCorpus, RepositoryError};
use crate::infrastructure::cache::dns_cache::DnsCache;
use crate::utils::url_utils;

/// 候选项校验服务
///
/// 按顺序执行三项检查，第一项失败即返回：
/// 1. 重复检查：任一下游语料中存在完全相同的URL
/// 2. 语法检查：必须是小写 `http`/`https` 协议的合法URL
/// 3. DNS检查：主机名必须能解析到可路由地址
///
/// 全部通过时接受，并在候选项缺少域名时补齐。服务本身不写任何存储。
pub struct ValidationService {
    corpora: Vec<Arc<dyn DuplicateCorpus>>,
    dns_cache: Arc<DnsCache>,
}

impl ValidationService {
    pub fn new(corpora: Vec<Arc<dyn DuplicateCorpus>>, dns_cache: Arc<DnsCache>) -> Self {
        Self { corpora, dns_cache }
    }

    /// 评估单个候选项
    ///
    /// # 返回值
    ///
    /// * `Ok(AdmissionDecision)` - 判定结果
    /// * `Err(RepositoryError)` - 查询重复语料失败
    pub async fn evaluate(
        &self,
        candidate: &mut Candidate,
    ) -> Result<AdmissionDecision, RepositoryError> {
        let url = candidate.url().to_string();

        if self.is_duplicate(&url).await? {
            info!("DUP: {}", url);
            return Ok(AdmissionDecision::Reject(RejectReason::Duplicate));
        }

        if !url_utils::is_fetchable_url(&url) {
            info!("INV: {}", url);
            return Ok(AdmissionDecision::Reject(RejectReason::InvalidUrl));
        }

        if !self.has_valid_dns(&url).await {
            info!("DNS: {}", url);
            return Ok(AdmissionDecision::Reject(RejectReason::InvalidDns));
        }

        candidate.fill_domain_with(url_utils::domain_of);
        debug!("ok {}", url);
        Ok(AdmissionDecision::Accept)
    }

    async fn is_duplicate(&self, url: &str) -> Result<bool, RepositoryError> {
        for corpus in &self.corpora {
            if corpus.exists(url).await? {
                debug!(corpus = corpus.name(), "duplicate found for {}", url);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn has_valid_dns(&self, url: &str) -> bool {
        match url_utils::host_of(url) {
            Some(host) => self.dns_cache.is_reachable(&host).await,
            None => false,
        }
    }
}
