// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::settings::AdmissionSettings;
use crate::domain::models::candidate::{AdmissionDecision, Candidate};
use crate::domain::repositories::frontier_repository::{
    AcceptSink, PendingSource, RejectSink, SnapshotCursor,
};
use crate::domain::services::validation_service::ValidationService;
use crate::utils::errors::AdmissionError;
use crate::workers::worker::Worker;

/// 准入循环配置
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    /// 同时在途的校验任务上限
    pub max_concurrency: usize,
    /// 每页读取的候选项数
    pub snapshot_batch_size: u64,
    /// 空快照后的等待时间
    pub idle_interval: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 125,
            snapshot_batch_size: 300,
            idle_interval: Duration::from_secs(1),
        }
    }
}

impl From<&AdmissionSettings> for AdmissionConfig {
    fn from(settings: &AdmissionSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            snapshot_batch_size: settings.snapshot_batch_size,
            idle_interval: settings.idle_interval(),
        }
    }
}

/// 单轮快照的处理统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// 成功认领（从来源删除）的候选项
    pub claimed: u64,
    /// 派发给校验任务的候选项
    pub dispatched: u64,
    /// 与上一条URL相同而跳过的候选项
    pub skipped_adjacent: u64,
    /// 认领前已被他人删除的候选项
    pub lost_claims: u64,
}

/// 在途任务窗口
///
/// 窗口中的任务数永远不超过 `capacity`；满时等待任意一个任务完成。
/// 窗口跨轮次保留，上一轮未完成的任务继续占用名额。
pub struct AdmissionWindow {
    tasks: JoinSet<()>,
    capacity: usize,
    peak: usize,
}

impl AdmissionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: JoinSet::new(),
            capacity: capacity.max(1),
            peak: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 历史最大在途任务数
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// 回收已完成的任务，直到窗口有空位
    pub async fn wait_for_capacity(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            Self::on_joined(joined);
        }
        while self.tasks.len() >= self.capacity {
            match self.tasks.join_next().await {
                Some(joined) => Self::on_joined(joined),
                None => break,
            }
        }
        self.publish();
    }

    /// 等待全部在途任务完成
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            Self::on_joined(joined);
        }
        self.publish();
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
        self.peak = self.peak.max(self.tasks.len());
        self.publish();
    }

    fn on_joined(joined: Result<(), JoinError>) {
        if let Err(e) = joined {
            error!("Admission task aborted: {}", e);
            metrics::counter!("admission_worker_failures_total").increment(1);
        }
    }

    fn publish(&self) {
        metrics::gauge!("admission_in_flight").set(self.tasks.len() as f64);
    }
}

/// 准入循环
///
/// 反复按URL降序遍历待处理来源：先认领（删除）候选项，再派发给
/// 校验任务，由任务把结果写入拒绝记录或接受队列。认领不可撤销，
/// 任务失败时候选项只会被记录日志后丢弃。
pub struct AdmissionWorker {
    source: Arc<dyn PendingSource>,
    validator: Arc<ValidationService>,
    reject_sink: Arc<dyn RejectSink>,
    accept_sink: Arc<dyn AcceptSink>,
    config: AdmissionConfig,
}

impl AdmissionWorker {
    pub fn new(
        source: Arc<dyn PendingSource>,
        validator: Arc<ValidationService>,
        reject_sink: Arc<dyn RejectSink>,
        accept_sink: Arc<dyn AcceptSink>,
        config: AdmissionConfig,
    ) -> Self {
        Self {
            source,
            validator,
            reject_sink,
            accept_sink,
            config,
        }
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// 创建与配置匹配的在途窗口
    pub fn window(&self) -> AdmissionWindow {
        AdmissionWindow::new(self.config.max_concurrency)
    }

    /// 处理一轮快照
    ///
    /// 快照读取失败时记录错误并提前结束本轮。返回时派发的任务可能仍在运行。
    pub async fn run_cycle(&self, window: &mut AdmissionWindow) -> CycleReport {
        let mut report = CycleReport::default();
        let mut cursor: Option<SnapshotCursor> = None;
        let mut last_url: Option<String> = None;

        loop {
            let batch = match self
                .source
                .next_batch(cursor.as_ref(), self.config.snapshot_batch_size)
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    error!("Failed to read pending snapshot: {}", e);
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }
            let exhausted = (batch.len() as u64) < self.config.snapshot_batch_size;

            for candidate in batch {
                cursor = Some(SnapshotCursor::after(&candidate));
                window.wait_for_capacity().await;

                match self.source.claim(&candidate).await {
                    Ok(true) => report.claimed += 1,
                    Ok(false) => {
                        debug!("Lost claim on {}", candidate.url());
                        metrics::counter!("admission_lost_claims_total").increment(1);
                        report.lost_claims += 1;
                        continue;
                    }
                    Err(e) => {
                        warn!("Failed to claim {}: {}", candidate.url(), e);
                        continue;
                    }
                }

                // descending order puts repeats next to each other
                if last_url.as_deref() == Some(candidate.url()) {
                    metrics::counter!("admission_adjacent_skips_total").increment(1);
                    report.skipped_adjacent += 1;
                    continue;
                }
                last_url = Some(candidate.url().to_string());

                self.dispatch(window, candidate);
                report.dispatched += 1;
            }

            if exhausted {
                break;
            }
        }

        report
    }

    fn dispatch(&self, window: &mut AdmissionWindow, candidate: Candidate) {
        let validator = self.validator.clone();
        let reject_sink = self.reject_sink.clone();
        let accept_sink = self.accept_sink.clone();
        let span = info_span!("admission", url = %candidate.url());

        window.spawn(
            async move {
                let url = candidate.url().to_string();
                if let Err(e) = admit(candidate, &validator, &reject_sink, &accept_sink).await {
                    error!("Dropping {} after worker failure: {}", url, e);
                    metrics::counter!("admission_worker_failures_total").increment(1);
                }
            }
            .instrument(span),
        );
    }
}

/// 评估单个候选项并写入对应的存储
async fn admit(
    mut candidate: Candidate,
    validator: &ValidationService,
    reject_sink: &Arc<dyn RejectSink>,
    accept_sink: &Arc<dyn AcceptSink>,
) -> Result<AdmissionDecision, AdmissionError> {
    let decision = validator.evaluate(&mut candidate).await?;
    candidate.finalize(decision, Utc::now())?;

    let outcome = match decision {
        AdmissionDecision::Accept => {
            accept_sink.append(&candidate).await?;
            "accepted"
        }
        AdmissionDecision::Reject(reason) => {
            reject_sink.append(&candidate).await?;
            reason.as_label()
        }
    };

    metrics::counter!("admission_candidates_total", "outcome" => outcome).increment(1);
    Ok(decision)
}

#[async_trait]
impl Worker for AdmissionWorker {
    async fn run(&self) -> Result<(), AdmissionError> {
        info!(
            max_concurrency = self.config.max_concurrency,
            "Admission worker started"
        );

        let mut window = self.window();
        loop {
            let report = self.run_cycle(&mut window).await;
            if report.claimed > 0 {
                info!(
                    claimed = report.claimed,
                    dispatched = report.dispatched,
                    skipped = report.skipped_adjacent,
                    in_flight = window.len(),
                    "Admission cycle finished"
                );
            } else {
                tokio::time::sleep(self.config.idle_interval).await;
            }
        }
    }

    fn name(&self) -> &str {
        "admission"
    }
}

#[cfg(test)]
#[path = "admission_worker_test.rs"]
mod tests;
