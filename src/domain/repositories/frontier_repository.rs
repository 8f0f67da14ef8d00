// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::DbErr;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::candidate::Candidate;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// 抓取前沿中的阶段
///
/// 每个阶段对应一个独立的URL集合，重复检查针对下游阶段进行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontierStage {
    /// 等待准入判定
    Pending,
    /// 准入通过，等待分发
    BigQueue,
    /// 已分发给抓取器
    Queue,
    /// 已抓取完成
    Done,
    /// 已导出
    Out,
    /// 被拒绝的URL
    Rejects,
}

impl FrontierStage {
    /// 参与重复检查的下游阶段
    pub const DUPLICATE_CORPORA: [FrontierStage; 4] = [
        FrontierStage::BigQueue,
        FrontierStage::Queue,
        FrontierStage::Done,
        FrontierStage::Out,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrontierStage::Pending => "pending",
            FrontierStage::BigQueue => "big_queue",
            FrontierStage::Queue => "queue",
            FrontierStage::Done => "done",
            FrontierStage::Out => "out",
            FrontierStage::Rejects => "rejects",
        }
    }
}

impl fmt::Display for FrontierStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 快照游标
///
/// 记录上一页最后一个候选项的位置，按 `(url DESC, id DESC)` 继续读取。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotCursor {
    pub url: String,
    pub id: Uuid,
}

impl SnapshotCursor {
    pub fn after(candidate: &Candidate) -> Self {
        Self {
            url: candidate.url().to_string(),
            id: candidate.id,
        }
    }
}

/// 待处理来源接口
///
/// 支持在遍历过程中被并发删减：游标基于键而不是偏移量。
#[async_trait]
pub trait PendingSource: Send + Sync {
    /// 读取游标之后的下一页，按URL降序
    async fn next_batch(
        &self,
        after: Option<&SnapshotCursor>,
        limit: u64,
    ) -> Result<Vec<Candidate>, RepositoryError>;

    /// 认领候选项（从来源中删除），返回是否确实删除了一行
    async fn claim(&self, candidate: &Candidate) -> Result<bool, RepositoryError>;

    /// 写入新的待处理URL
    async fn enqueue(&self, url: &str) -> Result<Candidate, RepositoryError>;
}

/// 重复检查语料接口
#[async_trait]
pub trait DuplicateCorpus: Send + Sync {
    /// 语料名称，用于日志
    fn name(&self) -> &str;

    /// 是否存在完全相同的URL
    async fn exists(&self, url: &str) -> Result<bool, RepositoryError>;
}

/// 拒绝记录接口
#[async_trait]
pub trait RejectSink: Send + Sync {
    async fn append(&self, candidate: &Candidate) -> Result<(), RepositoryError>;
}

/// 接受队列接口
#[async_trait]
pub trait AcceptSink: Send + Sync {
    async fn append(&self, candidate: &Candidate) -> Result<(), RepositoryError>;
}
