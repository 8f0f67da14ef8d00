// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 候选URL实体
///
/// 表示一个等待准入判定的URL。候选项从待处理队列读出时创建，
/// 在判定后只会发生一次状态迁移：
/// Pending → Queued | Rejected
///
/// `status` 与 `reject_reason` 只能通过 [`Candidate::finalize`] 修改，
/// 保证 `Rejected` 当且仅当存在拒绝原因。`domain` 只能在终态之前补全。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 在来源队列中的行ID
    pub id: Uuid,
    url: String,
    domain: Option<String>,
    status: CandidateStatus,
    reject_reason: Option<RejectReason>,
    processed_at: Option<DateTime<Utc>>,
}

/// 候选项状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateStatus {
    /// 待判定
    #[default]
    Pending,
    /// 已接受，写入下游队列
    Queued,
    /// 已拒绝
    Rejected,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CandidateStatus::Pending => write!(f, "PENDING"),
            CandidateStatus::Queued => write!(f, "QUEUED"),
            CandidateStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl FromStr for CandidateStatus {
    type Err = CandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(CandidateStatus::Pending),
            "QUEUED" => Ok(CandidateStatus::Queued),
            "REJECTED" => Ok(CandidateStatus::Rejected),
            other => Err(CandidateError::UnknownValue(other.to_string())),
        }
    }
}

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// 已存在于任一下游阶段
    Duplicate,
    /// 无法解析或协议不是 http/https
    InvalidUrl,
    /// 主机名无法提取或无法解析
    InvalidDns,
}

impl RejectReason {
    /// 指标标签
    pub fn as_label(&self) -> &'static str {
        match self {
            RejectReason::Duplicate => "duplicate",
            RejectReason::InvalidUrl => "invalid_url",
            RejectReason::InvalidDns => "invalid_dns",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::Duplicate => write!(f, "DUPLICATE"),
            RejectReason::InvalidUrl => write!(f, "INVALID_URL"),
            RejectReason::InvalidDns => write!(f, "INVALID_DNS"),
        }
    }
}

impl FromStr for RejectReason {
    type Err = CandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DUPLICATE" => Ok(RejectReason::Duplicate),
            "INVALID_URL" => Ok(RejectReason::InvalidUrl),
            "INVALID_DNS" => Ok(RejectReason::InvalidDns),
            other => Err(CandidateError::UnknownValue(other.to_string())),
        }
    }
}

/// 准入判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Accept,
    Reject(RejectReason),
}

/// 候选项错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CandidateError {
    /// 候选项已处于终态
    #[error("candidate {0} already reached a terminal state")]
    AlreadyTerminal(Uuid),

    /// 无法识别的枚举值
    #[error("unknown value: {0}")]
    UnknownValue(String),
}

impl Candidate {
    /// 创建新的待判定候选项
    pub fn new(url: impl Into<String>) -> Self {
        Self::pending(Uuid::new_v4(), url, None)
    }

    /// 以来源中已有的行重建候选项
    pub fn pending(id: Uuid, url: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            id,
            url: url.into(),
            domain,
            status: CandidateStatus::Pending,
            reject_reason: None,
            processed_at: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 可注册域名，接受时计算
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// 在判定前补全域名
    ///
    /// 已有域名或已到终态时不做修改。
    pub(crate) fn fill_domain_with(&mut self, compute: impl FnOnce(&str) -> Option<String>) {
        if self.is_terminal() || self.domain.is_some() {
            return;
        }
        self.domain = compute(&self.url);
    }

    pub fn status(&self) -> CandidateStatus {
        self.status
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        self.reject_reason
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        self.status != CandidateStatus::Pending
    }

    /// 应用判定结果并记录处理时间
    ///
    /// 只允许从 `Pending` 迁移一次，重复调用返回 [`CandidateError::AlreadyTerminal`]。
    pub fn finalize(
        &mut self,
        decision: AdmissionDecision,
        processed_at: DateTime<Utc>,
    ) -> Result<(), CandidateError> {
        if self.is_terminal() {
            return Err(CandidateError::AlreadyTerminal(self.id));
        }

        match decision {
            AdmissionDecision::Accept => {
                self.status = CandidateStatus::Queued;
                self.reject_reason = None;
            }
            AdmissionDecision::Reject(reason) => {
                self.status = CandidateStatus::Rejected;
                self.reject_reason = Some(reason);
            }
        }
        self.processed_at = Some(processed_at);
        Ok(())
    }
}
