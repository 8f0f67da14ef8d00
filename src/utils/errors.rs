// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::models::candidate::CandidateError;
use crate::domain::repositories::frontier_repository::RepositoryError;

/// 准入Worker错误类型
///
/// 任何此类错误都意味着候选项被丢弃：既不写入拒绝记录也不写入接受队列。
#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("仓库错误: {0}")]
    Repository(#[from] RepositoryError),

    #[error("领域错误: {0}")]
    Domain(#[from] CandidateError),
}

/// 配置校验错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
