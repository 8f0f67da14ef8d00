// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义准入流程所需的外部存储抽象：待处理来源、重复检查语料、
/// 拒绝记录和接受队列。具体实现由基础设施层提供。
pub mod frontier_repository;
