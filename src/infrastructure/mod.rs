// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 缓存（cache）：单飞DNS解析缓存
/// - 数据库（database）：数据库连接和实体映射
/// - DNS（dns）：系统解析器
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：前沿存储接口的具体实现
pub mod cache;
pub mod database;
pub mod dns;
pub mod metrics;
pub mod repositories;
