// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含候选URL实体、准入校验服务和前沿存储接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、DNS解析、缓存和指标导出等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 候选URL提交接口和运行状态查询
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 准入循环和工作器管理
pub mod workers;
