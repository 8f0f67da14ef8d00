// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含准入判定的核心业务逻辑，包括：
/// - 领域模型（models）：候选项及其判定结果
/// - 仓库接口（repositories）：抓取前沿各阶段的存储抽象
/// - 服务（services）：候选项校验流水线
///
/// 领域层不依赖于任何具体存储实现。
pub mod models;
pub mod repositories;
pub mod services;
