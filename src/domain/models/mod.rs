// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义准入流程的核心实体：
/// - 候选项（candidate）：一个等待判定的URL及其终态
pub mod candidate;
