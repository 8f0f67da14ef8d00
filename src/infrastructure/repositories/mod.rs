// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 为领域层的前沿存储接口提供基于 sea-orm 的实现
pub mod stage_repo_impl;
