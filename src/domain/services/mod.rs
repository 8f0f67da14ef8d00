// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 校验服务（validation_service）：重复、语法、DNS 三段式准入检查
pub mod validation_service;
