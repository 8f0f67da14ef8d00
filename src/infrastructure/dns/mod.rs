// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// DNS模块
///
/// 提供主机名解析原语
pub mod resolver;
