// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含系统的技术实现细节，目前只有可观测性（指标收集）
pub mod observability;

pub use observability::metrics;
