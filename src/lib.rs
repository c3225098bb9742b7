// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含应用程序的核心业务逻辑和用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体（爬取目标与爬取结果）
pub mod domain;

/// 引擎模块
///
/// 浏览器渲染网关与URL安全分类器
pub mod engines;

/// 内容提取模块
///
/// 从渲染后的HTML中提取可读文本
pub mod extraction;

/// 基础设施模块
///
/// 提供可观测性等外部服务集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
