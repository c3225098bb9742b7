// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// 初始化指标系统
///
/// 安装Prometheus导出器并注册应用所需的各类监控指标
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    builder
        .install()
        .expect("failed to install Prometheus recorder");

    // Register metrics
    describe_counter!(
        "crawl_requests_total",
        "Total number of single-URL crawl attempts, including ones rejected by the URL safety classifier"
    );
    describe_counter!(
        "crawl_failures_total",
        "Total number of crawl attempts that produced a failure outcome"
    );
    describe_counter!(
        "crawl_batch_requests_total",
        "Total number of accepted batch crawl requests"
    );
    describe_histogram!(
        "crawl_duration_seconds",
        "Duration of individual crawl attempts in seconds"
    );
}
