// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册准入流程的指标。地址被占用时只记录警告。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        "admission_candidates_total",
        "Candidates that reached a terminal decision, labelled by outcome"
    );
    describe_counter!(
        "admission_worker_failures_total",
        "Candidates dropped because evaluation or sink write failed"
    );
    describe_counter!(
        "admission_adjacent_skips_total",
        "Claimed candidates skipped as repeats of the previous URL"
    );
    describe_counter!(
        "admission_lost_claims_total",
        "Snapshot rows already removed by someone else before claim"
    );
    describe_counter!("dns_lookups_total", "DNS lookups performed, by result");
    describe_gauge!("admission_in_flight", "Validation tasks currently in flight");
}
