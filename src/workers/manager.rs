// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::workers::worker::Worker;

/// 工作管理器
///
/// 负责派生后台工作器并在收到关闭信号时终止它们
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<(String, JoinHandle<()>)>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动工作器
    ///
    /// # 参数
    ///
    /// * `worker` - 要在独立任务中运行的工作器
    pub fn start(&mut self, worker: Arc<dyn Worker>) {
        let name = worker.name().to_string();
        info!("Starting worker {}", name);

        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            match worker.run().await {
                Ok(()) => warn!("Worker {} exited", task_name),
                Err(e) => error!("Worker {} failed: {}", task_name, e),
            }
        });
        self.handles.push((name, handle));
    }

    /// 正在运行的工作器数量
    pub fn running(&self) -> usize {
        self.handles.iter().filter(|(_, h)| !h.is_finished()).count()
    }

    /// 终止所有工作器
    ///
    /// 已认领但未完成的候选项随之丢失。
    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for (name, handle) in self.handles.drain(..) {
            handle.abort();
            info!("Worker {} aborted", name);
        }
    }

    /// 等待关闭信号并关闭工作进程
    ///
    /// 监听关闭信号并终止所有工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }

        self.shutdown();
        info!("Workers shut down successfully");
    }
}
