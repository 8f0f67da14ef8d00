// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::io;
use std::net::IpAddr;
use tokio::net::lookup_host;

/// DNS查询接口
///
/// 返回主机名解析出的全部地址；找不到主机时返回错误。
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup(&self, hostname: &str) -> io::Result<Vec<IpAddr>>;
}

/// 系统解析器
///
/// 通过 `tokio::net::lookup_host` 调用操作系统的阻塞式解析，
/// 超时由系统解析器自身决定。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl DnsLookup for SystemResolver {
    async fn lookup(&self, hostname: &str) -> io::Result<Vec<IpAddr>> {
        // lookup_host needs a port; it is not used for resolution
        let addrs = lookup_host((hostname, 0)).await?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// 判断解析结果是否可路由
///
/// 以第一个地址为准：没有地址或为通配地址（0.0.0.0 / ::）视为不可达。
pub fn is_routable(addrs: &[IpAddr]) -> bool {
    match addrs.first() {
        Some(ip) => !ip.is_unspecified(),
        None => false,
    }
}
