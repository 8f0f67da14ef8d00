// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{Host, Url};

/// 允许抓取的协议，按字面小写比较
const FETCHABLE_SCHEMES: [&str; 2] = ["http", "https"];

/// 检查URL是否为可抓取的 HTTP(S) 地址
///
/// 解析必须成功，且原始字符串中的协议必须是小写的 `http` 或 `https`。
/// `Url::parse` 会把协议规范化为小写，因此这里比较的是输入本身的前缀，
/// `HTTP://example.com` 会被拒绝。首尾的空白和控制字符与解析器一样被忽略。
pub fn is_fetchable_url(url: &str) -> bool {
    if Url::parse(url).is_err() {
        return false;
    }

    // the parser drops leading C0 controls and spaces before reading the scheme
    let raw = url.trim_start_matches(|c: char| c <= ' ');
    match raw.split_once(':') {
        Some((scheme, _)) => FETCHABLE_SCHEMES.contains(&scheme),
        None => false,
    }
}

/// 提取URL中用于DNS解析的主机名
///
/// IPv6 字面量不带方括号返回。无法解析或没有主机时返回 `None`。
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host()? {
        Host::Domain(domain) if domain.is_empty() => None,
        Host::Domain(domain) => Some(domain.to_string()),
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

/// 从URL中提取可注册域名
///
/// 取主机名最后两段；若倒数第二段为 `co` 且段数大于2，则取最后三段
/// （例如 `example.co.uk`）。主机只有一段时返回完整的原始URL。
/// 这是启发式规则，不查询公共后缀列表。
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    let mut labels: Vec<&str> = host.split('.').collect();
    // trailing empty labels (fully-qualified "example.com.") do not count
    while labels.len() > 1 && labels.last() == Some(&"") {
        labels.pop();
    }

    let count = labels.len();
    if count > 2 && labels[count - 2] == "co" {
        Some(labels[count - 3..].join("."))
    } else if count < 2 {
        Some(url.to_string())
    } else {
        Some(labels[count - 2..].join("."))
    }
}
