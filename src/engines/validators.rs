// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::{IpAddr, Ipv4Addr};
use tokio::net::lookup_host;
use url::Url;

/// 静态拒绝的主机名（不区分大小写）
const DENIED_HOSTS: [&str; 5] = [
    "localhost",
    "localhost.localdomain",
    "127.0.0.1",
    "::1",
    "0.0.0.0",
];

/// URL安全裁决
///
/// 每次分类调用产生一个，不做持久化也不跨请求缓存
#[derive(Debug, Clone)]
pub struct SafetyVerdict {
    /// 是否允许抓取
    pub allowed: bool,
    /// 拒绝原因
    pub reason: Option<String>,
}

impl SafetyVerdict {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// 分类URL是否安全可抓取 (防止 SSRF)
///
/// 检查流程：
/// 1. URL必须可解析且scheme为http/https
/// 2. 主机名不在静态拒绝列表中
/// 3. 主机名解析出的所有IP地址均不属于私有、环回、链路本地、保留或组播范围
///
/// DNS解析失败时放行，由后续抓取阶段暴露失败（避免瞬时DNS故障误判）。
/// 分类即时生效且不缓存；分类与抓取之间的DNS变化（rebinding）是已知残余风险
pub async fn classify(raw_url: &str) -> SafetyVerdict {
    // 允许通过环境变量禁用 SSRF 保护（用于测试）
    if std::env::var("EXTRACTRS_DISABLE_SSRF_PROTECTION").unwrap_or_default() == "true" {
        return SafetyVerdict::allow();
    }

    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(e) => return SafetyVerdict::deny(format!("invalid URL: {}", e)),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return SafetyVerdict::deny(format!("scheme '{}' is not allowed", url.scheme()));
    }

    // IPv6主机在URL里带方括号，统一去掉再比较和解析
    let host = match url.host_str() {
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_ascii_lowercase(),
        None => return SafetyVerdict::deny("missing host"),
    };

    if DENIED_HOSTS.contains(&host.as_str()) {
        return SafetyVerdict::deny(format!("host '{}' is not allowed", host));
    }

    // 字面量IP直接判定，无需DNS
    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_forbidden_ip(ip) {
            return SafetyVerdict::deny(format!("address {} is not allowed", ip));
        }
        return SafetyVerdict::allow();
    }

    let port = url.port_or_known_default().unwrap_or(80);
    let addrs = match lookup_host((host.as_str(), port)).await {
        Ok(addrs) => addrs,
        // DNS resolution failed - allow, the fetch itself will surface the failure
        Err(_) => return SafetyVerdict::allow(),
    };

    classify_addrs(&host, addrs.map(|addr| addr.ip()))
}

/// 按主机名解析出的地址集合裁决
///
/// 任意一个地址不安全即拒绝整个主机名
pub(crate) fn classify_addrs(host: &str, addrs: impl Iterator<Item = IpAddr>) -> SafetyVerdict {
    for ip in addrs {
        if is_forbidden_ip(ip) {
            return SafetyVerdict::deny(format!(
                "host '{}' resolves to forbidden address {}",
                host, ip
            ));
        }
    }

    SafetyVerdict::allow()
}

/// 判断IP地址是否属于禁止抓取的范围
///
/// 覆盖私有(RFC1918/RFC4193)、环回、链路本地、未指定、广播、
/// IANA保留和组播地址；IPv4映射的IPv6地址按其内嵌IPv4地址判断
pub(crate) fn is_forbidden_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => is_forbidden_ipv4(ipv4),
        IpAddr::V6(ipv6) => {
            // ::ffff:a.b.c.d 按内嵌的IPv4地址判断，防止映射地址绕过
            if let Some(mapped) = ipv6.to_ipv4_mapped() {
                return is_forbidden_ipv4(mapped);
            }
            // Loopback (::1) and unspecified (::)
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            // Unique Local Address (fc00::/7)
            if (ipv6.segments()[0] & 0xfe00) == 0xfc00 {
                return true;
            }
            // Link-local (fe80::/10)
            if (ipv6.segments()[0] & 0xffc0) == 0xfe80 {
                return true;
            }
            // Multicast (ff00::/8)
            if (ipv6.segments()[0] & 0xff00) == 0xff00 {
                return true;
            }
            false
        }
    }
}

fn is_forbidden_ipv4(ipv4: Ipv4Addr) -> bool {
    let octets = ipv4.octets();

    // 0.0.0.0 and the rest of 0.0.0.0/8
    if ipv4.is_unspecified() || octets[0] == 0 {
        return true;
    }
    // 10.0.0.0/8
    if octets[0] == 10 {
        return true;
    }
    // 172.16.0.0/12
    if octets[0] == 172 && (16..=31).contains(&octets[1]) {
        return true;
    }
    // 192.168.0.0/16
    if octets[0] == 192 && octets[1] == 168 {
        return true;
    }
    // 192.0.0.0/24 (IETF protocol assignments)
    if octets[0] == 192 && octets[1] == 0 && octets[2] == 0 {
        return true;
    }
    // 192.0.2.0/24, 198.51.100.0/24, 203.0.113.0/24 (TEST-NET documentation ranges)
    if octets[0] == 192 && octets[1] == 0 && octets[2] == 2 {
        return true;
    }
    if octets[0] == 198 && octets[1] == 51 && octets[2] == 100 {
        return true;
    }
    if octets[0] == 203 && octets[1] == 0 && octets[2] == 113 {
        return true;
    }
    // 198.18.0.0/15 (Benchmarking)
    if octets[0] == 198 && (18..=19).contains(&octets[1]) {
        return true;
    }
    // 127.0.0.0/8 (Loopback)
    if ipv4.is_loopback() {
        return true;
    }
    // 169.254.0.0/16 (Link-local, includes cloud metadata endpoints)
    if ipv4.is_link_local() {
        return true;
    }
    // 224.0.0.0/4 (Multicast)
    if (224..=239).contains(&octets[0]) {
        return true;
    }
    // 240.0.0.0/4 (Reserved) and 255.255.255.255 (Broadcast)
    if octets[0] >= 240 {
        return true;
    }
    false
}
