//! 人性化时长的序列化支持
//!
//! 配置里的刷新间隔写作 `"50ms"`、`"1s"`、`"1m30s"`，通过 `HumanDur` 与
//! `Duration` 互转。

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub use serde_with::{serde_as, DeserializeAs, SerializeAs};

/// `Duration` 的人性化格式适配器，配合 `#[serde_as(as = "HumanDur")]` 使用
pub struct HumanDur;

impl SerializeAs<Duration> for HumanDur {
    fn serialize_as<S>(source: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_duration(*source))
    }
}

impl<'de> DeserializeAs<'de, Duration> for HumanDur {
    fn deserialize_as<D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// 单位对应的纳秒数，按匹配优先级排列（`ms` 必须先于 `m`）
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60.0 * 1_000_000_000.0),
    ("h", 3_600.0 * 1_000_000_000.0),
    ("d", 86_400.0 * 1_000_000_000.0),
];

/// 解析时长字符串，如 `"1m30s"` -> 90 秒
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return Err(anyhow!("empty duration"));
    }

    let mut total_nanos = 0f64;
    let mut rest = s.as_str();
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_end == 0 {
            return Err(anyhow!("expected a number in duration '{}'", s));
        }
        let value: f64 = rest[..number_end]
            .parse()
            .map_err(|_| anyhow!("invalid number '{}' in duration", &rest[..number_end]))?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        let (_, scale) = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .ok_or_else(|| {
                if unit.is_empty() {
                    anyhow!("missing unit in duration '{}'", s)
                } else {
                    anyhow!("unsupported duration unit '{}'", unit)
                }
            })?;
        total_nanos += value * scale;
        rest = &rest[unit_end..];
    }

    let total_nanos = total_nanos.round();
    if total_nanos >= u64::MAX as f64 {
        return Err(anyhow!("duration '{}' is too large", s));
    }
    Ok(Duration::from_nanos(total_nanos as u64))
}

/// 将时长格式化为最紧凑的人性化字符串
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();

    if secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}us", n / 1_000),
            n => format!("{}ns", n),
        };
    }

    let mut out = String::new();
    let mut remaining = secs;
    for (unit, size) in [("d", 86_400u64), ("h", 3_600), ("m", 60)] {
        if remaining >= size {
            out.push_str(&format!("{}{}", remaining / size, unit));
            remaining %= size;
        }
    }
    if nanos != 0 {
        out.push_str(&format!("{}ms", remaining * 1000 + u64::from(nanos) / 1_000_000));
    } else if remaining > 0 {
        out.push_str(&format!("{}s", remaining));
    }
    out
}
