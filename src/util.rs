use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::{info, warn};

// 时间转换工具

/// Resolve an IANA zone name such as "US/Eastern" or "Asia/Kolkata", falling back to UTC.
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown exchange timezone {}, assuming UTC", n);
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

/// 解析交易所本地时间（"YYYY-MM-DD HH:MM:SS" 或 "YYYY-MM-DD"）并转换为 UTC
pub fn parse_exchange_timestamp(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // DST gaps have no local mapping; overlaps take the earlier instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn unix_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

// 限制价格点数量，保留最近的记录（输入需已按时间升序）
pub fn limit_points<T>(points: &mut Vec<T>, max_points: usize, symbol: &str) {
    if points.len() > max_points {
        info!("Limiting {} chart points to {} for {}",
              points.len(), max_points, symbol);
        let excess = points.len() - max_points;
        points.drain(..excess);
    }
}
