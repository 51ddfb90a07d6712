// Formatters - 크기, 날짜, 속성, 표시 폭 포맷팅

use chrono::{DateTime, Local};
use std::time::SystemTime;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 ("1.5 KB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// 목록 컬럼용 날짜 ("YYYY-MM-DD HH:MM", 16자)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 속성 다이얼로그용 날짜 ("YYYY-MM-DD HH:MM:SS")
pub fn format_date_full(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 읽기/쓰기/실행 속성을 "Read, Write" 형태로 나열
pub fn format_attributes(readable: bool, writable: bool, executable: bool) -> String {
    let flags: Vec<&str> = [
        (readable, "Read"),
        (writable, "Write"),
        (executable, "Execute"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, label)| *label)
    .collect();

    if flags.is_empty() {
        "None".to_string()
    } else {
        flags.join(", ")
    }
}

/// 표시 폭 기준으로 자르고 남는 칸은 공백으로 채움
///
/// 잘린 경우 마지막 칸에 '~'를 둔다.
pub fn fit_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('~');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
