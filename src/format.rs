use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// CPU display precision: one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Memory display precision: one decimal on both figures.
pub fn format_gb_pair(used: f64, total: f64) -> String {
    format!("{used:.1} / {total:.1} GB")
}

/// Disk display precision: whole GB.
pub fn format_gb_whole(value: f64) -> String {
    format!("{} GB", value.round().max(0.0) as u64)
}
