/// Marker drawn for a filled bar cell.
pub const BAR_FULL: char = '#';
/// Marker drawn for an empty bar cell.
pub const BAR_EMPTY: char = '.';

/// Fixed-width usage bar. Integer arithmetic only so the glyph is identical
/// on every platform: `pct = floor(used*100/total)` (0 when `total` is 0),
/// `filled = floor(pct*width/100)` clamped to the bar width.
pub fn format_bar(used: u64, total: u64, width: usize) -> String {
    let pct = if total > 0 {
        used.saturating_mul(100) / total
    } else {
        0
    };
    let filled = usize::try_from(pct.saturating_mul(width as u64) / 100)
        .unwrap_or(width)
        .min(width);

    let mut bar = String::with_capacity(width);
    for _ in 0..filled {
        bar.push(BAR_FULL);
    }
    for _ in filled..width {
        bar.push(BAR_EMPTY);
    }
    bar
}

/// Clamp a line to `cols` characters, left side preserved. Control
/// characters are replaced so payloads stay printable. Idempotent.
pub fn fit_line(text: &str, cols: usize) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .take(cols)
        .collect()
}
