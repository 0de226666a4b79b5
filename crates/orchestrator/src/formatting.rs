//! Text clean-up and number formatting for user-facing output.

/// Characters stripped from provider prose.
const MARKDOWN_MARKERS: [char; 6] = ['*', '_', '`', '#', '>', '-'];

/// Strip Markdown markers from a provider summary.
///
/// Removes every `* _ ` # > -` character, collapses runs of three or more
/// newlines to two, and trims surrounding whitespace.
pub fn sanitize_summary(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut newlines = 0usize;
    for ch in stripped.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(ch);
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }

    out.trim().to_string()
}

/// Format a USD amount with precision suited to its magnitude.
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1.0 {
        format!("${:.2}", value)
    } else if abs >= 0.01 {
        format!("${:.4}", value)
    } else if abs == 0.0 {
        "$0".to_string()
    } else {
        format!("${:.8}", value)
    }
}

/// Format a percentage change with an explicit sign.
pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// Format a large USD figure with K/M/B suffixes.
pub fn format_compact_usd(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}
