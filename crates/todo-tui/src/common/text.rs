//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Width is measured in terminal columns, so wide characters (CJK, emoji)
/// count double.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Replaces every character with `mask`, keeping the character count.
pub fn mask(text: &str, mask: char) -> String {
    text.chars().map(|_| mask).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_with_ellipsis("milk", 4), "milk");
        assert_eq!(truncate_with_ellipsis("milk", 10), "milk");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate_with_ellipsis("buy oat milk", 8), "buy oat…");
    }

    #[test]
    fn test_truncate_degenerate_width() {
        assert_eq!(truncate_with_ellipsis("milk", 1), "…");
        assert_eq!(truncate_with_ellipsis("milk", 0), "…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_with_ellipsis("牛乳を買う", 6), "牛乳…");
    }

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("abcd", '*'), "****");
        assert_eq!(mask("ñé", '•'), "••");
        assert_eq!(mask("", '*'), "");
    }
}
