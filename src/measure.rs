//! Text measurement and the bundled overflow oracle.
//!
//! The flow engine never measures anything; it only asks an
//! [`OverflowOracle`](crate::engine::OverflowOracle). This module supplies the
//! stand-alone default: plain text blocks word-wrapped into a cell grid,
//! measured with Unicode display widths (East Asian Width per codepoint,
//! grapheme clusters for emoji sequences and combining marks).
//!
//! Hosts with a real renderer should implement the oracle against their own
//! layout instead.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::engine::OverflowOracle;
use crate::region::Region;

/// Display width of a grapheme cluster in cells.
///
/// Single codepoints use their East Asian Width (0 for control and
/// zero-width characters). Multi-codepoint emoji sequences (ZWJ, variation
/// selector) render as one wide pair; other clusters take the base
/// character's width, with combining marks at zero.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return 0,
    };

    if grapheme.len() == first.len_utf8() {
        return first.width().unwrap_or(0);
    }

    if grapheme
        .chars()
        .any(|c| matches!(c, '\u{200D}' | '\u{FE0F}'))
    {
        2
    } else {
        first.width().unwrap_or(0)
    }
}

/// Display width of a string in cells.
pub fn string_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Width of the widest whitespace-delimited word, in cells.
pub fn widest_word(text: &str) -> usize {
    text.split_whitespace().map(string_width).max().unwrap_or(0)
}

/// Line count of one block's text word-wrapped to `width` cells.
///
/// An empty block still occupies one line; that is what makes a full region
/// reject even an empty shell. A word wider than the line wraps at grapheme
/// granularity for height purposes (the width overrun is reported separately
/// by [`BoxMeasure`]).
pub fn block_height(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }

    let mut lines = 1usize;
    let mut used = 0usize;

    for word in text.split_whitespace() {
        let word_width = string_width(word);

        if word_width > width {
            if used > 0 {
                lines += 1;
                used = 0;
            }
            for grapheme in word.graphemes(true) {
                let gw = grapheme_width(grapheme);
                if used + gw > width && used > 0 {
                    lines += 1;
                    used = 0;
                }
                used += gw;
            }
            continue;
        }

        let separator = if used == 0 { 0 } else { 1 };
        if used + separator + word_width > width {
            lines += 1;
            used = word_width;
        } else {
            used += separator + word_width;
        }
    }

    lines
}

/// Measured overflow oracle for plain text boxes.
///
/// A region overflows when the summed wrapped heights of its shells exceed
/// its height, or when any placed word is wider than its width (overflow on
/// either axis).
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxMeasure;

impl OverflowOracle for BoxMeasure {
    fn overflowing(&self, region: &Region) -> bool {
        let width = region.width() as usize;
        let height = region.height() as usize;
        let shells = region.shells();

        let total: usize = shells
            .iter()
            .map(|shell| block_height(shell.text(), width))
            .sum();
        if total > height {
            return true;
        }

        shells.iter().any(|shell| widest_word(shell.text()) > width)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a b c"), 5);
    }

    #[test]
    fn test_string_width_wide_and_zero() {
        assert_eq!(string_width("日本"), 4); // CJK, 2 cells each
        assert_eq!(string_width("\u{0301}"), 0); // lone combining accent
        assert_eq!(string_width("e\u{0301}"), 1); // e + combining accent
    }

    #[test]
    fn test_widest_word() {
        assert_eq!(widest_word("a bb ccc"), 3);
        assert_eq!(widest_word(""), 0);
        assert_eq!(widest_word("   "), 0);
    }

    #[test]
    fn test_block_height_wraps_at_word_boundaries() {
        // "alpha beta" is 10 cells; fits one 11-cell line.
        assert_eq!(block_height("alpha beta", 11), 1);
        // "gamma" no longer fits after "alpha beta".
        assert_eq!(block_height("alpha beta gamma", 11), 2);
        assert_eq!(block_height("", 11), 1);
    }

    #[test]
    fn test_block_height_oversized_word() {
        // 8-cell word in a 3-cell line: grapheme-wrapped to 3 lines.
        assert_eq!(block_height("longword", 3), 3);
        // Preceded by a short word that shares nothing with it.
        assert_eq!(block_height("ab longword", 3), 4);
    }

    #[test]
    fn test_block_height_zero_width() {
        assert_eq!(block_height("anything at all", 0), 1);
    }

    #[test]
    fn test_box_measure_height_axis() {
        let region = Region::new(11, 1);
        region.push_shell(crate::region::Shell::new("p".into(), Vec::new()));
        region.append_to_last_shell("alpha", " ");
        region.append_to_last_shell("beta", "");
        assert!(!BoxMeasure.overflowing(&region));

        region.append_to_last_shell("gamma", "");
        assert!(BoxMeasure.overflowing(&region));
    }

    #[test]
    fn test_box_measure_width_axis() {
        // Plenty of height, but the word is wider than the region.
        let region = Region::new(3, 10);
        region.push_shell(crate::region::Shell::new("p".into(), Vec::new()));
        region.append_to_last_shell("longword", "");
        assert!(BoxMeasure.overflowing(&region));
    }

    #[test]
    fn test_box_measure_empty_shell_fills_a_line() {
        let region = Region::new(20, 1);
        region.push_shell(crate::region::Shell::new("p".into(), Vec::new()));
        assert!(!BoxMeasure.overflowing(&region));

        region.push_shell(crate::region::Shell::new("p".into(), Vec::new()));
        assert!(BoxMeasure.overflowing(&region));
    }
}
