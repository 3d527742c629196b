#![allow(clippy::unwrap_used)]

use super::util::*;

// ── format_yen ────────────────────────────────────────────────

#[test]
fn test_format_yen_basic() {
    assert_eq!(format_yen(1234), "¥1,234");
}

#[test]
fn test_format_yen_no_commas() {
    assert_eq!(format_yen(999), "¥999");
}

#[test]
fn test_format_yen_zero() {
    assert_eq!(format_yen(0), "¥0");
}

#[test]
fn test_format_yen_negative() {
    assert_eq!(format_yen(-4250), "-¥4,250");
}

#[test]
fn test_format_yen_large() {
    assert_eq!(format_yen(1_234_567), "¥1,234,567");
}

#[test]
fn test_format_yen_millions() {
    assert_eq!(format_yen(10_000_000), "¥10,000,000");
}

#[test]
fn test_format_yen_single_digit() {
    assert_eq!(format_yen(5), "¥5");
}

#[test]
fn test_format_yen_negative_large() {
    assert_eq!(format_yen(-99_999), "-¥99,999");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Japanese characters are multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 1);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 5);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_down_adjusts_window() {
    let (mut index, mut scroll) = (4, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 5);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_up_clamps_at_zero() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 2);
    assert_eq!(scroll, 2);
}
