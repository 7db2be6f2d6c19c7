// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;
use yare::parameterized;

fn wall_ts() -> Timestamp {
    Timestamp::Wall(
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 5)
            .unwrap(),
    )
}

#[test]
fn record_line_has_timestamp_and_sequence() {
    let record = Record::new(wall_ts(), 41);
    assert_eq!(record.to_line(), "2026-10-16 12:00:05, 41\n");
}

#[test]
fn record_line_without_timestamp_is_bare_sequence() {
    let record = Record {
        timestamp: None,
        sequence: 7,
    };
    assert_eq!(record.to_line(), "7\n");
}

#[parameterized(
    wall = { "2026-10-16 12:00:05, 41", Some(41) },
    ticks = { "18000, 3", Some(3) },
    bare = { "12", Some(12) },
    crlf = { "5, 6\r\n", Some(6) },
    torn = { "2026-10-16 12:0", None },
    empty = { "", None },
    missing_sequence = { "2026-10-16 12:00:05, ", None },
)]
fn parse_line_cases(line: &str, expected: Option<u64>) {
    assert_eq!(Record::parse_line(line).map(|r| r.sequence), expected);
}

#[test]
fn buffer_push_matches_record_lines() {
    let mut buffer = LogBuffer::new();
    let first = Record::new(Timestamp::Ticks(1000), 1);
    let second = Record::new(Timestamp::Ticks(2000), 2);
    buffer.push(&first);
    buffer.push(&second);

    assert_eq!(
        buffer.contents(),
        format!("{}{}", first.to_line(), second.to_line())
    );
    assert_eq!(buffer.record_count(), 2);
    assert_eq!(buffer.len_bytes(), buffer.contents().len());
}

#[test]
fn buffer_clear_empties_everything() {
    let mut buffer = LogBuffer::new();
    buffer.push(&Record::new(Timestamp::Ticks(1), 1));
    assert!(!buffer.is_empty());

    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len_bytes(), 0);
    assert_eq!(buffer.record_count(), 0);
}

#[test]
fn record_limit_counts_records() {
    let limit = BufferLimit::records(3);
    let mut buffer = LogBuffer::new();
    for seq in 1..=2 {
        buffer.push(&Record::new(Timestamp::Ticks(seq), seq));
    }
    assert!(!limit.reached(&buffer));
    buffer.push(&Record::new(Timestamp::Ticks(3), 3));
    assert!(limit.reached(&buffer));
}

#[test]
fn byte_limit_counts_serialized_length() {
    let limit = BufferLimit::bytes(10);
    let mut buffer = LogBuffer::new();
    // "1, 1\n" is five bytes
    buffer.push(&Record::new(Timestamp::Ticks(1), 1));
    assert!(!limit.reached(&buffer));
    buffer.push(&Record::new(Timestamp::Ticks(1), 2));
    assert!(limit.reached(&buffer));
}

#[test]
fn default_limit_is_ten_records() {
    assert_eq!(BufferLimit::default(), BufferLimit::records(10));
}
