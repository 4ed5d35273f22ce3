// date-like substring detection
//
// compact digit dates (DDMMYYYY, MMDDYYYY, YYYYMMDD, DDMM, MMDD, YYYY) are
// found by scanning digit runs; separated dates (12/05/1990, 1-2-95) by regex.

use regex::Regex;
use std::sync::LazyLock;

/// oldest year treated as plausible
pub const MIN_YEAR: u32 = 1900;
/// newest year treated as plausible
pub const MAX_YEAR: u32 = 2099;

static SEPARATED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})").expect("separated date pattern")
});

/// layout of a detected date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
    DayMonth,
    MonthDay,
    Year,
    Separated,
}

impl DateShape {
    pub fn label(self) -> &'static str {
        match self {
            DateShape::DayMonthYear => "DDMMYYYY",
            DateShape::MonthDayYear => "MMDDYYYY",
            DateShape::YearMonthDay => "YYYYMMDD",
            DateShape::DayMonth => "DDMM",
            DateShape::MonthDay => "MMDD",
            DateShape::Year => "YYYY",
            DateShape::Separated => "separated date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    pub start: usize,
    pub len: usize,
    pub shape: DateShape,
}

fn is_leap(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u32, year: Option<u32>) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => match year {
            Some(y) if !is_leap(y) => 28,
            _ => 29,
        },
        _ => 0,
    }
}

fn valid_day_month(day: u32, month: u32, year: Option<u32>) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(month, year)
}

fn valid_year(year: u32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn number(digits: &[char]) -> u32 {
    digits
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, d| acc * 10 + d)
}

fn match_eight(w: &[char]) -> Option<DateShape> {
    let (head4, tail4) = (number(&w[..4]), number(&w[4..]));
    let (a, b) = (number(&w[..2]), number(&w[2..4]));
    let (c, d) = (number(&w[4..6]), number(&w[6..]));
    if valid_year(head4) && valid_day_month(d, c, Some(head4)) {
        return Some(DateShape::YearMonthDay);
    }
    if valid_year(tail4) && valid_day_month(a, b, Some(tail4)) {
        return Some(DateShape::DayMonthYear);
    }
    if valid_year(tail4) && valid_day_month(b, a, Some(tail4)) {
        return Some(DateShape::MonthDayYear);
    }
    None
}

fn match_four(w: &[char]) -> Option<DateShape> {
    if valid_year(number(w)) {
        return Some(DateShape::Year);
    }
    let (a, b) = (number(&w[..2]), number(&w[2..]));
    if valid_day_month(a, b, None) {
        return Some(DateShape::DayMonth);
    }
    if valid_day_month(b, a, None) {
        return Some(DateShape::MonthDay);
    }
    None
}

/// greedy left-to-right scan of one digit run, preferring 8-digit dates
fn scan_digit_run(chars: &[char], run_start: usize, run_end: usize, out: &mut Vec<DateMatch>) {
    let mut i = run_start;
    while i < run_end {
        if i + 8 <= run_end {
            if let Some(shape) = match_eight(&chars[i..i + 8]) {
                out.push(DateMatch { start: i, len: 8, shape });
                i += 8;
                continue;
            }
        }
        if i + 4 <= run_end {
            if let Some(shape) = match_four(&chars[i..i + 4]) {
                out.push(DateMatch { start: i, len: 4, shape });
                i += 4;
                continue;
            }
        }
        i += 1;
    }
}

fn separated_dates(chars: &[char]) -> Vec<DateMatch> {
    let text: String = chars.iter().collect();
    let mut byte_to_char = vec![0usize; text.len() + 1];
    for (ci, (bi, _)) in text.char_indices().enumerate() {
        byte_to_char[bi] = ci;
    }
    byte_to_char[text.len()] = chars.len();

    let mut out = Vec::new();
    for caps in SEPARATED_DATE.captures_iter(&text) {
        let Some(whole) = caps.get(0) else { continue };
        let start = byte_to_char[whole.start()];
        let end = byte_to_char[whole.end()];
        let flanked_by_digit = (start > 0 && chars[start - 1].is_ascii_digit())
            || chars.get(end).is_some_and(|c| c.is_ascii_digit());
        if flanked_by_digit {
            continue;
        }

        let field = |i: usize| caps.get(i).map(|m| m.as_str().parse::<u32>().unwrap_or(0));
        let (Some(a), Some(b), Some(y)) = (field(1), field(2), field(3)) else {
            continue;
        };
        let year_digits = caps.get(3).map(|m| m.len()).unwrap_or(0);
        let year = if year_digits == 4 {
            if !valid_year(y) {
                continue;
            }
            Some(y)
        } else {
            None
        };
        if valid_day_month(a, b, year) || valid_day_month(b, a, year) {
            out.push(DateMatch {
                start,
                len: end - start,
                shape: DateShape::Separated,
            });
        }
    }
    out
}

/// find date-like substrings, ordered by start offset
pub fn find_dates(chars: &[char]) -> Vec<DateMatch> {
    let mut matches = separated_dates(chars);
    let covered = |pos: usize| matches.iter().any(|m| pos >= m.start && pos < m.start + m.len);

    let mut compact = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() || covered(i) {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() && !covered(i) {
            i += 1;
        }
        scan_digit_run(chars, run_start, i, &mut compact);
    }

    matches.extend(compact);
    matches.sort_by_key(|m| m.start);
    matches
}
