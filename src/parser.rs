use crate::error::{Result, SubfmtError};
use crate::segment::Segment;

use std::time::Duration;

use log::debug;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::character::complete::{char, digit1, one_of, space1};
use nom::combinator::{eof, map, map_res, rest, verify};
use nom::sequence::{preceded, separated_pair, tuple};
use nom::IResult;

/// Reads SubRip or WebVTT cues into segments, in file order.
///
/// Cues are blocks separated by blank lines. A cue may start with an
/// identifier line (the SubRip sequence number, or an optional WebVTT cue
/// id), followed by the timing line and any number of text lines. A leading
/// `WEBVTT` header and WebVTT `NOTE`, `STYLE` and `REGION` blocks are skipped.
pub fn parse_cues(input: &str) -> Result<Vec<Segment>> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let mut subs = Vec::new();
    for (n, block) in blocks(input).iter().enumerate() {
        let first = block.lines[0];
        if n == 0 && first.starts_with("WEBVTT") {
            continue;
        }
        if is_metadata(first) {
            continue;
        }
        subs.push(cue(block)?);
    }
    debug!("Parsed {} cues", subs.len());
    Ok(subs)
}

/// Parses a JSON array of `{start, end, content}` objects.
pub fn parse_json(input: &str) -> Result<Vec<Segment>> {
    let subs: Vec<Segment> = serde_json::from_str(input)?;
    debug!("Parsed {} segments from JSON", subs.len());
    Ok(subs)
}

struct Block<'a> {
    /// 1-based line number of the first line.
    line: usize,
    lines: Vec<&'a str>,
}

fn blocks(input: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            blocks.extend(current.take());
        } else {
            current
                .get_or_insert_with(|| Block {
                    line: i + 1,
                    lines: Vec::new(),
                })
                .lines
                .push(line);
        }
    }
    blocks.extend(current);
    blocks
}

fn is_metadata(line: &str) -> bool {
    line == "NOTE" || line.starts_with("NOTE ") || line == "STYLE" || line == "REGION"
}

fn cue(block: &Block) -> Result<Segment> {
    let timing_at = if block.lines[0].contains("-->") { 0 } else { 1 };
    let line_no = block.line + timing_at;
    let timing = block.lines.get(timing_at).ok_or_else(|| {
        SubfmtError::Parse(format!("line {}: expected a cue timing line", line_no))
    })?;
    let (show_at, hide_at) = match cue_timing(timing) {
        Ok((_, times)) => times,
        Err(_) => {
            return Err(SubfmtError::Parse(format!(
                "line {}: invalid cue timing '{}'",
                line_no, timing
            )))
        }
    };
    let text = block.lines[timing_at + 1..].join("\n");
    Ok(Segment::new(to_secs(show_at), to_secs(hide_at), text))
}

fn to_secs(ts: Duration) -> f64 {
    ts.as_millis() as f64 / 1000.0
}

fn cue_timing(input: &str) -> IResult<&str, (Duration, Duration)> {
    let (input, times) =
        separated_pair(timestamp, tuple((space1, tag("-->"), space1)), timestamp)(input)?;
    // WebVTT cue settings may follow the end time.
    let (input, _) = alt((eof, preceded(space1, rest)))(input)?;
    Ok((input, times))
}

/// `H+:MM:SS,mmm` as written by SubRip, or the WebVTT short form `MM:SS.mmm`.
/// Either `,` or `.` separates the fraction.
fn timestamp(input: &str) -> IResult<&str, Duration> {
    let with_hours = tuple((
        hours,
        preceded(char(':'), sexagesimal),
        preceded(char(':'), sexagesimal),
        fraction,
    ));
    let without_hours = map(
        tuple((sexagesimal, preceded(char(':'), sexagesimal), fraction)),
        |(m, s, f)| (0, m, s, f),
    );
    map(
        alt((with_hours, without_hours)),
        |(h, m, s, millis)| Duration::from_millis(((h * 60 + m) * 60 + s) * 1000 + millis),
    )(input)
}

const MAX_HOURS: u64 = 1_000_000;

fn hours(input: &str) -> IResult<&str, u64> {
    verify(map_res(digit1, |s: &str| s.parse::<u64>()), |h: &u64| {
        *h <= MAX_HOURS
    })(input)
}

fn sexagesimal(input: &str) -> IResult<&str, u64> {
    verify(
        map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
            s.parse::<u64>()
        }),
        |v: &u64| *v < 60,
    )(input)
}

/// Milliseconds. Short fractions are scaled, so `,2` means 200 ms.
fn fraction(input: &str) -> IResult<&str, u64> {
    preceded(
        one_of(",."),
        map_res(take_while_m_n(1, 3, |c: char| c.is_ascii_digit()), |s: &str| {
            s.parse::<u64>()
                .map(|v| v * 10u64.pow(3 - s.len() as u32))
        }),
    )(input)
}
