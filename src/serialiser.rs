use crate::segment::{Padding, Segment};

use std::fmt::{self, Write};
use std::time::Duration;

const SRT_SEPARATOR: char = ',';
const VTT_SEPARATOR: char = '.';
const VTT_HEADER: &str = "WEBVTT\n\n";

pub fn write_srt<W: Write>(buf: &mut W, subs: &[Segment], padding: Padding) -> fmt::Result {
    write_cues(buf, subs, padding, SRT_SEPARATOR)
}

pub fn write_vtt<W: Write>(buf: &mut W, subs: &[Segment], padding: Padding) -> fmt::Result {
    buf.write_str(VTT_HEADER)?;
    write_cues(buf, subs, padding, VTT_SEPARATOR)
}

fn write_cues<W: Write>(
    buf: &mut W,
    subs: &[Segment],
    padding: Padding,
    separator: char,
) -> fmt::Result {
    for (i, sub) in subs.iter().enumerate() {
        if i > 0 {
            writeln!(buf)?;
        }
        write_cue(buf, i + 1, sub, padding, separator)?;
    }
    Ok(())
}

fn write_cue<W: Write>(
    buf: &mut W,
    index: usize,
    sub: &Segment,
    padding: Padding,
    separator: char,
) -> fmt::Result {
    let (show_at, hide_at) = padding.apply(sub);
    writeln!(buf, "{}", index)?;
    write_ts(buf, show_at, separator)?;
    write!(buf, " --> ")?;
    write_ts(buf, hide_at, separator)?;
    writeln!(buf)?;
    writeln!(buf, "{}", sub.text)?;
    Ok(())
}

fn write_ts<W: Write>(buf: &mut W, timestamp: Duration, separator: char) -> fmt::Result {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.as_millis() % 1000;
    write!(
        buf,
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, seconds, separator, millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::time::Duration;

    macro_rules! test_write_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, separator, expected) = $value;

                let ts = Duration::from_millis(input);
                let mut buf = String::new();

                write_ts(&mut buf, ts, separator).expect("Failed to write to buffer");

                assert_eq!(buf, expected);
            }
        )*
        }
    }

    test_write_ts! {
        test_write_ts_0: (0, ',', "00:00:00,000"),
        test_write_ts_1: (1, ',', "00:00:00,001"),
        test_write_ts_2: (999, ',', "00:00:00,999"),
        test_write_ts_3: (1000, ',', "00:00:01,000"),
        test_write_ts_4: (59_999, ',', "00:00:59,999"),
        test_write_ts_5: (60_000, ',', "00:01:00,000"),
        test_write_ts_6: (3_600_000, ',', "01:00:00,000"),
        test_write_ts_7: (7_326_159, ',', "02:02:06,159"),
        test_write_ts_8: (360_000_001, ',', "100:00:00,001"),
        test_write_ts_9: (1500, '.', "00:00:01.500"),
        test_write_ts_10: (34_380_001, '.', "09:33:00.001"),
    }

    fn srt(subs: &[Segment], padding: Padding) -> String {
        let mut buf = String::new();
        write_srt(&mut buf, subs, padding).unwrap();
        buf
    }

    fn vtt(subs: &[Segment], padding: Padding) -> String {
        let mut buf = String::new();
        write_vtt(&mut buf, subs, padding).unwrap();
        buf
    }

    fn sample() -> Vec<Segment> {
        vec![
            Segment::new(0.0, 1.5, "hello"),
            Segment::new(1.5, 3.25, "two\nlines"),
            Segment::new(62.0, 3725.125, "later"),
        ]
    }

    #[test]
    fn single_srt_block() {
        let out = srt(&[Segment::new(0.0, 1.5, "hello")], Padding::default());
        assert_eq!(out, "1\n00:00:00,000 --> 00:00:01,500\nhello\n");
    }

    #[test]
    fn empty_input_gives_empty_srt() {
        assert_eq!(srt(&[], Padding::default()), "");
        assert_eq!(vtt(&[], Padding::default()), "WEBVTT\n\n");
    }

    #[test]
    fn srt_block_count_matches_segments() {
        let subs = sample();
        let out = srt(&subs, Padding::default());
        let blocks: Vec<&str> = out.trim_end().split("\n\n").collect();
        assert_eq!(blocks.len(), subs.len());

        let time_line = Regex::new(r"^\d{2,}:\d{2}:\d{2},\d{3} --> \d{2,}:\d{2}:\d{2},\d{3}$").unwrap();
        for (i, block) in blocks.iter().enumerate() {
            let mut lines = block.lines();
            assert_eq!(lines.next(), Some((i + 1).to_string().as_str()));
            assert!(time_line.is_match(lines.next().unwrap()));
        }
    }

    #[test]
    fn srt_applies_padding() {
        let pad = Padding::new(2.0, 1.0).unwrap();
        let out = srt(&[Segment::new(5.0, 10.0, "x")], pad);
        assert!(out.contains("00:00:03,000 --> 00:00:11,000"));

        let pad = Padding::new(7.0, 0.0).unwrap();
        let out = srt(&[Segment::new(5.0, 10.0, "x")], pad);
        assert!(out.contains("00:00:00,000 --> 00:00:10,000"));
    }

    #[test]
    fn vtt_matches_srt_with_dots() {
        let subs = sample();
        let pad = Padding::new(0.25, 0.5).unwrap();
        let expected = format!("WEBVTT\n\n{}", srt(&subs, pad).replace(',', "."));
        assert_eq!(vtt(&subs, pad), expected);
    }

    #[test]
    fn vtt_keeps_commas_in_text() {
        let out = vtt(&[Segment::new(0.0, 1.0, "well, hello")], Padding::default());
        assert_eq!(out, "WEBVTT\n\n1\n00:00:00.000 --> 00:00:01.000\nwell, hello\n");
    }
}
