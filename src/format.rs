use crate::error::{Result, SubfmtError};
use crate::segment::{Padding, Segment};
use crate::serialiser;

use std::fmt;
use std::io;
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

/// The output formats a subtitle sequence can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Srt,
    Vtt,
    Json,
    Raw,
}

const FORMATS: &[(&str, Format)] = &[
    ("srt", Format::Srt),
    ("vtt", Format::Vtt),
    ("json", Format::Json),
    ("raw", Format::Raw),
];

impl Format {
    /// Looks up a format by its registry key.
    pub fn lookup(key: &str) -> Result<Format> {
        FORMATS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, format)| *format)
            .ok_or_else(|| SubfmtError::UnknownFormat(key.to_string()))
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        FORMATS.iter().map(|(k, _)| *k)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Format::Srt => "srt",
            Format::Vtt => "vtt",
            Format::Json => "json",
            Format::Raw => "raw",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Srt => "srt",
            Format::Vtt => "vtt",
            Format::Json => "json",
            Format::Raw => "txt",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "srt" => Some(Format::Srt),
            "vtt" => Some(Format::Vtt),
            "json" => Some(Format::Json),
            "txt" => Some(Format::Raw),
            _ => None,
        }
    }

    /// Renders `subs` in this format. Every segment is validated before any
    /// output is produced. Padding only affects SRT and WebVTT.
    pub fn generate(&self, subs: &[Segment], padding: Padding) -> Result<String> {
        for (i, sub) in subs.iter().enumerate() {
            sub.validate(i + 1)?;
        }
        debug!("Rendering {} segments as {}", subs.len(), self);

        match self {
            Format::Srt => {
                let mut out = String::new();
                serialiser::write_srt(&mut out, subs, padding)?;
                Ok(out)
            }
            Format::Vtt => {
                let mut out = String::new();
                serialiser::write_vtt(&mut out, subs, padding)?;
                Ok(out)
            }
            Format::Json => json(subs),
            Format::Raw => Ok(raw(subs)),
        }
    }
}

/// JSON laid out with `", "` and `": "` separators, whole numbers written
/// without a fraction, and non-ASCII text left unescaped.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
    ) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_f64<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        value: f64,
    ) -> io::Result<()> {
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            self.write_i64(writer, value as i64)
        } else {
            CompactFormatter.write_f64(writer, value)
        }
    }
}

fn json(subs: &[Segment]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    subs.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|_| SubfmtError::Render(fmt::Error))
}

fn raw(subs: &[Segment]) -> String {
    subs.iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Format {
    type Err = SubfmtError;

    fn from_str(s: &str) -> Result<Self> {
        Format::lookup(s)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}
