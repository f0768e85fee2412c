//! Render timed text segments as SRT, WebVTT, JSON or plain text.
//!
//! ```
//! use subfmt::{Format, Padding, Segment};
//!
//! let subs = vec![Segment::from(((0.0, 1.5), "hello"))];
//! let srt = Format::Srt.generate(&subs, Padding::default()).unwrap();
//! assert_eq!(srt, "1\n00:00:00,000 --> 00:00:01,500\nhello\n");
//! ```

mod error;
mod format;
mod parser;
mod segment;
mod serialiser;

pub use crate::error::{Result, SubfmtError};
pub use crate::format::Format;
pub use crate::parser::{parse_cues, parse_json};
pub use crate::segment::{Padding, Segment, MAX_SECONDS};
