//! Text captures of start/part events replayed through a buffer.
//!
//! Each non-blank line not starting with `#` holds one event:
//!
//! ```text
//! start
//! part <sequence-id> <control-sum|*> <payload...>
//! ```
//!
//! The control sum is decimal or `0x`-prefixed hex; `*` stands for the
//! correct checksum of the payload. The payload is everything after the
//! single space following the control sum and may be empty.

use std::str::FromStr;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::{
    checksum::Checksum,
    reassembly::{ControlSum, FailureCounts, ReassemblyBuffer, SequenceId},
};

/// Errors raised while parsing a replay script. Line numbers are 1-based.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The line starts with an unknown command.
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        /// Offending line.
        line: usize,
        /// First word of the line.
        command: String,
    },
    /// A `part` line is missing a field.
    #[error("line {line}: missing {field}")]
    MissingField {
        /// Offending line.
        line: usize,
        /// Name of the absent field.
        field: &'static str,
    },
    /// The sequence id is not a `u16`.
    #[error("line {line}: invalid sequence id `{value}`")]
    InvalidSequenceId {
        /// Offending line.
        line: usize,
        /// Text that failed to parse.
        value: String,
    },
    /// The control sum is neither `*` nor a `u64`.
    #[error("line {line}: invalid control sum `{value}`")]
    InvalidControlSum {
        /// Offending line.
        line: usize,
        /// Text that failed to parse.
        value: String,
    },
    /// A `start` line carries arguments.
    #[error("line {line}: `start` takes no arguments")]
    UnexpectedArguments {
        /// Offending line.
        line: usize,
    },
}

/// Control sum written in a `part` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimedSum {
    /// `*`: use the buffer's checksum of the payload.
    Computed,
    /// An explicit value, correct or not.
    Explicit(ControlSum),
}

/// One replayable event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayEvent {
    /// Begin a new packet.
    Start,
    /// Submit a fragment.
    Part {
        /// Identifier of the fragment.
        sequence_id: SequenceId,
        /// Control sum to submit with the fragment.
        control_sum: ClaimedSum,
        /// Fragment payload.
        payload: Bytes,
    },
}

/// A parsed replay script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayScript {
    events: Vec<ReplayEvent>,
}

/// Buffer state after a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Assembled payloads, decoded as lossy UTF-8.
    pub packets: Vec<String>,
    /// Aggregate rejection count.
    pub failed_parts: u64,
    /// Rejections split by kind.
    pub failures: FailureCounts,
}

impl ReplayReport {
    /// Snapshot the observable state of `buffer`.
    #[must_use]
    pub fn from_buffer<C: Checksum>(buffer: &ReassemblyBuffer<C>) -> Self {
        Self {
            packets: buffer
                .collected_packets()
                .iter()
                .map(|payload| String::from_utf8_lossy(payload).into_owned())
                .collect(),
            failed_parts: buffer.failed_parts(),
            failures: buffer.failure_counts(),
        }
    }
}

impl ReplayScript {
    /// Borrow the parsed events.
    #[must_use]
    pub fn events(&self) -> &[ReplayEvent] { &self.events }

    /// Feed every event into `buffer` and report the resulting state.
    pub fn run<C: Checksum>(&self, buffer: &mut ReassemblyBuffer<C>) -> ReplayReport {
        for event in &self.events {
            match event {
                ReplayEvent::Start => buffer.start_packet(),
                ReplayEvent::Part {
                    sequence_id,
                    control_sum,
                    payload,
                } => {
                    let control_sum = match control_sum {
                        ClaimedSum::Computed => buffer.checksum_of(payload),
                        ClaimedSum::Explicit(sum) => *sum,
                    };
                    buffer.receive_part(*sequence_id, control_sum, payload.clone());
                }
            }
        }
        ReplayReport::from_buffer(buffer)
    }
}

impl FromStr for ReplayScript {
    type Err = ScriptError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut events = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim_start();
            if line.trim_end().is_empty() || line.starts_with('#') {
                continue;
            }
            events.push(parse_event(index + 1, line)?);
        }
        Ok(Self { events })
    }
}

fn parse_event(line_no: usize, line: &str) -> Result<ReplayEvent, ScriptError> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "start" if rest.trim().is_empty() => Ok(ReplayEvent::Start),
        "start" => Err(ScriptError::UnexpectedArguments { line: line_no }),
        "part" => parse_part(line_no, rest),
        other => Err(ScriptError::UnknownCommand {
            line: line_no,
            command: other.to_owned(),
        }),
    }
}

fn parse_part(line_no: usize, rest: &str) -> Result<ReplayEvent, ScriptError> {
    let (id, rest) = rest.split_once(' ').unwrap_or((rest, ""));
    let (sum, payload) = rest.split_once(' ').unwrap_or((rest, ""));
    if id.is_empty() {
        return Err(ScriptError::MissingField {
            line: line_no,
            field: "sequence id",
        });
    }
    if sum.is_empty() {
        return Err(ScriptError::MissingField {
            line: line_no,
            field: "control sum",
        });
    }

    let sequence_id = id
        .parse::<u16>()
        .map(SequenceId::new)
        .map_err(|_| ScriptError::InvalidSequenceId {
            line: line_no,
            value: id.to_owned(),
        })?;
    let control_sum = parse_sum(sum).ok_or_else(|| ScriptError::InvalidControlSum {
        line: line_no,
        value: sum.to_owned(),
    })?;

    Ok(ReplayEvent::Part {
        sequence_id,
        control_sum,
        payload: Bytes::copy_from_slice(payload.as_bytes()),
    })
}

fn parse_sum(value: &str) -> Option<ClaimedSum> {
    if value == "*" {
        return Some(ClaimedSum::Computed);
    }
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    Some(ClaimedSum::Explicit(ControlSum::new(parsed)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const CAPTURE: &str = "\
# two packets, one corrupted fragment
start
part 2 * World
part 1 * Hello,
part 3 0x0 !

start
part 9 *
";

    #[test]
    fn parses_events_in_order() {
        let script: ReplayScript = CAPTURE.parse().expect("valid script");
        assert_eq!(script.events().len(), 6);
        assert_eq!(script.events()[0], ReplayEvent::Start);
        assert_eq!(
            script.events()[2],
            ReplayEvent::Part {
                sequence_id: SequenceId::new(1),
                control_sum: ClaimedSum::Computed,
                payload: Bytes::from_static(b"Hello,"),
            }
        );
        assert_eq!(
            script.events()[5],
            ReplayEvent::Part {
                sequence_id: SequenceId::new(9),
                control_sum: ClaimedSum::Computed,
                payload: Bytes::new(),
            }
        );
    }

    #[test]
    fn replays_into_buffer() {
        let script: ReplayScript = CAPTURE.parse().expect("valid script");
        let report = script.run(&mut ReassemblyBuffer::new());

        assert_eq!(report.packets, vec!["WorldHello,".to_owned(), String::new()]);
        assert_eq!(report.failed_parts, 1);
        assert_eq!(report.failures.integrity_mismatch, 1);
    }

    #[test]
    fn accepts_decimal_control_sums() {
        let script: ReplayScript = "start\npart 1 12 x".parse().expect("valid script");
        assert!(matches!(
            script.events()[1],
            ReplayEvent::Part {
                control_sum: ClaimedSum::Explicit(sum),
                ..
            } if sum == ControlSum::new(12)
        ));
    }

    #[rstest]
    #[case("stop", ScriptError::UnknownCommand { line: 1, command: "stop".into() })]
    #[case("start now", ScriptError::UnexpectedArguments { line: 1 })]
    #[case("part", ScriptError::MissingField { line: 1, field: "sequence id" })]
    #[case("part 4", ScriptError::MissingField { line: 1, field: "control sum" })]
    #[case("part 70000 * x", ScriptError::InvalidSequenceId { line: 1, value: "70000".into() })]
    #[case("part 1 0xzz x", ScriptError::InvalidControlSum { line: 1, value: "0xzz".into() })]
    #[case("\n\npart 1 -5 x", ScriptError::InvalidControlSum { line: 3, value: "-5".into() })]
    fn reports_malformed_lines(#[case] source: &str, #[case] expected: ScriptError) {
        let err = source
            .parse::<ReplayScript>()
            .expect_err("script must be rejected");
        assert_eq!(err, expected);
    }
}
