//! Command line interface for the `packet-receiver` binary.
//!
//! Kept free of crate-internal types so the build script can render the man
//! page from it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command line arguments for the `packet-receiver` binary.
#[derive(Debug, Parser)]
#[command(
    name = "packet-receiver",
    version,
    about = "Replay a fragment capture through a reassembly buffer"
)]
pub struct Cli {
    /// Replay script with one `start` or `part` event per line.
    pub script: PathBuf,
    /// Order in which fragments are concatenated.
    #[arg(long, value_enum, default_value_t = OrderArg::Arrival)]
    pub order: OrderArg,
    /// Handling of repeated sequence ids within a packet.
    #[arg(long, value_enum, default_value_t = DuplicatesArg::Keep)]
    pub duplicates: DuplicatesArg,
    /// Integrity function used to validate control sums.
    #[arg(long, value_enum, default_value_t = ChecksumArg::Fnv1a)]
    pub checksum: ChecksumArg,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Values accepted by `--order`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Acceptance order.
    Arrival,
    /// Ascending sequence id.
    Sequence,
}

/// Values accepted by `--duplicates`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    /// Store repeated ids again.
    Keep,
    /// Overwrite the earlier fragment.
    Replace,
}

/// Values accepted by `--checksum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChecksumArg {
    /// 64-bit FNV-1a.
    Fnv1a,
    /// The standard library's default hasher.
    Std,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_match_literal_reassembly() {
        let cli = Cli::parse_from(["packet-receiver", "capture.txt"]);
        assert_eq!(cli.script, PathBuf::from("capture.txt"));
        assert_eq!(cli.order, OrderArg::Arrival);
        assert_eq!(cli.duplicates, DuplicatesArg::Keep);
        assert_eq!(cli.checksum, ChecksumArg::Fnv1a);
        assert!(!cli.json);
    }

    #[test]
    fn parses_policy_flags() {
        let cli = Cli::parse_from([
            "packet-receiver",
            "capture.txt",
            "--order",
            "sequence",
            "--duplicates",
            "replace",
            "--checksum",
            "std",
            "--json",
        ]);
        assert_eq!(cli.order, OrderArg::Sequence);
        assert_eq!(cli.duplicates, DuplicatesArg::Replace);
        assert_eq!(cli.checksum, ChecksumArg::Std);
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_order() {
        let result = Cli::try_parse_from(["packet-receiver", "capture.txt", "--order", "random"]);
        assert!(result.is_err());
    }
}
