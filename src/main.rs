//! Replay a text capture of fragments and print the reassembled packets.

mod cli;

use std::{fs, process::ExitCode};

use clap::Parser;
use cli::{ChecksumArg, Cli, DuplicatesArg, OrderArg};
use packet_receiver::{
    checksum::{Fnv1a64, StdHash},
    reassembly::{AssemblyOrder, DuplicatePolicy, ReassemblyBuffer, ReassemblyConfig},
    replay::{ReplayReport, ReplayScript},
};

fn main() -> ExitCode {
    // Keep stdout for the report; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let script: ReplayScript = fs::read_to_string(&cli.script)?.parse()?;
    let config = config_from(cli);

    let report = match cli.checksum {
        ChecksumArg::Fnv1a => {
            script.run(&mut ReassemblyBuffer::with_checksum_and_config(Fnv1a64, config))
        }
        ChecksumArg::Std => {
            script.run(&mut ReassemblyBuffer::with_checksum_and_config(StdHash, config))
        }
    };
    tracing::info!(
        events = script.events().len(),
        packets = report.packets.len(),
        failed_parts = report.failed_parts,
        "replay finished"
    );

    print_report(&report, cli.json)
}

fn config_from(cli: &Cli) -> ReassemblyConfig {
    let order = match cli.order {
        OrderArg::Arrival => AssemblyOrder::Arrival,
        OrderArg::Sequence => AssemblyOrder::SequenceId,
    };
    let duplicates = match cli.duplicates {
        DuplicatesArg::Keep => DuplicatePolicy::Keep,
        DuplicatesArg::Replace => DuplicatePolicy::Replace,
    };
    ReassemblyConfig { order, duplicates }
}

fn print_report(report: &ReplayReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for packet in &report.packets {
        println!("{packet}");
    }
    println!("failed parts: {}", report.failed_parts);
    Ok(())
}
