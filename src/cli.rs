use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{ServiceType, ServiceYear};

/// booking-rules - eligibility and pricing for photo/video bookings
#[derive(Parser)]
#[command(name = "booking-rules")]
#[command(about = "Check which services can be booked together and what they cost")]
#[command(version)]
pub struct Cli {
    /// Print JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select services in order and price the result
    Quote {
        /// Service year (2020, 2021 or 2022)
        #[arg(short, long)]
        year: ServiceYear,
        /// Service to select, repeatable (e.g. --service Photography)
        #[arg(short, long = "service")]
        services: Vec<ServiceType>,
    },
    /// Replay a scenario file and price its final selection
    Run {
        /// Path to scenario JSON file
        scenario: PathBuf,
    },
    /// Check that no action in a scenario file is rejected
    Validate {
        /// Path to scenario JSON file
        scenario: PathBuf,
    },
    /// Print the price tables
    Table,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
