pub mod ip;
pub mod mac;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use ipgen_common::Notation;
use ipgen_common::config::{DEFAULT_IP_COLUMN, DEFAULT_MAC_COLUMN, DEFAULT_PREVIEW};
use ipgen_core::codec::Format;

#[derive(Parser)]
#[command(name = "ipgen", version)]
#[command(about = "Builds IP and MAC address lists from compact notations.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: -q prints only the summary, -qq only errors
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect IP addresses
    #[command(alias = "i")]
    Ip(IpArgs),
    /// Collect MAC addresses
    #[command(alias = "m")]
    Mac(MacArgs),
}

#[derive(Args)]
pub struct IpArgs {
    /// Addresses, ranges, CIDR blocks, gateway/mask or ip~wildcard, comma separated
    pub targets: Vec<Notation>,

    /// Address and wildcard mask, e.g. 10.0.0.0 0.0.0.255
    #[arg(long, num_args = 2, value_names = ["IP", "MASK"], action = ArgAction::Append)]
    pub wildcard: Vec<String>,

    /// Gateway and subnet mask, e.g. 192.168.1.1 255.255.255.0
    #[arg(long, num_args = 2, value_names = ["GW", "MASK"], action = ArgAction::Append)]
    pub gateway: Vec<String>,

    /// Import addresses from a file (format from extension)
    #[arg(short, long, value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Remove addresses, using the same notation as targets
    #[arg(short = 'x', long, value_name = "TARGET")]
    pub exclude: Vec<Notation>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Separator for CSV input and output
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Column header for tabular formats
    #[arg(short, long, default_value = DEFAULT_IP_COLUMN)]
    pub column: String,
}

#[derive(Args)]
pub struct MacArgs {
    /// Add a MAC address (XX:XX:XX:XX:XX:XX)
    #[arg(short, long, value_name = "MAC")]
    pub add: Vec<String>,

    /// Generate N random addresses not yet collected
    #[arg(short, long, value_name = "N")]
    pub random: Option<u64>,

    /// Generate COUNT consecutive addresses from START
    #[arg(short, long, num_args = 2, value_names = ["START", "COUNT"])]
    pub sequential: Option<Vec<String>>,

    /// Import addresses from a file (format from extension)
    #[arg(short, long, value_name = "FILE")]
    pub input: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Column header for tabular formats
    #[arg(short, long, default_value = DEFAULT_MAC_COLUMN)]
    pub column: String,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Write the expanded list to a file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long)]
    pub format: Option<Format>,

    /// How many entries to show in the terminal
    #[arg(short, long, default_value_t = DEFAULT_PREVIEW)]
    pub preview: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
