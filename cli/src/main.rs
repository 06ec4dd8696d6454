mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, ip, mac};
use ipgen_common::config::Config;
use terminal::{logging, print};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.quiet);

    match run(commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(commands: CommandLine) -> anyhow::Result<()> {
    let quiet = commands.quiet;

    match commands.command {
        Commands::Ip(args) => {
            let cfg = Config {
                quiet,
                preview: args.output.preview,
                delimiter: ip::delimiter_byte(args.delimiter)?,
                ip_column: args.column.clone(),
                ..Config::default()
            };
            print::header("collecting addresses", quiet);
            ip::ip(args, &cfg)
        }
        Commands::Mac(args) => {
            let cfg = Config {
                quiet,
                preview: args.output.preview,
                mac_column: args.column.clone(),
                ..Config::default()
            };
            print::header("collecting mac addresses", quiet);
            mac::mac(args, &cfg)
        }
    }
}
