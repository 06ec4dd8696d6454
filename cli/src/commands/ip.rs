use std::path::Path;

use anyhow::{Context, bail};
use colored::*;
use ipgen_common::config::Config;
use ipgen_common::{AddressCollector, AddressFamily, AddressValue, success, warn};
use ipgen_core::codec::Format;

use crate::commands::IpArgs;
use crate::terminal::{colors, print, spinner};

pub fn ip(args: IpArgs, cfg: &Config) -> anyhow::Result<()> {
    let mut collection = collect(&args, cfg)?;

    for notation in &args.exclude {
        notation.exclude(&mut collection)?;
    }

    show(&collection, cfg);

    if let Some(path) = &args.output.output {
        export(&collection, path, args.output.format, cfg)?;
    }
    Ok(())
}

/// Converts the CSV delimiter flag into the single byte the codecs expect.
pub fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    if !delimiter.is_ascii() || delimiter == '\n' || delimiter == '"' {
        bail!("delimiter must be a single ASCII character other than newline or quote, got '{delimiter}'");
    }
    Ok(delimiter as u8)
}

fn collect(args: &IpArgs, cfg: &Config) -> anyhow::Result<AddressCollector> {
    let mut collection = args
        .input
        .iter()
        .map(|path| import(path, cfg))
        .collect::<anyhow::Result<AddressCollector>>()?;

    for notation in &args.targets {
        notation.apply(&mut collection)?;
    }
    for pair in args.wildcard.chunks_exact(2) {
        collection.add_wildcard(&pair[0], &pair[1])?;
    }
    for pair in args.gateway.chunks_exact(2) {
        collection.add_gateway_subnet(&pair[0], &pair[1])?;
    }
    Ok(collection)
}

fn import(path: &Path, cfg: &Config) -> anyhow::Result<AddressCollector> {
    let (bytes, format) = ipgen_core::read_file(path, None)?;
    let collection = ipgen_core::import_addresses(&bytes, format, cfg)
        .with_context(|| format!("importing {}", path.display()))?;
    success!("Imported {} addresses from {}", collection.len(), path.display());
    Ok(collection)
}

fn show(collection: &AddressCollector, cfg: &Config) {
    let total = collection.len();
    if total == 0 {
        warn!("The collection is empty");
        return;
    }

    if cfg.quiet == 0 {
        print::header("address collection", cfg.quiet);
        for addr in collection.generate().take(cfg.preview) {
            print::print_status(format_address(&addr).to_string());
        }
        let shown = total.min(cfg.preview as u128);
        if total > shown {
            print::print_status(format!("... {} more", total - shown).dimmed().to_string());
        }
        print::fat_separator();
    }

    print::summary(&[("Addresses", total.to_string()), ("Blocks", collection.ranges().len().to_string())]);
}

fn export(collection: &AddressCollector, path: &Path, format: Option<Format>, cfg: &Config) -> anyhow::Result<()> {
    let format = ipgen_core::resolve_format(path, format)?;
    let bytes = spinner::run(&format!("Writing {format} export..."), cfg.quiet, || {
        ipgen_core::export_addresses(collection, format, cfg)
    })?;
    ipgen_core::write_file(path, &bytes)?;
    success!("Saved {} addresses to {}", collection.len(), path.display());
    Ok(())
}

fn format_address(addr: &AddressValue) -> ColoredString {
    match addr.family() {
        AddressFamily::V4 => addr.to_string().color(colors::IPV4_ADDR),
        AddressFamily::V6 => addr.to_string().color(colors::IPV6_ADDR),
    }
}
