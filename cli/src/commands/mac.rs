use std::path::Path;

use anyhow::Context;
use colored::*;
use ipgen_common::config::Config;
use ipgen_common::{MacCollector, success, warn};
use ipgen_core::codec::Format;

use crate::commands::MacArgs;
use crate::terminal::{colors, print, spinner};

pub fn mac(args: MacArgs, cfg: &Config) -> anyhow::Result<()> {
    let mut collection = MacCollector::new();

    for path in &args.input {
        let (bytes, format) = ipgen_core::read_file(path, None)?;
        let imported = ipgen_core::import_macs(&bytes, format, cfg)
            .with_context(|| format!("importing {}", path.display()))?;
        success!("Imported {} MAC addresses from {}", imported.len(), path.display());
        collection.add_macs(imported.to_strings())?;
    }

    collection.add_macs(&args.add)?;

    if let Some([start, count]) = args.sequential.as_deref() {
        let count: u64 = count
            .parse()
            .with_context(|| format!("invalid sequential count '{count}'"))?;
        collection.generate_sequential_macs(start, count)?;
    }

    if let Some(count) = args.random {
        collection.generate_random_macs(count)?;
    }

    show(&collection, cfg);

    if let Some(path) = &args.output.output {
        export(&collection, path, args.output.format, cfg)?;
    }
    Ok(())
}

fn show(collection: &MacCollector, cfg: &Config) {
    let total = collection.len();
    if total == 0 {
        warn!("The collection is empty");
        return;
    }

    if cfg.quiet == 0 {
        print::header("mac collection", cfg.quiet);
        for mac in collection.iter().take(cfg.preview) {
            print::print_status(mac.to_string().color(colors::MAC_ADDR).to_string());
        }
        if total > cfg.preview {
            print::print_status(format!("... {} more", total - cfg.preview).dimmed().to_string());
        }
        print::fat_separator();
    }

    print::summary(&[("MAC addresses", total.to_string())]);
}

fn export(collection: &MacCollector, path: &Path, format: Option<Format>, cfg: &Config) -> anyhow::Result<()> {
    let format = ipgen_core::resolve_format(path, format)?;
    let bytes = spinner::run(&format!("Writing {format} export..."), cfg.quiet, || {
        ipgen_core::export_macs(collection, format, cfg)
    })?;
    ipgen_core::write_file(path, &bytes)?;
    success!("Saved {} MAC addresses to {}", collection.len(), path.display());
    Ok(())
}
