// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Thin CLI demonstration of the slic library: walks a file tree, runs the
// detection pipeline across files in parallel, and prints the aggregated
// report as JSON. Traversal policy, report templating, and cross-file
// aggregation policy (year-merging, license-file cross-references) are
// explicitly out of scope; this binary is a demo of the library, not a
// product surface.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::warn;
use rayon::prelude::*;
use walkdir::WalkDir;

use slic::aggregator::Aggregator;
use slic::classifier::Classifier;
use slic::{config, licenses_in};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(help = "Files or directories to scan")]
    paths: Vec<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(
        short,
        long,
        help = "Extract and include license text and copyright lines, not just tags"
    )]
    details: bool,

    #[arg(short, long, help = "Write the JSON report here instead of stdout")]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let level = if verbose >= 3 {
        simplelog::LevelFilter::Trace
    } else if verbose >= 2 {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    simplelog::SimpleLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_level(simplelog::LevelFilter::Debug)
            .set_thread_level(simplelog::LevelFilter::Debug)
            .set_target_level(simplelog::LevelFilter::Debug)
            .set_location_level(simplelog::LevelFilter::Trace)
            .build(),
    )
    .unwrap();
}

/// A quick, caller-side binary-file sniff (null byte in the first KiB):
/// directory traversal and file filtering are explicitly out of the core's
/// scope, so this lives here rather than in the library.
fn is_probably_binary(path: &Path) -> bool {
    let Ok(mut f) = File::open(path) else {
        return false;
    };
    let mut buf = [0u8; 1024];
    let Ok(n) = f.read(&mut buf) else {
        return false;
    };
    buf[..n].contains(&0)
}

fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            if !is_probably_binary(root) {
                files.push(root.clone());
            }
            continue;
        }

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.into_path();
            if !is_probably_binary(&path) {
                files.push(path);
            }
        }
    }
    files
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.paths.is_empty() {
        eprintln!("ERROR: Must provide at least one file or directory to scan");
        process::exit(10);
    }

    let (syntax_table, taxonomy) = config::load_or_default();
    let classifier = match Classifier::build(taxonomy) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: invalid taxonomy: {}", e);
            process::exit(1);
        }
    };

    let files = collect_files(&cli.paths);

    let aggregator = files
        .par_iter()
        .fold(Aggregator::new, |mut agg, path| {
            match licenses_in(path, &syntax_table, &classifier, cli.details) {
                Ok(hits) => {
                    let display_path = path.display().to_string();
                    for hit in hits {
                        agg.add(display_path.clone(), hit);
                    }
                }
                Err(e) => warn!("{}", e),
            }
            agg
        })
        .reduce(Aggregator::new, |mut a, b| {
            a.merge(b);
            a
        });

    let report = aggregator.into_sorted_entries();
    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("ERROR: failed to serialize report: {}", e);
            process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("ERROR: failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", json),
    }
}
