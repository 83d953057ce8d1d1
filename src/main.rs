//! CLI binary for GPS Log Export
//!
//! Decodes one or more binary GPS logs and writes the requested exports.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use glob::glob;
use gps_log_export::{
    decode_file, export_log, render_text, DecodeOptions, DisplayZone, ExportOptions, MapOptions,
    OrderingPolicy, RecordSchema, TextOptions, TruncationPolicy,
};
use std::io::Write;
use std::path::{Path, PathBuf};

fn build_command() -> Command {
    Command::new("GPS Log Export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode binary GPS recorder logs. Output to text, HTML map, KML, GPX or CSV.")
        .arg(
            Arg::new("files")
                .help("GPS log files to decode (supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("schema")
                .long("schema")
                .help("Record layout: minimal (24 B), speed (28 B), full (44 B) or recorder (52 B)")
                .value_name("SCHEMA")
                .default_value("recorder"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .help("Print one line per sample to stdout (default when no export is selected)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("text-file")
                .long("text-file")
                .help("Write the text lines to <name>.txt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .help("Write an interactive HTML map to <name>.map.html")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-open")
                .long("no-open")
                .help("Do not open the generated map in the default browser")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stride")
                .long("stride")
                .help("Keep every Nth sample on the map")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("kml")
                .long("kml")
                .help("Export the track to KML")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export the track to GPX")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export decoded samples to CSV")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Enable every file export (text file, map, KML, GPX, CSV)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("legacy-names")
                .long("legacy-names")
                .help("Name KML/GPX output exported_data.kml / exported_data.gpx")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("order")
                .long("order")
                .help("Sample ordering: preserve file order, sort by timestamp, or validate")
                .value_name("POLICY")
                .default_value("preserve"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when the file length is not a multiple of the record size")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("utc")
                .long("utc")
                .help("Show text and map timestamps in UTC instead of local time")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("full-precision")
                .long("full-precision")
                .help("Print latitude/longitude unrounded in text output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Expand glob patterns and drop paths that do not exist
fn collect_input_paths(patterns: &[&String]) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in patterns {
        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        log::debug!("Glob pattern '{pattern}' matched {} files", paths.len());
                        paths
                    }
                    Err(e) => {
                        log::error!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    log::error!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern.as_str())]
        };

        for path in paths {
            if !path.is_file() {
                log::warn!("File does not exist: {}", path.display());
                continue;
            }
            valid_paths.push(path);
        }
    }

    valid_paths
}

fn decode_options(matches: &ArgMatches) -> Result<DecodeOptions> {
    let schema: RecordSchema = matches
        .get_one::<String>("schema")
        .map(String::as_str)
        .unwrap_or("recorder")
        .parse()?;
    let ordering: OrderingPolicy = matches
        .get_one::<String>("order")
        .map(String::as_str)
        .unwrap_or("preserve")
        .parse()?;
    let truncation = if matches.get_flag("strict") {
        TruncationPolicy::Reject
    } else {
        TruncationPolicy::Warn
    };

    Ok(DecodeOptions {
        schema,
        ordering,
        truncation,
    })
}

fn export_options(matches: &ArgMatches) -> ExportOptions {
    let all = matches.get_flag("all");
    let zone = if matches.get_flag("utc") {
        DisplayZone::Utc
    } else {
        DisplayZone::Local
    };

    ExportOptions {
        text: all || matches.get_flag("text-file"),
        map: all || matches.get_flag("map"),
        kml: all || matches.get_flag("kml"),
        gpx: all || matches.get_flag("gpx"),
        csv: all || matches.get_flag("csv"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        legacy_names: matches.get_flag("legacy-names"),
        text_options: TextOptions {
            zone,
            full_precision: matches.get_flag("full-precision"),
        },
        map_options: MapOptions {
            stride: matches.get_one::<usize>("stride").copied().unwrap_or(1),
            zone,
            ..MapOptions::default()
        },
    }
}

/// The map opens in the browser only when it is written and not opted out
fn should_open_map(matches: &ArgMatches, export_options: &ExportOptions) -> bool {
    export_options.map && !matches.get_flag("no-open")
}

fn open_in_browser(path: &Path) {
    match open::that(path) {
        Ok(()) => log::debug!("Opened map in browser: {}", path.display()),
        Err(e) => log::warn!("Could not open {} in a browser: {e}", path.display()),
    }
}

fn process_file(
    path: &Path,
    decode_options: &DecodeOptions,
    export_options: &ExportOptions,
    print_text: bool,
    open_map: bool,
) -> Result<()> {
    let log = decode_file(path, decode_options)
        .with_context(|| format!("Failed to decode GPS log: {}", path.display()))?;

    log::info!(
        "Decoded {} samples ({} schema, {:.1} s)",
        log.len(),
        log.schema,
        log.duration_seconds()
    );

    if print_text {
        let text = render_text(&log.samples, &export_options.text_options)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }

    let report = export_log(&log, path, export_options)
        .with_context(|| format!("Failed to export GPS log: {}", path.display()))?;
    log::debug!("Wrote {} files", report.written().count());

    if open_map {
        if let Some(map_path) = &report.map_path {
            open_in_browser(map_path);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"));

    log::debug!(
        "gps_log_export {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown revision")
    );

    let decode_options = decode_options(&matches)?;
    let export_options = export_options(&matches);
    let any_file_export = export_options.text
        || export_options.map
        || export_options.kml
        || export_options.gpx
        || export_options.csv;
    let print_text = matches.get_flag("text") || !any_file_export;
    let open_map = should_open_map(&matches, &export_options);

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();
    let valid_paths = collect_input_paths(&file_patterns);

    if valid_paths.is_empty() {
        log::error!("No valid files found to process. Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for path in &valid_paths {
        log::info!("Processing: {}", path.display());
        match process_file(path, &decode_options, &export_options, print_text, open_map) {
            Ok(()) => processed_files += 1,
            Err(e) => {
                log::error!("{e:#}");
                log::error!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        log::error!(
            "No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
