//! FX tool: compares remittance providers, quotes conversions and intra-Africa
//! transfers, manages rate alerts and expense reports, and streams live rates.
//!
//! Usage example (CLI):
//! ```bash
//! fx_cli compare USD-GHS --criterion fee --order lowest
//! fx_cli board USD-GHS --filter lowest-fee --sort rate
//! fx_cli convert USD-GHS 100 --provider Wise
//! fx_cli remit Nigeria Ghana 1000 --method wallet
//! fx_cli watch --path ./pairs.txt --interval-ms 500
//! ```
//!
//! The pairs file holds one `FROM-TO` pair per line; see `fx_common::pair`.
#![warn(missing_docs)]
mod args;
mod commands;

use std::path::PathBuf;

use clap::Parser;
use fx_common::catalog::Catalog;
use fx_common::compare::ComparisonQuery;
use fx_common::prefs::PreferenceStore;
use fx_common::{FxError, Result};
use log::debug;

use crate::args::{Args, Command};

fn main() -> Result<(), FxError> {
    init_logger();
    let args = Args::parse();
    debug!("{:?}", args);
    run(args)
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Rates { search } => commands::rates(search.as_deref()),
        Command::Compare {
            pair,
            criterion,
            order,
            fee_threshold,
            time_threshold,
        } => {
            let catalog = Catalog::builtin(args.seed)?;
            let query = ComparisonQuery {
                criterion,
                order,
                fee_threshold,
                time_threshold,
            };
            commands::compare_offers(&catalog, pair, query);
        }
        Command::Board { pair, filter, sort } => {
            let catalog = Catalog::builtin(args.seed)?;
            commands::board(&catalog, pair, filter, sort)?;
        }
        Command::Convert {
            pair,
            amount,
            provider,
        } => {
            let catalog = Catalog::builtin(args.seed)?;
            commands::convert(&catalog, pair, amount, &provider)?;
        }
        Command::Remit {
            from,
            to,
            amount,
            method,
        } => commands::remit(&from, &to, amount, method)?,
        Command::Alerts { action } => commands::alerts(action)?,
        Command::Expenses { base, range, json } => commands::expenses(base, range, json)?,
        Command::History { pair, frame, chart } => commands::history(pair, frame, chart, args.seed),
        Command::Prefs { action } => {
            let store = PreferenceStore::new(normalize_path(&args.prefs));
            commands::prefs(&store, action)?;
        }
        Command::Watch {
            path,
            interval_ms,
            json,
        } => commands::watch(path.as_deref(), interval_ms, json)?,
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_strips_quotes() {
        assert_eq!(normalize_path("  \"C:\\fx\\pairs.txt\" "), PathBuf::from("C:\\fx\\pairs.txt"));
        assert_eq!(normalize_path("pairs.txt"), PathBuf::from("pairs.txt"));
    }

    #[test]
    fn test_args_parse_compare() {
        let args = Args::try_parse_from(["fx_cli", "compare", "USD-GHS", "--criterion", "fee", "--order", "lowest"]).unwrap();
        match args.command {
            Command::Compare { pair, fee_threshold, .. } => {
                assert_eq!(pair.to_string(), "USD-GHS");
                assert_eq!(fee_threshold, 100.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.prefs, "fx_prefs.json");
    }

    #[test]
    fn test_args_parse_board() {
        let args = Args::try_parse_from(["fx_cli", "board", "USD-GHS", "--filter", "lowest-fee", "--sort", "fee"]).unwrap();
        match args.command {
            Command::Board { filter, sort, .. } => {
                assert_eq!(filter, Some(fx_common::board::BoardFilter::LowestFee));
                assert_eq!(sort, Some(fx_common::board::BoardSort::Fee));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_args_reject_bad_pair() {
        assert!(Args::try_parse_from(["fx_cli", "convert", "USD", "100"]).is_err());
    }
}
