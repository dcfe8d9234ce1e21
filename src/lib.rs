pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod fleet;
pub mod roster;

use crate::config::RosterConfig;
use crate::filter::{
    FilterExpression, FilterParseError, filter_warnings, reject_status_terms, to_roster_query,
};
use crate::fleet::{AlertSeverity, Roster, StationStatus, VehicleStatus, load_roster};
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use fleet::{ChargingStation, MaintenanceAlert, RosterError, ScheduledCharge, Vehicle};
pub use roster::{Rosterable, RosterQuery, StatusFilter, filter_roster, matching_indices};

/// Parse the global --filter expression
fn build_filter(filter_expr: Option<&str>, quiet: bool) -> anyhow::Result<FilterExpression> {
    let Some(expr_str) = filter_expr else {
        return Ok(FilterExpression::new());
    };

    let expr = FilterExpression::parse(expr_str).context("Invalid filter expression")?;
    if !quiet {
        for warning in filter_warnings(&expr) {
            eprintln!("{warning}");
        }
    }
    Ok(expr)
}

/// Filter state from config defaults, overridden by per-command flags
fn base_query<S>(
    default_query: &str,
    default_status: &str,
    query: Option<&str>,
    status: Option<&str>,
) -> Result<RosterQuery<S>, FilterParseError>
where
    S: FromStr<Err = FilterParseError> + Copy + PartialEq,
{
    let status = StatusFilter::<S>::from_str(status.unwrap_or(default_status))?;
    Ok(RosterQuery::new()
        .with_query(query.unwrap_or(default_query))
        .with_status(status))
}

fn load_selected_roster(
    roster_path: Option<&Path>,
    config: &RosterConfig,
    verbose: bool,
) -> anyhow::Result<Roster> {
    match roster_path.or(config.roster.path.as_deref()) {
        Some(path) => {
            if verbose {
                eprintln!("Roster file: {}", path.display());
            }
            Ok(load_roster(path)?)
        }
        None => {
            if verbose {
                eprintln!("Roster file: <built-in sample>");
            }
            Ok(Roster::sample())
        }
    }
}

fn warn_row_cap(shown: usize, config: &RosterConfig, quiet: bool) {
    if quiet {
        return;
    }
    if let Some(max) = config.display.max_rows
        && shown > max
    {
        eprintln!(
            "Warning: showing the first {} of {} matching rows (display.max_rows)",
            max, shown
        );
    }
}

fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;
    let format = cli.format;
    let verbose = cli.verbose > 0 && !cli.quiet;
    let quiet = cli.quiet;

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    if verbose {
        eprintln!("Verbosity level: {}", cli.verbose);
        eprintln!("Color mode: {:?}", cli.color);
        eprintln!("Config profile: {}", config.profile_name);
        if let Some(config_path) = &cli.config {
            eprintln!("Config file: {}", config_path.display());
        }
        if let Some(ref filter_expr) = cli.filter {
            eprintln!("Filter: {}", filter_expr);
        }
        if let Some(out_path) = &cli.output {
            eprintln!("Output will be written to: {}", out_path.display());
        }
    }

    let expr = build_filter(cli.filter.as_deref(), quiet)?;

    let output = match &cli.command {
        Commands::Vehicles { query, status } => {
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;
            let base = base_query::<VehicleStatus>(
                &config.defaults.query,
                &config.defaults.vehicle_status,
                query.as_deref(),
                status.as_deref(),
            )
            .context("Invalid vehicle filter")?;
            let query = to_roster_query(&expr, base).context("Invalid filter expression")?;
            if verbose {
                eprintln!("Vehicle filter: query={:?} status={}", query.query, query.status);
            }

            let matches = filter_roster(&roster.vehicles, &query);
            match format {
                OutputFormat::Text => {
                    warn_row_cap(matches.len(), &config, quiet);
                    let mut text = display::format_vehicles_text(
                        &matches,
                        roster.vehicles.len(),
                        &query,
                        &config.display,
                    );
                    if config.display.show_summary && !matches.is_empty() {
                        text.push_str(&display::format_status_line(&display::status_counts(
                            &matches,
                        )));
                        text.push('\n');
                    }
                    text
                }
                OutputFormat::Json => {
                    display::format_vehicles_json(&matches, roster.vehicles.len(), &query)
                }
            }
        }
        Commands::Stations { query, status } => {
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;
            let base = base_query::<StationStatus>(
                &config.defaults.query,
                &config.defaults.station_status,
                query.as_deref(),
                status.as_deref(),
            )
            .context("Invalid station filter")?;
            let query = to_roster_query(&expr, base).context("Invalid filter expression")?;
            if verbose {
                eprintln!("Station filter: query={:?} status={}", query.query, query.status);
            }

            let matches = filter_roster(&roster.stations, &query);
            match format {
                OutputFormat::Text => {
                    warn_row_cap(matches.len(), &config, quiet);
                    let mut text = display::format_stations_text(
                        &matches,
                        roster.stations.len(),
                        &query,
                        &config.display,
                    );
                    if config.display.show_summary && !matches.is_empty() {
                        text.push_str(&display::format_status_line(&display::status_counts(
                            &matches,
                        )));
                        text.push('\n');
                    }
                    text
                }
                OutputFormat::Json => {
                    display::format_stations_json(&matches, roster.stations.len(), &query)
                }
            }
        }
        Commands::Schedule { query } => {
            reject_status_terms(&expr).context("Invalid filter expression for schedule")?;
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;

            let text_query = expr.query_text();
            let text_query = if text_query.is_empty() {
                query.clone().unwrap_or_else(|| config.defaults.query.clone())
            } else {
                text_query
            };
            if verbose {
                eprintln!("Schedule filter: query={:?}", text_query);
            }

            let charges = roster.schedule_matching(&text_query);
            match format {
                OutputFormat::Text => {
                    warn_row_cap(charges.len(), &config, quiet);
                    display::format_schedule_text(
                        &charges,
                        roster.schedule.len(),
                        &text_query,
                        &config.display,
                    )
                }
                OutputFormat::Json => {
                    display::format_schedule_json(&charges, roster.schedule.len(), &text_query)
                }
            }
        }
        Commands::Alerts { query, severity } => {
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;
            let base = base_query::<AlertSeverity>(
                &config.defaults.query,
                &config.defaults.alert_severity,
                query.as_deref(),
                severity.as_deref(),
            )
            .context("Invalid alert filter")?;
            let query = to_roster_query(&expr, base).context("Invalid filter expression")?;
            if verbose {
                eprintln!("Alert filter: query={:?} severity={}", query.query, query.status);
            }

            let matches = filter_roster(&roster.alerts, &query);
            match format {
                OutputFormat::Text => {
                    warn_row_cap(matches.len(), &config, quiet);
                    display::format_alerts_text(
                        &matches,
                        roster.alerts.len(),
                        &query,
                        &config.display,
                    )
                }
                OutputFormat::Json => {
                    display::format_alerts_json(&matches, roster.alerts.len(), &query)
                }
            }
        }
        Commands::Summary => {
            reject_status_terms(&expr).context("Invalid filter expression for summary")?;
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;

            let text_query = expr.query_text();
            let text_query = if text_query.is_empty() {
                config.defaults.query.clone()
            } else {
                text_query
            };
            let vehicle_query = RosterQuery::<VehicleStatus>::new().with_query(&text_query);
            let station_query = RosterQuery::<StationStatus>::new().with_query(&text_query);

            let vehicles = filter_roster(&roster.vehicles, &vehicle_query);
            let stations = filter_roster(&roster.stations, &station_query);
            match format {
                OutputFormat::Text => display::format_summary_text(&vehicles, &stations, &text_query),
                OutputFormat::Json => display::format_summary_json(&vehicles, &stations, &text_query),
            }
        }
        Commands::Show { id } => {
            let roster = load_selected_roster(cli.roster.as_deref(), &config, verbose)?;
            let item = roster.lookup(id)?;
            match format {
                OutputFormat::Text => display::format_item_text(item),
                OutputFormat::Json => display::format_item_json(item),
            }
        }
        Commands::Sample => serde_json::to_string_pretty(&Roster::sample())
            .context("Failed to serialize the sample roster")?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    if let Some(path) = &cli.output {
        write_output_file(path, &output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterDefaults;

    #[test]
    fn test_flags_override_config_defaults() {
        let defaults = FilterDefaults {
            query: "depot".to_string(),
            vehicle_status: "idle".to_string(),
            station_status: "all".to_string(),
            alert_severity: "all".to_string(),
        };

        let query =
            base_query::<VehicleStatus>(&defaults.query, &defaults.vehicle_status, None, None)
                .unwrap();
        assert_eq!(query.query, "depot");
        assert_eq!(query.status, StatusFilter::Only(VehicleStatus::Idle));

        let query = base_query::<VehicleStatus>(
            &defaults.query,
            &defaults.vehicle_status,
            Some("semi"),
            Some("all"),
        )
        .unwrap();
        assert_eq!(query.query, "semi");
        assert_eq!(query.status, StatusFilter::All);
    }

    #[test]
    fn test_invalid_default_status_is_reported() {
        let defaults = FilterDefaults::default();
        let result = base_query::<StationStatus>(&defaults.query, "charging", None, None);
        assert!(matches!(result, Err(FilterParseError::UnknownStatus { .. })));
    }
}
