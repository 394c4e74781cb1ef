//! Command line parsing and the headless `query` subcommand.
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use serde::Serialize;
use turbine_core::presentation::ThemeMode;
use turbine_core::worker::spawn_request;
use turbine_core::{Config, ParamKey, Phase, QueryParams, RandomnessService, Session};

use crate::infra::constants::HEADLESS_TICK_MS;

pub const USAGE: &str = "\
Usage:
  turbine [--config PATH] [--theme light|dark]
  turbine query [--config PATH] [--low N] [--high N] [--certainty N] [--delay N] [--json]

Environment:
  TURBINE_CONFIG   config overlay file (same as --config)
  TURBINE_LOG      log filter, e.g. turbine_core=debug
  TURBINE_API_KEY  bearer token for the http service";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Tui { config: Option<PathBuf>, theme: Option<ThemeMode> },
    Query { config: Option<PathBuf>, edits: Vec<(ParamKey, String)>, json: bool },
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let (is_query, rest) = match args.first().map(String::as_str) {
        Some("query") => (true, &args[1..]),
        _ => (false, args),
    };

    let mut config = None;
    let mut theme = None;
    let mut edits = Vec::new();
    let mut json = false;

    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" if is_query => json = true,
            "--config" | "--theme" => {
                let value = rest.get(i + 1).ok_or_else(|| format!("{} needs a value", arg))?;
                if arg == "--config" {
                    config = Some(PathBuf::from(value));
                } else {
                    theme = Some(parse_theme(value)?);
                }
                i += 1;
            }
            flag if is_query && flag.starts_with("--") => {
                let key: ParamKey = flag[2..].parse().map_err(|e| format!("{}", e))?;
                let value = rest.get(i + 1).ok_or_else(|| format!("{} needs a value", flag))?;
                edits.push((key, value.clone()));
                i += 1;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    if is_query {
        if theme.is_some() {
            return Err("--theme only applies to the interactive form".to_string());
        }
        Ok(Command::Query { config, edits, json })
    } else {
        Ok(Command::Tui { config, theme })
    }
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    match value {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        other => Err(format!("Unknown theme: {} (expected light or dark)", other)),
    }
}

/// What the headless run prints with `--json`.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub params: Option<QueryParams>,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub display: String,
}

impl QueryReport {
    pub fn exit_code(&self) -> i32 {
        if self.outcome == "completed" { 0 } else { 1 }
    }
}

/// Apply the edits, submit once, and block until the request ends.
pub fn run_query(config: &Config, edits: &[(ParamKey, String)], service: Arc<dyn RandomnessService>) -> QueryReport {
    let mut session = Session::new(config);
    for (key, text) in edits {
        session.edit(*key, text);
    }

    let ticket = match session.submit() {
        Ok(ticket) => ticket,
        Err(reason) => {
            return QueryReport {
                params: None,
                outcome: "rejected",
                value: None,
                reason: Some(reason.to_string()),
                display: session.presentation().display_value().to_string(),
            };
        }
    };

    let params = ticket.params;
    let (tx, rx) = mpsc::channel();
    let _ = spawn_request(service, ticket, tx);
    let timeout = config.service.readiness_timeout();
    while session.phase().is_in_flight() {
        match rx.recv_timeout(Duration::from_millis(HEADLESS_TICK_MS)) {
            Ok(event) => {
                session.apply(event);
            }
            Err(RecvTimeoutError::Timeout) => {
                session.check_readiness_timeout(Instant::now(), timeout);
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let display = session.presentation().display_value().to_string();
    let (outcome, value, reason) = match session.phase() {
        Phase::Completed(value) => ("completed", Some(*value), None),
        Phase::Failed(reason) => ("failed", None, Some(reason.clone())),
        Phase::Unavailable(reason) => ("unavailable", None, Some(reason.clone())),
        _ => ("failed", None, Some("worker ended early".to_string())),
    };
    QueryReport { params: Some(params), outcome, value, reason, display }
}

#[cfg(test)]
mod tests {
    use turbine_core::local::LocalTurbine;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_is_tui() {
        assert_eq!(parse_args(&[]), Ok(Command::Tui { config: None, theme: None }));
    }

    #[test]
    fn tui_with_theme_and_config() {
        let cmd = parse_args(&args(&["--theme", "light", "--config", "my.yaml"])).unwrap();
        assert_eq!(cmd, Command::Tui { config: Some(PathBuf::from("my.yaml")), theme: Some(ThemeMode::Light) });
    }

    #[test]
    fn query_collects_edits_in_order() {
        let cmd = parse_args(&args(&["query", "--high", "20", "--low", "abc", "--json"])).unwrap();
        assert_eq!(
            cmd,
            Command::Query {
                config: None,
                edits: vec![(ParamKey::High, "20".to_string()), (ParamKey::Low, "abc".to_string())],
                json: true,
            }
        );
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let err = parse_args(&args(&["query", "--speed", "3"])).unwrap_err();
        assert_eq!(err, "unknown parameter key: speed");
    }

    #[test]
    fn missing_value_is_rejected() {
        assert!(parse_args(&args(&["query", "--low"])).is_err());
        assert!(parse_args(&args(&["--theme"])).is_err());
        assert!(parse_args(&args(&["--theme", "sepia"])).is_err());
    }

    #[test]
    fn json_only_for_query() {
        assert!(parse_args(&args(&["--json"])).is_err());
    }

    fn local() -> Arc<dyn RandomnessService> {
        Arc::new(LocalTurbine::with_seed(3, Duration::ZERO))
    }

    fn quick(extra: &[(ParamKey, &str)]) -> Vec<(ParamKey, String)> {
        let mut edits = vec![(ParamKey::Delay, "0".to_string())];
        edits.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
        edits
    }

    #[test]
    fn headless_query_completes_in_range() {
        let report = run_query(&Config::default(), &quick(&[(ParamKey::Certainty, "15")]), local());
        assert_eq!(report.outcome, "completed");
        assert_eq!(report.params.map(|p| p.certainty), Some(10));
        let value = report.value.unwrap();
        assert!((1..=10).contains(&value));
        assert_eq!(report.display, value.to_string());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn headless_query_rejects_empty_range() {
        let report = run_query(&Config::default(), &quick(&[(ParamKey::Low, "5"), (ParamKey::High, "5")]), local());
        assert_eq!(report.outcome, "rejected");
        assert_eq!(report.reason.as_deref(), Some("low must be less than high"));
        assert_eq!(report.display, "Global");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn report_serializes_without_empty_fields() {
        let report = run_query(&Config::default(), &quick(&[]), local());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "completed");
        assert!(json.get("reason").is_none());
        assert_eq!(json["params"]["delay"], 0);
    }
}
