//! Command handlers
//!
//! Each handler writes its report to the given writer so the output can be
//! captured in tests.

use crate::commands::{CleanArgs, ConfigArgs, MatchArgs, PlanArgs};
use crate::error::{CliError, CliResult};
use console::style;
use roamer::{
    best_match, clean_report_dirs, CalendarNavigator, DateFormat, Direction, MatchKind,
    MatchQuery, MatchStrategy, NavigatorConfig, RoamerError, SuiteConfig,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Pick the best candidate for a target and report it
pub fn run_match(args: &MatchArgs, out: &mut impl Write) -> CliResult<()> {
    let strategy = if args.exact_only {
        MatchStrategy::ExactOnly
    } else {
        MatchStrategy::ExactOrShortestFuzzy
    };
    let query = MatchQuery::new(&args.target);
    let choice = best_match(&query, args.candidates.iter().map(String::as_str), strategy)
        .ok_or_else(|| RoamerError::NoMatchFound {
            target: query.as_str().to_string(),
        })?;
    debug!(index = choice.index, kind = ?choice.kind, "match chosen");

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&choice)?)?;
        return Ok(());
    }

    let kind = match choice.kind {
        MatchKind::Exact => style("exact").green(),
        MatchKind::Fuzzy => style("fuzzy").yellow(),
        MatchKind::Fallback => style("fallback").red(),
    };
    writeln!(
        out,
        "{} {} (candidate #{}, {kind})",
        style("match:").bold(),
        choice.label,
        choice.index + 1
    )?;
    Ok(())
}

/// Navigator settings for the plan command
pub fn plan_config(suite: &SuiteConfig, args: &PlanArgs) -> CliResult<NavigatorConfig> {
    let mut config = match &args.call_site {
        Some(site) => {
            if suite.call_site(site).is_none() {
                return Err(CliError::invalid_argument(format!("unknown call site '{site}'")));
            }
            suite.navigator_config(site)
        }
        None => NavigatorConfig::default(),
    };
    if let Some(pattern) = &args.date_format {
        config.date_format = DateFormat::from_pattern(pattern)?;
    }
    if let Some(pattern) = &args.label_format {
        config.page_label_format = DateFormat::from_pattern(pattern)?;
    }
    Ok(config)
}

/// Report the paging needed to reach a date
pub fn run_plan(suite: &SuiteConfig, args: &PlanArgs, out: &mut impl Write) -> CliResult<()> {
    let navigator = CalendarNavigator::new(plan_config(suite, args)?);
    let plan = navigator.plan(&args.date, &args.page_label)?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
        return Ok(());
    }

    let moves = match plan.direction {
        Direction::None => "already on target page".to_string(),
        Direction::Forward => format!("forward {} page(s)", plan.page_turns),
        Direction::Backward => format!("backward {} page(s)", plan.page_turns),
    };
    writeln!(
        out,
        "{} {} -> {}: {moves}, then day {}",
        style("plan:").bold(),
        plan.displayed,
        plan.target.page(),
        plan.target.day
    )?;
    Ok(())
}

/// Remove report directories
pub fn run_clean(suite: &SuiteConfig, args: &CleanArgs, out: &mut impl Write) -> CliResult<()> {
    let paths: Vec<PathBuf> = if args.paths.is_empty() {
        suite.report_dirs.clone()
    } else {
        args.paths.clone()
    };
    let removed = clean_report_dirs(paths.as_slice())?;
    if removed.is_empty() {
        writeln!(out, "nothing to clean")?;
    }
    for path in removed {
        writeln!(out, "{} {}", style("removed").green(), path.display())?;
    }
    Ok(())
}

/// Print the resolved configuration
pub fn run_config(suite: &SuiteConfig, args: &ConfigArgs, out: &mut impl Write) -> CliResult<()> {
    let yaml = match &args.call_site {
        Some(site) => {
            if suite.call_site(site).is_none() {
                return Err(CliError::invalid_argument(format!("unknown call site '{site}'")));
            }
            let resolved = suite.navigator_config(site);
            serde_yaml_ng::to_string(&resolved).map_err(RoamerError::from)?
        }
        None => suite.to_yaml()?,
    };
    write!(out, "{yaml}")?;
    Ok(())
}
