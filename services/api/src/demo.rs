use crate::infra::{parse_date, parse_profile_value};
use chrono::{Local, NaiveDate};
use clap::Args;
use fitrep_rv::config::AppConfig;
use fitrep_rv::error::AppError;
use fitrep_rv::workflows::fitrep::{
    BaselineProfile, Category, GradeSubmission, ProfileSession, ScoreLetter, UnroundingLookup,
};
use fitrep_rv::workflows::gradesheet::GradeSheetImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecalcArgs {
    /// Highest report average on the transcribed profile
    #[arg(long, value_parser = parse_profile_value)]
    pub(crate) high: f64,
    /// Lowest report average on the transcribed profile
    #[arg(long, value_parser = parse_profile_value)]
    pub(crate) low: f64,
    /// Profile average across all prior reports
    #[arg(long, value_parser = parse_profile_value)]
    pub(crate) average: f64,
    /// Number of prior reports on the profile
    #[arg(long)]
    pub(crate) count: i64,
    /// Rank the profile covers
    #[arg(long, default_value = "Capt")]
    pub(crate) rank: String,
    /// CSV grade sheet, one row per report in processing order
    #[arg(long)]
    pub(crate) sheet: PathBuf,
    /// Use the transcribed high and low as-is
    #[arg(long)]
    pub(crate) no_unround: bool,
    /// Emit the recalculation as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Date stamped on the summary (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct UnroundArgs {
    /// Two-decimal value as printed on the profile
    #[arg(value_parser = parse_profile_value)]
    pub(crate) value: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the summary date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the speculative re-grade portion of the demo
    #[arg(long)]
    pub(crate) skip_preview: bool,
}

pub(crate) fn run_profile_recalc(args: RecalcArgs) -> Result<(), AppError> {
    let RecalcArgs {
        high,
        low,
        average,
        count,
        rank,
        sheet,
        no_unround,
        json,
        today,
    } = args;

    let config = AppConfig::load()?;
    let unround = config.profile.unround_baseline && !no_unround;

    let submissions = GradeSheetImporter::from_path(&sheet)?;
    let baseline = BaselineProfile::new(rank, high, low, average, count);
    let mut session = ProfileSession::new(baseline, unround)?;
    session.submit_batch(&submissions)?;

    if json {
        match serde_json::to_string_pretty(&session.view()) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Recalculation payload unavailable: {}", err),
        }
        return Ok(());
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    println!("Replayed {} report(s) from {}", submissions.len(), sheet.display());
    println!("{}", session.summary().dated(today));
    Ok(())
}

pub(crate) fn run_unround(args: UnroundArgs) -> Result<(), AppError> {
    println!("{}", describe_unround(&UnroundingLookup::new(), args.value));
    Ok(())
}

fn describe_unround(lookup: &UnroundingLookup, value: f64) -> String {
    match lookup.exact(value) {
        Some(exact) => format!("{:.2} -> {}", value, exact),
        None => format!("{:.2} is not a rounded 13 or 14 mark average", value),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        skip_preview,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Fitness report RV demo");
    let baseline = BaselineProfile::new("Capt", 4.08, 2.0, 3.34, 10);
    println!(
        "Baseline: high {:.2} | low {:.2} | avg {:.2} | {} reports",
        baseline.high, baseline.low, baseline.average, baseline.count
    );

    let mut session = ProfileSession::new(baseline, true)?;
    println!("Unrounded high: {}", session.origin().high);

    let submissions = demo_submissions();
    let finals = session.submit_batch(&submissions)?;
    println!(
        "Replayed {} reports -> high {:.2} | average band {:.2}-{:.2} | {} reports",
        submissions.len(),
        finals.high,
        finals.low_average,
        finals.high_average,
        finals.count
    );

    session.set_narrative_inputs(
        "ADAMS",
        "Company Commander",
        "Led 180 Marines through a live-fire certification",
        "Top company in the battalion",
    )?;

    if !skip_preview {
        println!("\nPreviewing a re-grade for BAKER (not committed yet)");
        let regrade = GradeSubmission::uniform("BAKER", ScoreLetter::E);
        let preview = session.preview(&regrade.name, &regrade.grades)?;
        let current = session.report("BAKER")?;
        println!(
            "  Cumulative RV {:.2}-{:.2} -> {:.2}-{:.2}",
            current.rv_cumulative_min(),
            current.rv_cumulative_max(),
            preview.report.rv_cumulative_min(),
            preview.report.rv_cumulative_max()
        );
        let committed = session.commit(preview);
        println!("  Committed re-grade, report average {:.2}", committed.report_average());
    }

    println!();
    println!("{}", session.summary().dated(today));

    println!("\nNarrative inputs:");
    for view in session.narrative_views() {
        if view.accomplishments.is_empty() {
            continue;
        }
        println!(
            "  - {} {} (RV {:.2}-{:.2}): {}",
            view.rank,
            view.name,
            view.rv_cumulative_min,
            view.rv_cumulative_max,
            view.accomplishments
        );
    }

    Ok(())
}

fn demo_submissions() -> Vec<GradeSubmission> {
    vec![
        GradeSubmission::uniform("ADAMS", ScoreLetter::D)
            .grade(Category::Performance, ScoreLetter::E)
            .grade(Category::Pme, ScoreLetter::H),
        GradeSubmission::uniform("BAKER", ScoreLetter::C),
        GradeSubmission::uniform("CLARK", ScoreLetter::D)
            .grade(Category::Courage, ScoreLetter::C)
            .grade(Category::Reports, ScoreLetter::H),
    ]
}
