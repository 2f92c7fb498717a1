use crate::infra::InMemoryRoadNetwork;
use clap::Args;
use pavement_condition::assessment::{
    Condition, ConditionReportError, ConditionReportService, PavementType, RatingTable,
    RoadFixture, RoadReport, UserId,
};
use pavement_condition::error::AppError;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Road fixture JSON (a single road or an array of roads)
    #[arg(long)]
    pub(crate) road_file: PathBuf,
    /// Rating table CSV overriding the standard tables
    #[arg(long)]
    pub(crate) ratings: Option<PathBuf>,
    /// Include per-distress breakdowns for every segment
    #[arg(long)]
    pub(crate) details: bool,
    /// Print the reports as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Recorded as the user who generated the results
    #[arg(long, default_value = "cli")]
    pub(crate) user: String,
}

pub(crate) fn run_condition_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        road_file,
        ratings,
        details,
        json,
        user,
    } = args;

    let ratings = match ratings {
        Some(path) => RatingTable::from_path(path)?,
        None => RatingTable::standard(),
    };
    let reports = build_reports(RoadFixture::from_path(road_file)?, ratings, &user, details)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", render_report(report, details));
        }
    }

    Ok(())
}

/// Scores every fixture road through the service and reads back the stored reports.
pub(crate) fn build_reports(
    fixtures: Vec<RoadFixture>,
    ratings: RatingTable,
    user: &str,
    include_details: bool,
) -> Result<Vec<RoadReport>, AppError> {
    let network = Arc::new(InMemoryRoadNetwork::default());
    let mut road_ids = Vec::with_capacity(fixtures.len());
    for fixture in fixtures {
        road_ids.push(fixture.road.id.clone());
        network.seed(fixture).map_err(ConditionReportError::from)?;
    }

    let service = ConditionReportService::with_ratings(
        network.clone(),
        network.clone(),
        network,
        Arc::new(ratings),
    );
    let user = UserId(user.to_string());

    road_ids
        .iter()
        .map(|road_id| -> Result<RoadReport, AppError> {
            service.generate_results_for_road(road_id, &user, include_details)?;
            Ok(service.get_report_by_road_id(road_id)?)
        })
        .collect()
}

pub(crate) fn render_report(report: &RoadReport, details: bool) -> String {
    let RoadReport { road, report } = report;
    let mut out = String::new();

    let code = road.code.as_deref().unwrap_or("-");
    let _ = writeln!(out, "Road {code}: {} ({})", road.name, road.id);
    if let Some(region) = &road.region {
        let _ = writeln!(out, "  Region: {region}");
    }
    let _ = writeln!(
        out,
        "  Result {} updated {}",
        report.id,
        report.updated_at.format("%Y-%m-%d %H:%M UTC")
    );

    let _ = writeln!(out, "\nPavement types");
    for kind in PavementType::ordered() {
        let share = report
            .pavement_type_percentages
            .get(&kind)
            .copied()
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<9} {:>6.2}%", kind.label(), share);
    }

    let _ = writeln!(out, "\nCondition by length");
    for condition in Condition::ordered() {
        let stat = report
            .condition_length_stats
            .get(&condition)
            .copied()
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<5} {:>8.2} km {:>6.2}%",
            condition.label(),
            stat.length_km,
            stat.percentage
        );
    }

    let _ = writeln!(out, "\nSegments");
    for detail in &report.segments {
        let summary = &detail.summary;
        let position = match &detail.segment {
            Some(meta) => format!(
                "#{} {:.0}-{:.0} m",
                meta.segment_number, meta.stationing_from_m, meta.stationing_to_m
            ),
            None => "(segment removed)".to_string(),
        };
        let _ = writeln!(
            out,
            "  {position} {} {}: area {:.2} m², TTI {:.2}, {}",
            summary.segment_id,
            summary.pavement_type.label(),
            summary.section_area,
            summary.tti,
            summary.condition.label()
        );

        if !details {
            continue;
        }
        if let Some(components) = &summary.weighted_components {
            for (channel, weighted) in components.iter().filter(|(_, value)| **value > 0.0) {
                let _ = writeln!(out, "      {channel:?}: {weighted:.2}");
            }
        }
    }
    out.push('\n');

    out
}
