use crate::cli::RegionArgs;
use crate::output::OutputWriter;
use crate::output_types::RegionOutput;
use crate::storage::Storage;
use anyhow::Result;
use regionscan_core::config::LayeredConfig;
use regionscan_core::models::{AssetRecord, BoundingBox, Granularity};
use regionscan_pipeline::{RegionQuery, RegionReport};
use tabled::Tabled;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Lat")]
    lat: String,
    #[tabled(rename = "Lon")]
    lon: String,
    #[tabled(rename = "Reference")]
    reference_number: String,
    #[tabled(rename = "Locode")]
    locode: String,
    #[tabled(rename = "File")]
    filename: String,
}

impl From<&AssetRecord> for AssetRow {
    fn from(record: &AssetRecord) -> Self {
        Self {
            lat: format!("{:.5}", record.lat),
            lon: format!("{:.5}", record.lon),
            reference_number: record.reference().unwrap_or("-").to_string(),
            locode: record.locode.clone().unwrap_or_else(|| "-".to_string()),
            filename: record.filename.clone(),
        }
    }
}

pub async fn execute(
    granularity: Granularity,
    args: RegionArgs,
    config: &LayeredConfig,
    storage: &Storage,
    output: &OutputWriter,
    explain: bool,
) -> Result<()> {
    let query = RegionQuery::new(granularity, &args.code)?
        .with_padding(config.padding()?)
        .with_outside(args.show_outside);

    let report = storage.pipeline.run(&query).await?;

    if output.is_json() {
        return output.result(RegionOutput::from_report(report, explain));
    }

    print_report(&report, args.limit, output, explain);
    Ok(())
}

fn print_report(report: &RegionReport, limit: usize, output: &OutputWriter, explain: bool) {
    output.section(format!("{} {}", report.query.granularity, report.query.code));
    output.kv("Boundary", format!("{} ({} parts)", report.geometry.variant(), report.geometry.part_count()));
    output.kv("Search box", format_box(&report.search_box));
    if let Some(stored) = &report.stored_bbox {
        output.kv("Stored bbox", format_box(stored));
    }

    output.section("Summary");
    output.kv("Candidates in box", report.candidates);
    output.kv("Assets in region", report.summary.total);
    output.kv("Distinct locodes", report.summary.distinct_locodes);
    output.kv("Reference numbers", report.summary.reference_numbers.len());

    output.section("Assets");
    let rows: Vec<AssetRow> = report.contained.iter().take(limit).map(AssetRow::from).collect();
    output.table(rows);
    if report.contained.len() > limit {
        output.info(format!(
            "{} more rows not shown (use --limit or --json)",
            report.contained.len() - limit
        ));
    }

    if let Some(outside) = &report.outside {
        output.section("Outside the boundary");
        let rows: Vec<AssetRow> = outside.iter().take(limit).map(AssetRow::from).collect();
        output.table(rows);
    }

    if explain {
        let explanation = &report.explanation;
        output.section("Explanation");
        output.kv(
            "Padding",
            format!("{}° lat, {}° lon", explanation.padding.lat, explanation.padding.lon),
        );
        output.kv(
            "Containment",
            format!(
                "{} scanned, {} kept, {} rejected",
                explanation.records_scanned, explanation.records_kept, explanation.records_rejected
            ),
        );
        for phase in &explanation.phases {
            output.kv(format!("  {}", phase.phase), format!("{:.2} ms", phase.elapsed_ms));
        }
        output.kv("Total", format!("{:.2} ms", explanation.total_ms()));

        if explanation.wide_search_box {
            output.warning("Search box spans more than 180° of longitude; regions crossing the antimeridian scan a wider box than needed");
        }
    }
}

fn format_box(bbox: &BoundingBox) -> String {
    format!(
        "N {:.4}  S {:.4}  E {:.4}  W {:.4}",
        bbox.north(), bbox.south(), bbox.east(), bbox.west()
    )
}
