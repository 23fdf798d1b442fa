use crate::cli::SectorArgs;
use crate::output::OutputWriter;
use crate::output_types::SectorOutput;
use crate::storage::Storage;
use anyhow::Result;
use regionscan_core::models::RegionCode;
use tabled::Tabled;

pub async fn execute(args: SectorArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let locode = RegionCode::new(&args.locode)?;
    let records = storage.pipeline.sector_assets(&locode, &args.sector).await?;

    if output.is_json() {
        return output.result(SectorOutput {
            locode: locode.to_string(),
            sector: args.sector,
            records,
        });
    }

    #[derive(Tabled)]
    struct SectorRow {
        #[tabled(rename = "Reference")]
        reference_number: String,
        #[tabled(rename = "Year")]
        year: String,
    }

    output.section(format!("{} sector {}", locode, args.sector));

    let rows = records
        .into_iter()
        .map(|r| SectorRow {
            reference_number: r.reference_number,
            year: r.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    output.table::<SectorRow>(rows);

    Ok(())
}
