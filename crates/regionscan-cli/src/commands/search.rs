use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::SearchOutput;
use crate::storage::Storage;
use anyhow::Result;
use tabled::Tabled;

pub async fn execute(args: SearchArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let matches = storage.pipeline.search_locodes(&args.name).await?;

    if output.is_json() {
        return output.result(SearchOutput {
            name: args.name,
            matches,
        });
    }

    #[derive(Tabled)]
    struct LocodeRow {
        #[tabled(rename = "Locode")]
        locode: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Display name")]
        display_name: String,
    }

    output.info(format!("{} locodes match '{}'", matches.len(), args.name));

    let rows = matches
        .into_iter()
        .map(|m| LocodeRow {
            locode: m.locode,
            name: m.name,
            display_name: m.display_name.unwrap_or_default(),
        })
        .collect();
    output.table::<LocodeRow>(rows);

    Ok(())
}
