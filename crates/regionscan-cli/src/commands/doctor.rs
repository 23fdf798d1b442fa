use crate::cli::{DoctorArgs, StorageBackend};
use crate::output::OutputWriter;
use crate::output_types::{CheckStatus, DoctorCheck, DoctorOutput};
use anyhow::Result;
use console::style;
use regionscan_core::config::{redact_password, LayeredConfig};
use regionscan_core::models::BoundaryLayer;
use regionscan_store::{
    AssetStore, BoundarySource, PostgresConfig, PostgresStore, ShapefileBoundarySource,
};
use std::sync::Arc;

pub async fn execute(
    args: &DoctorArgs,
    config: &LayeredConfig,
    backend: StorageBackend,
    output: &OutputWriter,
) -> Result<()> {
    let mut checks = Vec::new();

    checks.push(check_padding(config));
    checks.extend(check_boundaries(config, args.verbose).await);
    checks.extend(check_database(config, backend, args.verbose).await);

    let passed = checks.iter().filter(|c| c.status == CheckStatus::Pass).count();
    let total = checks.len();

    if output.is_json() {
        return output.result(DoctorOutput {
            checks,
            passed,
            total,
        });
    }

    println!("\n{}", style("RegionScan Health Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());

    for check in &checks {
        let icon = match check.status {
            CheckStatus::Pass => style("✓").green(),
            CheckStatus::Warn => style("⚠").yellow(),
            CheckStatus::Fail => style("✗").red(),
        };
        println!("{} {}: {}", icon, check.name, check.detail);
    }

    println!("{}", style("═".repeat(60)).dim());
    println!("Overall Status: {}/{} checks passed", passed, total);

    if passed < total {
        println!("{}", style("Some checks did not pass. See the details above.").yellow());
    } else {
        println!("{}", style("All checks passed!").green());
    }

    Ok(())
}

fn check(name: impl Into<String>, status: CheckStatus, detail: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.into(),
        status,
        detail: detail.into(),
    }
}

fn check_padding(config: &LayeredConfig) -> DoctorCheck {
    match config.padding() {
        Ok(padding) => check(
            "Padding",
            CheckStatus::Pass,
            format!("{}° lat, {}° lon", padding.lat, padding.lon),
        ),
        Err(e) => check("Padding", CheckStatus::Fail, e.to_string()),
    }
}

async fn check_boundaries(config: &LayeredConfig, verbose: bool) -> Vec<DoctorCheck> {
    let dir = &config.boundaries_dir.value;
    if !dir.is_dir() {
        return vec![check(
            "Boundary dataset",
            CheckStatus::Fail,
            format!("{} is not a directory", dir.display()),
        )];
    }

    let source = Arc::new(ShapefileBoundarySource::new(dir.clone(), config.resolution.value));
    let mut checks = Vec::new();

    for layer in [BoundaryLayer::Countries, BoundaryLayer::States] {
        let path = source.layer_path(layer);
        let name = format!("Layer {}", layer);

        if !path.exists() {
            checks.push(check(name, CheckStatus::Fail, format!("{} not found", path.display())));
            continue;
        }

        let loader = Arc::clone(&source);
        let loaded = tokio::task::spawn_blocking(move || loader.layer_len(layer)).await;

        checks.push(match loaded {
            Ok(Ok(count)) => {
                let detail = if verbose {
                    format!("{} boundaries in {}", count, path.display())
                } else {
                    format!("{} boundaries", count)
                };
                check(name, CheckStatus::Pass, detail)
            }
            Ok(Err(e)) => check(name, CheckStatus::Fail, e.to_string()),
            Err(e) => check(name, CheckStatus::Fail, e.to_string()),
        });
    }

    checks
}

async fn check_database(
    config: &LayeredConfig,
    backend: StorageBackend,
    verbose: bool,
) -> Vec<DoctorCheck> {
    let Some(url) = config.database_url.value.as_deref() else {
        let status = match backend {
            StorageBackend::Postgres => CheckStatus::Fail,
            StorageBackend::Memory => CheckStatus::Warn,
        };
        return vec![check("DATABASE_URL", status, "not set")];
    };

    let mut checks = vec![check(
        "DATABASE_URL",
        CheckStatus::Pass,
        if verbose {
            redact_password(url)
        } else {
            "set".to_string()
        },
    )];

    let pg_config = match PostgresConfig::new(url.to_string())
        .and_then(|c| c.with_locode_table(config.locode_table.value.clone()))
    {
        Ok(pg_config) => pg_config,
        Err(e) => {
            checks.push(check("PostgreSQL", CheckStatus::Fail, e.to_string()));
            return checks;
        }
    };

    let connected = match PostgresStore::new(pg_config).await {
        Ok(store) => store.health_check().await.map(|_| store),
        Err(e) => Err(e),
    };

    checks.push(match connected {
        Ok(store) => check(
            "PostgreSQL",
            CheckStatus::Pass,
            format!("reachable, locode table '{}'", store.config().locode_table),
        ),
        Err(e) => check("PostgreSQL", CheckStatus::Fail, e.to_string()),
    });

    checks
}
