use std::path::Path;

use anyhow::{Context, Result};
use tpt_core::{Dashboard, DashboardView, SnapshotCell};
use tpt_model::{FilterSpec, NormalizationOptions, Selection};
use tpt_report::{render_options, render_view, write_count_csvs, write_metrics_json};
use tracing::{info, info_span};

use crate::cli::{OptionsArgs, OutputFormatArg, SummaryArgs};

/// Normalized snapshot, loaded once per process.
static SNAPSHOT: SnapshotCell = SnapshotCell::new();

fn load_snapshot(path: &Path, options: &NormalizationOptions) -> Result<&'static Dashboard> {
    SNAPSHOT
        .get_or_load(|| Dashboard::load(path, options))
        .with_context(|| format!("load register extract {}", path.display()))
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let span = info_span!("summary", input = %args.input.display());
    let _guard = span.enter();

    let options = NormalizationOptions::new().with_unmapped_warnings(!args.quiet_unmapped);
    let dashboard = load_snapshot(&args.input, &options)?;
    let report = dashboard.report();
    if report.dropped_rows() > 0 {
        info!(
            dropped = report.dropped_rows(),
            kept = report.kept_rows,
            "rows excluded during cleaning"
        );
    }

    let spec = args.filters.to_spec(dashboard)?;
    let view = dashboard.render(&spec).context("apply filters")?;

    match args.format {
        OutputFormatArg::Table => println!("{}", render_view(&view)),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&view.metrics())
                .context("serialize metrics")?;
            println!("{json}");
        }
    }

    if let Some(dir) = &args.output_dir {
        match &view {
            DashboardView::Ready(bundle) => {
                write_metrics_json(bundle, &dir.join("metrics.json"))?;
                let written = write_count_csvs(bundle, dir)?;
                info!(files = written.len() + 1, dir = %dir.display(), "exports written");
            }
            DashboardView::Empty => {
                info!("no records match the current filters, nothing exported");
            }
        }
    }
    Ok(())
}

pub fn run_options(args: &OptionsArgs) -> Result<()> {
    let span = info_span!("options", input = %args.input.display());
    let _guard = span.enter();

    let dashboard = load_snapshot(&args.input, &NormalizationOptions::default())?;
    let spec = if args.regions.is_empty() {
        dashboard.default_filter()
    } else {
        FilterSpec {
            regions: Selection::from_choices(&args.regions),
            ..dashboard.default_filter()
        }
    };
    let facilities = dashboard.facility_options(&spec);
    println!("{}", render_options(dashboard.options(), &facilities));
    Ok(())
}
