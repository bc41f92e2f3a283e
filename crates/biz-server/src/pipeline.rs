//! The report pipeline: load, extract, summarize, render, compose.
//!
//! Stages run strictly one after another. File and CPU bound stages go
//! through `spawn_blocking`; only the summarizer call is awaited on the
//! runtime.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use biz_analysis::{Table, extract_insights};
use biz_charts::{ChartRenderer, ChartSettings};
use biz_config::BizConfig;
use biz_core::{ChartArtifact, InsightSet, RequestId};
use biz_llm::Summarizer;
use biz_report::Report;

use crate::error::ServiceError;

/// Options of the offline `autobiz report` flow.
#[derive(Debug, Clone, Default)]
pub struct OfflineOptions {
    pub title: Option<String>,
    pub output: Option<String>,
    pub summarize: bool,
}

pub struct ReportPipeline<S> {
    config: Arc<BizConfig>,
    summarizer: Option<S>,
}

impl<S: Summarizer> ReportPipeline<S> {
    pub const fn new(config: Arc<BizConfig>, summarizer: Option<S>) -> Self {
        Self { config, summarizer }
    }

    pub fn config(&self) -> &BizConfig {
        &self.config
    }

    pub const fn summarizer(&self) -> Option<&S> {
        self.summarizer.as_ref()
    }

    /// Load `csv` and extract its insight set.
    pub async fn insights(&self, csv: PathBuf) -> Result<InsightSet, ServiceError> {
        let order = self.config.report.group_order;
        let (_, insights) = run_blocking(move || load(&csv, order)).await?;
        Ok(insights)
    }

    /// Insight lines as shown to clients.
    pub async fn insight_lines(&self, csv: PathBuf) -> Result<Vec<String>, ServiceError> {
        let insights = self.insights(csv).await?;
        Ok(insights.lines(&self.config.report.currency()))
    }

    /// Full pipeline for one request; returns the PDF path.
    ///
    /// Charts go to `reports/charts/<id>/`, the PDF to
    /// `reports/report-<id>.pdf`.
    pub async fn report(&self, csv: PathBuf, id: &RequestId) -> Result<PathBuf, ServiceError> {
        let order = self.config.report.group_order;
        let (table, insights) = run_blocking(move || load(&csv, order)).await?;

        let insight_text = insights.text(&self.config.report.currency());
        let body = match &self.summarizer {
            Some(summarizer) => {
                let prompt = format!("{}\n{insight_text}", self.config.llm.summary_prompt);
                summarizer.summarize(&prompt).await?
            }
            None => {
                tracing::debug!("language model disabled; using raw insight lines");
                insight_text
            }
        };

        let config = Arc::clone(&self.config);
        let chart_dir = config.storage.charts_dir().join(id.as_str());
        let filename = format!("report-{id}.pdf");
        run_blocking(move || {
            let charts = renderer(&config).render(&table, &chart_dir)?;
            let mut report = new_report(&config, config.report.title.clone());
            report.add_text(body);
            add_charts(&mut report, &charts);
            Ok(report.save(&filename)?)
        })
        .await
    }

    /// The offline flow: timestamp, row count, total and average sales, an
    /// optional summary, then the charts.
    pub async fn offline_report(
        &self,
        csv: PathBuf,
        options: OfflineOptions,
    ) -> Result<PathBuf, ServiceError> {
        let order = self.config.report.group_order;
        let (table, insights) = run_blocking(move || load(&csv, order)).await?;
        let currency = self.config.report.currency();

        let summary = match (&self.summarizer, options.summarize) {
            (Some(summarizer), true) => {
                let prompt = format!(
                    "{}\n{}",
                    self.config.llm.summary_prompt,
                    insights.text(&currency)
                );
                Some(summarizer.summarize(&prompt).await?)
            }
            _ => None,
        };

        let config = Arc::clone(&self.config);
        let chart_dir = config.storage.charts_dir();
        run_blocking(move || {
            let charts = renderer(&config).render(&table, &chart_dir)?;
            let title = options
                .title
                .unwrap_or_else(|| config.report.offline_title.clone());
            let mut report = new_report(&config, title);
            report.add_timestamp();
            for line in insights.summary_lines(&currency) {
                report.add_text(line);
            }
            if let Some(summary) = summary {
                report.add_text(summary);
            }
            add_charts(&mut report, &charts);
            let filename = options
                .output
                .unwrap_or_else(|| config.report.default_filename.clone());
            Ok(report.save(&filename)?)
        })
        .await
    }
}

fn load(
    csv: &Path,
    order: biz_core::GroupOrder,
) -> Result<(Table, InsightSet), ServiceError> {
    let table = Table::from_path(csv)?;
    let insights = extract_insights(&table, order)?;
    tracing::info!(
        rows = insights.row_count(),
        periods = insights.periods().len(),
        "extracted insights"
    );
    Ok((table, insights))
}

fn renderer(config: &BizConfig) -> ChartRenderer {
    let charts = &config.charts;
    ChartRenderer::new(
        ChartSettings {
            bar_size: (charts.bar_width, charts.bar_height),
            pie_size: charts.pie_size,
            font_path: (!charts.font_path.is_empty()).then(|| PathBuf::from(&charts.font_path)),
        },
        config.report.group_order,
    )
}

fn new_report(config: &BizConfig, title: String) -> Report {
    Report::new(title, config.storage.base_dir.clone())
        .with_image_width(config.report.image_width_mm)
}

fn add_charts(report: &mut Report, charts: &[ChartArtifact]) {
    for chart in charts {
        report.add_image(&chart.path);
    }
}

pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::join(&e))?
}
