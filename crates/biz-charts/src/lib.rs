//! # biz-charts
//!
//! Renders the sales aggregates of a [`Table`] to PNG files:
//! - `bar_product_sales.png`: per-product totals (needs `Product` + `Sales`)
//! - `pie_monthly_sales.png`: each month's share (needs `Month` + `Sales`)
//!
//! A chart whose columns are missing is skipped without error, so callers
//! may get zero, one or two artifacts back. File names are fixed per kind;
//! render into a per-request directory to keep concurrent runs apart.

mod bar;
pub mod error;
pub mod fonts;
mod pie;

use std::path::{Path, PathBuf};

use biz_analysis::{MONTH, PRODUCT, SALES, Table, grouped_sums};
use biz_core::{ChartArtifact, ChartKind, GroupOrder};

pub use error::ChartError;

/// Image sizes and font lookup for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSettings {
    /// Bar chart size in pixels (width, height).
    pub bar_size: (u32, u32),
    /// Pie chart edge length in pixels.
    pub pie_size: u32,
    /// TrueType font for chart text; `None` searches system locations.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            bar_size: (600, 400),
            pie_size: 500,
            font_path: None,
        }
    }
}

/// Turns a sales table into chart images.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    settings: ChartSettings,
    order: GroupOrder,
}

impl ChartRenderer {
    #[must_use]
    pub const fn new(settings: ChartSettings, order: GroupOrder) -> Self {
        Self { settings, order }
    }

    /// Render every chart the table's columns allow into `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Io`] if `out_dir` cannot be created,
    /// [`ChartError::Analysis`] if a `Sales` cell is not numeric and
    /// [`ChartError::Draw`] if plotting or encoding fails.
    pub fn render(&self, table: &Table, out_dir: &Path) -> Result<Vec<ChartArtifact>, ChartError> {
        std::fs::create_dir_all(out_dir)?;
        let with_text = fonts::ensure_font(self.settings.font_path.as_deref());
        let mut artifacts = Vec::with_capacity(2);

        if let Some(artifact) = self.render_bar(table, out_dir, with_text)? {
            artifacts.push(artifact);
        }
        if let Some(artifact) = self.render_pie(table, out_dir, with_text)? {
            artifacts.push(artifact);
        }

        Ok(artifacts)
    }

    fn render_bar(
        &self,
        table: &Table,
        out_dir: &Path,
        with_text: bool,
    ) -> Result<Option<ChartArtifact>, ChartError> {
        if !(table.has_column(PRODUCT) && table.has_column(SALES)) {
            tracing::debug!("skipping bar chart: needs {PRODUCT} and {SALES}");
            return Ok(None);
        }
        let groups = grouped_sums(table, PRODUCT, SALES, self.order)?;
        if groups.is_empty() {
            tracing::debug!("skipping bar chart: no products");
            return Ok(None);
        }

        let Some(range) = bar::value_range(&groups) else {
            tracing::warn!(
                products = groups.len(),
                "skipping bar chart: product totals exceed the plottable range"
            );
            return Ok(None);
        };

        let artifact = ChartArtifact::in_dir(ChartKind::CategoricalBar, out_dir);
        bar::draw(&artifact.path, &groups, range, self.settings.bar_size, with_text)?;
        tracing::info!(kind = %artifact.kind, path = %artifact.path.display(), "rendered chart");
        Ok(Some(artifact))
    }

    fn render_pie(
        &self,
        table: &Table,
        out_dir: &Path,
        with_text: bool,
    ) -> Result<Option<ChartArtifact>, ChartError> {
        if !(table.has_column(MONTH) && table.has_column(SALES)) {
            tracing::debug!("skipping pie chart: needs {MONTH} and {SALES}");
            return Ok(None);
        }
        let groups = grouped_sums(table, MONTH, SALES, self.order)?;
        let Some(slices) = pie::layout(&groups) else {
            tracing::warn!(
                months = groups.len(),
                "skipping pie chart: monthly totals must be non-negative with a positive sum"
            );
            return Ok(None);
        };

        let artifact = ChartArtifact::in_dir(ChartKind::TemporalPie, out_dir);
        pie::draw(&artifact.path, &slices, self.settings.pie_size, with_text)?;
        tracing::info!(kind = %artifact.kind, path = %artifact.path.display(), "rendered chart");
        Ok(Some(artifact))
    }
}
