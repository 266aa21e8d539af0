use crate::domain::model::{BarChart, ColorRange, HeatmapChart};
use crate::domain::ports::ChartRenderer;
use crate::utils::error::{render_error, Result};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

const BAR_COLOR: RGBColor = RGBColor(226, 74, 51);
const FONT: &str = "sans-serif";

/// Renders charts as standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// Greys 色階：0 為白色，1 為黑色
fn grey(range: &ColorRange, value: f64) -> RGBColor {
    let level = (255.0 * (1.0 - range.normalize(value))).round() as u8;
    RGBColor(level, level, level)
}

impl ChartRenderer for SvgChartRenderer {
    fn file_extension(&self) -> &str {
        "svg"
    }

    fn render_bar_chart(&self, chart: &BarChart) -> Result<String> {
        let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
        let segments = chart.bars.len().max(1) as i32;
        let max_count = chart.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let y_max = max_count + max_count / 20 + 1;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (chart.width, chart.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut builder = ChartBuilder::on(&root);
            builder.margin(10).x_label_area_size(160).y_label_area_size(70);
            if let Some(title) = &chart.title {
                builder.caption(title, (FONT, 20));
            }
            let mut ctx = builder
                .build_cartesian_2d((0..segments).into_segmented(), 0usize..y_max)
                .map_err(render_error)?;

            ctx.configure_mesh()
                .disable_x_mesh()
                .y_desc(chart.y_label.as_str())
                .x_labels(labels.len() + 1)
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&labels, v))
                .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
                .draw()
                .map_err(render_error)?;

            ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
                let x = i as i32;
                Rectangle::new(
                    [(SegmentValue::Exact(x), 0), (SegmentValue::Exact(x + 1), bar.count)],
                    BAR_COLOR.filled(),
                )
            }))
            .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }

        tracing::debug!("Rendered bar chart with {} bars", chart.bars.len());
        Ok(svg)
    }

    fn render_heatmap(&self, chart: &HeatmapChart) -> Result<String> {
        let table = &chart.table;
        let rows = table.row_labels.len();
        let columns = table.column_labels.len();

        // 第一列畫在最上方
        let y_labels: Vec<String> = table.row_labels.iter().rev().cloned().collect();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (chart.width, chart.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut builder = ChartBuilder::on(&root);
            builder.margin(10).x_label_area_size(140).y_label_area_size(160);
            if let Some(title) = &chart.title {
                builder.caption(title, (FONT, 18));
            }
            let mut ctx = builder
                .build_cartesian_2d(
                    (0..columns.max(1) as i32).into_segmented(),
                    (0..rows.max(1) as i32).into_segmented(),
                )
                .map_err(render_error)?;

            ctx.configure_mesh()
                .disable_mesh()
                .x_desc(table.column_name.as_str())
                .y_desc(table.row_name.as_str())
                .x_labels(columns + 1)
                .y_labels(rows + 1)
                .x_label_formatter(&|v: &SegmentValue<i32>| segment_label(&table.column_labels, v))
                .y_label_formatter(&|v: &SegmentValue<i32>| segment_label(&y_labels, v))
                .x_label_style((FONT, 11).into_font().transform(FontTransform::Rotate90))
                .draw()
                .map_err(render_error)?;

            let range = chart.color_range;
            ctx.draw_series(table.counts.iter().enumerate().flat_map(|(r, row)| {
                let y = (rows - 1 - r) as i32;
                row.iter().enumerate().map(move |(c, &count)| {
                    let x = c as i32;
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                            (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                        ],
                        grey(&range, count as f64).filled(),
                    )
                })
            }))
            .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }

        tracing::debug!("Rendered {}x{} heatmap", rows, columns);
        Ok(svg)
    }
}
