//! # Sales Charts
//!
//! Region page (sales by region and by product) and Trends page (daily
//! sales) rendered with Charming (ECharts wrapper).

use charming::{
    Chart, WasmRenderer,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, ItemStyle, LineStyle, TextStyle, Tooltip, Trigger},
    series::{Bar, Line},
};
use leptos::prelude::*;

use super::status::{FetchFailed, Loading, NoData};
use crate::state::{LoadState, use_filtered_load};

const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 320;
const ACCENT: &str = "#3fa7ff";
const MUTED: &str = "#8899aa";

/// Labelled values ready for plotting
pub type Points = Vec<(String, f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

fn base_chart(title: &str, points: &[(String, f64)]) -> Chart {
    let categories: Vec<String> = points.iter().map(|(label, _)| label.clone()).collect();

    Chart::new()
        .title(
            Title::new()
                .text(title)
                .text_style(TextStyle::new().color(MUTED).font_size(12))
                .left("center"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("12%").right("6%").top("15%").bottom("15%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(categories)
                .axis_label(AxisLabel::new().color(MUTED)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Sales ($)")
                .axis_label(AxisLabel::new().color(MUTED)),
        )
}

fn values(points: &[(String, f64)]) -> Vec<f64> {
    points.iter().map(|(_, value)| *value).collect()
}

/// Bar chart with one bar per label, in the given order.
pub fn bar_chart(title: &str, points: &[(String, f64)]) -> Chart {
    base_chart(title, points).series(
        Bar::new()
            .name("Sales")
            .data(values(points))
            .item_style(ItemStyle::new().color(ACCENT)),
    )
}

/// Line chart over chronologically ordered labels.
pub fn line_chart(title: &str, points: &[(String, f64)]) -> Chart {
    base_chart(title, points).series(
        Line::new()
            .name("Sales")
            .data(values(points))
            .line_style(LineStyle::new().color(ACCENT).width(2)),
    )
}

impl ChartKind {
    pub fn build(self, title: &str, points: &[(String, f64)]) -> Chart {
        match self {
            Self::Bar => bar_chart(title, points),
            Self::Line => line_chart(title, points),
        }
    }
}

fn render_chart(chart_id: &str, chart: &Chart) {
    let renderer = WasmRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    if let Err(e) = renderer.render(chart_id, chart) {
        log::error!("Chart render error: {:?}", e);
    }
}

/// One chart with its loading, error and empty states
#[component]
fn ChartPanel(
    title: &'static str,
    chart_id: &'static str,
    kind: ChartKind,
    points: Signal<LoadState<Points>>,
) -> impl IntoView {
    Effect::new(move |_| {
        if let LoadState::Ready(ready) = points.get() {
            if !ready.is_empty() {
                render_chart(chart_id, &kind.build(title, &ready));
            }
        }
    });

    let has_chart = move || matches!(points.get(), LoadState::Ready(p) if !p.is_empty());

    view! {
        <section class="panel">
            <div class="panel-header">
                <span class="panel-title">{title}</span>
            </div>
            <div class="panel-body">
                {move || match points.get() {
                    LoadState::Loading => Some(view! { <Loading /> }.into_any()),
                    LoadState::Failed(error) => Some(view! { <FetchFailed error=error /> }.into_any()),
                    LoadState::Ready(p) if p.is_empty() => Some(view! { <NoData /> }.into_any()),
                    LoadState::Ready(_) => None,
                }}
                <div id=chart_id class="chart-container" class:hidden=move || !has_chart()></div>
            </div>
        </section>
    }
}

fn to_points<T>(state: LoadState<Vec<T>>, point: impl Fn(T) -> (String, f64)) -> LoadState<Points> {
    match state {
        LoadState::Loading => LoadState::Loading,
        LoadState::Failed(error) => LoadState::Failed(error),
        LoadState::Ready(rows) => LoadState::Ready(rows.into_iter().map(point).collect()),
    }
}

/// Region page: sales by region and by product
#[component]
pub fn RegionPage() -> impl IntoView {
    let by_region =
        use_filtered_load(|client, filter| async move { client.sales_by_region(&filter).await });
    let by_product =
        use_filtered_load(|client, filter| async move { client.sales_by_product(&filter).await });

    let region_points =
        Signal::derive(move || to_points(by_region.get(), |row| (row.region, row.sales)));
    let product_points =
        Signal::derive(move || to_points(by_product.get(), |row| (row.product, row.sales)));

    view! {
        <ChartPanel
            title="Sales by Region"
            chart_id="sales-by-region"
            kind=ChartKind::Bar
            points=region_points
        />
        <ChartPanel
            title="Sales by Product"
            chart_id="sales-by-product"
            kind=ChartKind::Bar
            points=product_points
        />
    }
}

/// Trends page: daily sales
#[component]
pub fn TrendsPage() -> impl IntoView {
    let over_time =
        use_filtered_load(|client, filter| async move { client.sales_over_time(&filter).await });

    let points = Signal::derive(move || {
        to_points(over_time.get(), |row| (row.date.to_string(), row.sales))
    });

    view! {
        <ChartPanel
            title="Sales Over Time"
            chart_id="sales-over-time"
            kind=ChartKind::Line
            points=points
        />
    }
}
