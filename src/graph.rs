#![cfg(not(tarpaulin_include))]
#![cfg(feature = "web")]
use crate::inventory::Inventory;
use crate::record::StockStatus;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

/// Chart views available on the dashboard
///
/// Each kind corresponds to one `<img>` panel on the dashboard page and is
/// addressed by its URL slug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    /// Grouped bars - understocked/optimal/overstocked counts per warehouse
    StatusByWarehouse,

    /// Bars - total storage cost per product category
    CostByCategory,

    /// Scatter - stock units per category, sized by storage cost, with the
    /// reorder level marked per point
    StockVsReorder,

    /// Bars - mean days since last restock per product category
    RestockAge,
}

impl ChartKind {
    /// Parse the URL path segment used by the chart endpoint.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "status-by-warehouse" => Some(ChartKind::StatusByWarehouse),
            "cost-by-category" => Some(ChartKind::CostByCategory),
            "stock-vs-reorder" => Some(ChartKind::StockVsReorder),
            "restock-age" => Some(ChartKind::RestockAge),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::StatusByWarehouse => "status-by-warehouse",
            ChartKind::CostByCategory => "cost-by-category",
            ChartKind::StockVsReorder => "stock-vs-reorder",
            ChartKind::RestockAge => "restock-age",
        }
    }
}

/// Configuration options for chart generation
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Chart".to_string(),
            x_label: "X Axis".to_string(),
            y_label: "Y Axis".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Default title and axis labels for each chart kind, matching the panel
/// headings on the dashboard page.
pub fn chart_options(kind: ChartKind) -> ChartOptions {
    let (title, x_label, y_label) = match kind {
        ChartKind::StatusByWarehouse => {
            ("Stock Distribution per Warehouse", "Warehouse", "Records")
        }
        ChartKind::CostByCategory => {
            ("Storage Cost per Category", "Product Category", "Storage Cost")
        }
        ChartKind::StockVsReorder => {
            ("Stock vs Reorder Levels", "Product Category", "Stock Units")
        }
        ChartKind::RestockAge => (
            "Days Since Last Restock per Category",
            "Product Category",
            "Days",
        ),
    };
    ChartOptions {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        ..ChartOptions::default()
    }
}

/// Render a chart for the given inventory view
///
/// This is the entry point used by the chart endpoint. The chart is drawn
/// into a temporary PNG file and returned as bytes, so concurrent requests
/// never collide on a shared render path.
///
/// An empty view (every record filtered away) renders a placeholder notice
/// instead of failing, keeping the dashboard usable under aggressive
/// filters.
///
/// # Arguments
/// * `inventory` - The (already filtered) inventory view to visualize
/// * `kind` - Which chart to draw
/// * `options` - Chart styling options
/// * `as_of` - Date used for day arithmetic in the restock-age chart
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
///
/// # Examples
/// ```no_run
/// use chrono::NaiveDate;
/// use stockboard::graph::{ChartKind, chart_options, render_chart};
/// use stockboard::loader::load_inventory;
///
/// let inventory = load_inventory("warehouse_inventory.csv").unwrap();
/// let kind = ChartKind::StatusByWarehouse;
/// let as_of = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// match render_chart(&inventory, kind, &chart_options(kind), as_of) {
///     Ok(png_data) => println!("Chart rendered: {} bytes", png_data.len()),
///     Err(e) => eprintln!("Failed to render chart: {}", e),
/// }
/// ```
pub fn render_chart(
    inventory: &Inventory,
    kind: ChartKind,
    options: &ChartOptions,
    as_of: NaiveDate,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let tmp = tempfile::Builder::new()
        .prefix("stockboard_chart")
        .suffix(".png")
        .tempfile()?;
    let path = tmp.path().to_path_buf();

    if inventory.is_empty() {
        draw_empty_notice(&path, options)?;
    } else {
        match kind {
            ChartKind::StatusByWarehouse => draw_status_by_warehouse(&path, inventory, options)?,
            ChartKind::CostByCategory => draw_cost_by_category(&path, inventory, options)?,
            ChartKind::StockVsReorder => draw_stock_vs_reorder(&path, inventory, options)?,
            ChartKind::RestockAge => draw_restock_age(&path, inventory, options, as_of)?,
        }
    }

    // Read the file directly; the temp file is removed on drop
    let png_data = std::fs::read(&path)?;

    Ok(png_data)
}

/// Placeholder drawn when the filtered view has no records.
fn draw_empty_notice(path: &Path, options: &ChartOptions) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let style = ("sans-serif", 24).into_font().color(&BLACK);
    root.draw(&Text::new(
        format!("{} - no matching records", options.title),
        (40, (options.height / 2) as i32),
        style,
    ))?;

    root.present()?;
    Ok(())
}

/// Grouped bar chart of stock status counts per warehouse
///
/// Each warehouse occupies a block of four x slots: understocked (red),
/// optimal (green), overstocked (blue), and a gap.
fn draw_status_by_warehouse(
    path: &Path,
    inventory: &Inventory,
    options: &ChartOptions,
) -> Result<(), Box<dyn Error>> {
    let rollup = inventory.status_by_warehouse();
    let names: Vec<String> = rollup.iter().map(|w| w.warehouse_id.clone()).collect();
    let max_count = rollup
        .iter()
        .map(|w| w.understocked.max(w.optimal).max(w.overstocked))
        .max()
        .unwrap_or(0)
        .max(1) as i32;

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..rollup.len() as i32 * 4, 0..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rollup.len() * 4)
        .x_label_formatter(&|x| {
            // Label the middle slot of each warehouse block
            if *x % 4 == 1 {
                names.get((*x / 4) as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .x_desc(options.x_label.as_str())
        .y_desc(options.y_label.as_str())
        .draw()?;

    let series: [(&str, RGBColor, Vec<usize>); 3] = [
        (
            "Understocked",
            RED,
            rollup.iter().map(|w| w.understocked).collect(),
        ),
        ("Optimal", GREEN, rollup.iter().map(|w| w.optimal).collect()),
        (
            "Overstocked",
            BLUE,
            rollup.iter().map(|w| w.overstocked).collect(),
        ),
    ];

    for (offset, (label, color, counts)) in series.into_iter().enumerate() {
        chart
            .draw_series(counts.iter().enumerate().map(|(i, count)| {
                let x = i as i32 * 4 + offset as i32;
                Rectangle::new([(x, 0), (x + 1, *count as i32)], color.filled())
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Bar chart of total storage cost per product category
fn draw_cost_by_category(
    path: &Path,
    inventory: &Inventory,
    options: &ChartOptions,
) -> Result<(), Box<dyn Error>> {
    let rollup = inventory.cost_by_category();
    let names: Vec<String> = rollup.iter().map(|(category, _)| category.clone()).collect();
    let max_cost = rollup
        .iter()
        .map(|(_, cost)| *cost)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..rollup.len() as i32, 0.0..max_cost * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rollup.len())
        .x_label_formatter(&|x| names.get(*x as usize).cloned().unwrap_or_default())
        .x_desc(options.x_label.as_str())
        .y_desc(options.y_label.as_str())
        .draw()?;

    chart.draw_series(rollup.iter().enumerate().map(|(i, (_, cost))| {
        Rectangle::new([(i as i32, 0.0), (i as i32 + 1, *cost)], BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Scatter plot of stock units against the reorder level per category
///
/// Point color encodes the stock status, point radius scales with the
/// record's storage cost, and a black cross marks each record's reorder
/// level for comparison.
fn draw_stock_vs_reorder(
    path: &Path,
    inventory: &Inventory,
    options: &ChartOptions,
) -> Result<(), Box<dyn Error>> {
    let points = inventory.stock_points();
    let categories = inventory.categories();
    let index: HashMap<&String, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| (category, i))
        .collect();

    let max_stock = points
        .iter()
        .map(|p| p.current_stock_units.max(p.reorder_level))
        .fold(0.0f64, f64::max)
        .max(1.0);
    let max_cost = points
        .iter()
        .map(|p| p.storage_cost)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(-1..categories.len() as i32, 0.0..max_stock * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len() + 2)
        .x_label_formatter(&|x| {
            if *x >= 0 {
                categories.get(*x as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .x_desc(options.x_label.as_str())
        .y_desc(options.y_label.as_str())
        .draw()?;

    let status_colors: [(StockStatus, RGBColor); 3] = [
        (StockStatus::Understocked, RED),
        (StockStatus::Optimal, GREEN),
        (StockStatus::Overstocked, BLUE),
    ];

    for (status, color) in status_colors {
        chart
            .draw_series(points.iter().filter(|p| p.status == status).map(|p| {
                let x = index[&p.product_category] as i32;
                let radius = 3 + ((p.storage_cost / max_cost) * 7.0).round() as i32;
                Circle::new((x, p.current_stock_units), radius, color.filled())
            }))?
            .label(status.as_str())
            .legend(move |(x, y)| Circle::new((x + 4, y), 4, color.filled()));
    }

    chart
        .draw_series(points.iter().map(|p| {
            let x = index[&p.product_category] as i32;
            Cross::new((x, p.reorder_level), 5, BLACK.stroke_width(2))
        }))?
        .label("Reorder level")
        .legend(|(x, y)| Cross::new((x + 4, y), 4, BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Bar chart of mean days since restock per product category
fn draw_restock_age(
    path: &Path,
    inventory: &Inventory,
    options: &ChartOptions,
    as_of: NaiveDate,
) -> Result<(), Box<dyn Error>> {
    let rollup = inventory.restock_age_by_category(as_of);
    let names: Vec<String> = rollup.iter().map(|(category, _)| category.clone()).collect();
    let max_age = rollup
        .iter()
        .map(|(_, days)| *days)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..rollup.len() as i32, 0.0..max_age * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rollup.len())
        .x_label_formatter(&|x| names.get(*x as usize).cloned().unwrap_or_default())
        .x_desc(options.x_label.as_str())
        .y_desc(options.y_label.as_str())
        .draw()?;

    chart.draw_series(rollup.iter().enumerate().map(|(i, (_, days))| {
        Rectangle::new([(i as i32, 0.0), (i as i32 + 1, *days)], CYAN.filled())
    }))?;

    root.present()?;
    Ok(())
}
