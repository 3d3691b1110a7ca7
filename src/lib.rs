/*!
# Stockboard

A browser-based warehouse inventory dashboard, built in Rust.

## Overview

Stockboard reads a warehouse inventory CSV and renders a local dashboard
that flags understocked and overstocked items. Every view refresh re-reads
the file, classifies each record against its reorder and maximum
thresholds, and renders KPI tiles, charts, a record table, and download
links for the filtered data.

## Architecture

The application follows a load-compute-render flow behind a small HTTP
server:

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript (static assets, no build step)
- **Key Components**:
  - KPI Tiles - Warehouse/category counts, total storage cost, understocked items
  - Filter Controls - Warehouse and category multi-selects
  - Chart Panels - Server-rendered PNG charts
  - Record Table - Per-row status and derived columns

### Backend Layer
- **Technologies**: Rust, axum, plotters
- **Core Components**:
  - Inventory Loader - CSV parsing with header normalization and row-level
    degradation
  - Stock Classifier - Understocked/Optimal/Overstocked per record
  - Aggregation Engine - KPIs, insights, and per-warehouse/per-category
    rollups
  - Chart Renderer - PNG generation for the four dashboard charts
  - Export Writer - CSV and XLSX downloads of the filtered view

### Data Lifecycle
- The inventory file is read on each view refresh, held in memory for the
  duration of the computation, and discarded. Nothing is persisted.

## Key Features

- Header cleanup: files with messy column spelling load without edits
- Stock classification with per-record maximum thresholds or the 1.5x
  reorder-level fallback
- Potential-savings and days-since-restock insights
- Warehouse/category filtering across every view and export
- Chart generation (status distribution, storage cost, stock vs reorder,
  restock age)
- CSV and XLSX export of the filtered view

## Modules

- **record**: Inventory record type, stock status classification, derived
  quantities
- **inventory**: The loaded view - filtering, KPI summary, insights, chart
  rollups
- **loader**: CSV import with header normalization and typed errors
- **graph**: Chart PNG generation
- **downloader**: Export functionality (CSV, XLSX)
- **app**: Routing and request handling

## REST API Endpoints

- `/` - Dashboard page
- `/api/filters` - Warehouse and category lists
- `/api/summary` - KPI block and insights
- `/api/records` - Filtered records with derived columns
- `/api/charts/{kind}` - Chart PNG (`status-by-warehouse`,
  `cost-by-category`, `stock-vs-reorder`, `restock-age`)
- `/api/export` - CSV/XLSX download of the filtered view
*/

// Re-export all modules so they appear in the documentation
pub mod inventory;
pub mod loader;
pub mod record;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod downloader;
#[cfg(feature = "web")]
pub mod graph;

/// Re-export everything from these modules to make it easier to use
pub use inventory::*;
pub use loader::*;
pub use record::*;
