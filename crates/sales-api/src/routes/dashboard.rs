//! Aggregation handlers. Each one validates nothing itself: the pipeline
//! inside the engine is the single validation site.

use axum::Json;
use axum::extract::{Query, State};
use sales_domain::{DashboardFilter, Kpis, ProductSales, RegionSales, TimeSales};

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /kpis`
pub async fn kpis(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> ApiResult<Json<Kpis>> {
    let kpis = state.run(move |engine| engine.kpis(&filter)).await?;
    Ok(Json(kpis))
}

/// `GET /sales_by_region`
pub async fn sales_by_region(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> ApiResult<Json<Vec<RegionSales>>> {
    let rows = state.run(move |engine| engine.sales_by_region(&filter)).await?;
    Ok(Json(rows))
}

/// `GET /sales_by_product`
pub async fn sales_by_product(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> ApiResult<Json<Vec<ProductSales>>> {
    let rows = state.run(move |engine| engine.sales_by_product(&filter)).await?;
    Ok(Json(rows))
}

/// `GET /sales_over_time`
pub async fn sales_over_time(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> ApiResult<Json<Vec<TimeSales>>> {
    let rows = state.run(move |engine| engine.sales_over_time(&filter)).await?;
    Ok(Json(rows))
}
