//! HTTP dashboard server.
//!
//! Serves the recipe dashboard views as JSON chart descriptions. The prepared
//! table is loaded once before the server starts and shared read-only by all
//! handlers, so no lock is taken per request.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use nutriscope_core::views::{GroupedCountChart, ScatterChart};
use nutriscope_core::{
    HeatmapView, NutrientSelection, OverviewView, PopularityView, PrepareReport, PreparedTable,
    health_popularity_view, health_rating_view, heatmap_view, nutrient_impact_view,
    nutrient_profile_view, overview_view, popularity_view,
};

/// Shared server state.
struct AppState {
    table: PreparedTable,
}

#[derive(Deserialize)]
struct ProfileParams {
    /// Zero-based index into the sidebar recipe list.
    selected: Option<usize>,
}

#[derive(Deserialize)]
struct HeatmapParams {
    /// `all` or a nutrient name (default: protein).
    nutrient: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: &'static str,
    #[serde(flatten)]
    report: PrepareReport,
    sidebar_recipes: usize,
}

#[derive(Serialize)]
struct RecipesResponse {
    recipes: Vec<String>,
    total: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "NutriScope Server",
        "version": nutriscope_core::VERSION,
        "recipes": state.table.len(),
        "endpoints": {
            "/": "This API index",
            "/health": "Health check with preparation row counts",
            "/api/v1/recipes": "Sidebar recipe names (index is the click id)",
            "/api/v1/views/nutrient-profile": {
                "method": "GET",
                "description": "Calories vs health score scatter",
                "params": {
                    "selected": "Sidebar index of the recipe to annotate (optional)",
                }
            },
            "/api/v1/views/heatmap": {
                "method": "GET",
                "description": "Nutrient heat map by diet type and preparation time, with statistics",
                "params": {
                    "nutrient": "all, protein, calories, fat, sugar, carbs (default: protein)",
                }
            },
            "/api/v1/views/popularity": "Preparation time and step count vs rating",
            "/api/v1/views/nutrient-impact": "Rating distribution by nutrient level",
            "/api/v1/views/health-rating": "Recipe counts by health score range and rating category",
            "/api/v1/views/health-popularity": "Health score vs rating scatter",
            "/api/v1/views/overview": "Summary figure",
        },
        "examples": {
            "annotated_profile": "/api/v1/views/nutrient-profile?selected=0",
            "all_heatmaps": "/api/v1/views/heatmap?nutrient=all",
        }
    }))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let report = *state.table.report();
    Json(HealthResponse {
        status: if report.retained > 0 {
            "healthy".to_string()
        } else {
            "empty".to_string()
        },
        version: nutriscope_core::VERSION,
        report,
        sidebar_recipes: state.table.sidebar_names().len(),
    })
}

async fn handle_recipes(State(state): State<Arc<AppState>>) -> Json<RecipesResponse> {
    let recipes = state.table.sidebar_names().to_vec();
    let total = recipes.len();
    Json(RecipesResponse { recipes, total })
}

async fn handle_profile(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProfileParams>,
) -> Json<ScatterChart> {
    Json(nutrient_profile_view(&state.table, params.selected))
}

async fn handle_heatmap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HeatmapParams>,
) -> ApiResult<HeatmapView> {
    let selection = match params.nutrient.as_deref() {
        None => NutrientSelection::default(),
        Some(raw) => raw.parse::<NutrientSelection>().map_err(|e| {
            debug!("rejected heatmap selection: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?,
    };
    Ok(Json(heatmap_view(&state.table, selection)))
}

async fn handle_popularity(State(state): State<Arc<AppState>>) -> Json<PopularityView> {
    Json(popularity_view(&state.table))
}

async fn handle_nutrient_impact(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<GroupedCountChart>> {
    Json(nutrient_impact_view(&state.table))
}

async fn handle_health_rating(State(state): State<Arc<AppState>>) -> Json<GroupedCountChart> {
    Json(health_rating_view(&state.table))
}

async fn handle_health_popularity(State(state): State<Arc<AppState>>) -> Json<ScatterChart> {
    Json(health_popularity_view(&state.table))
}

async fn handle_overview(State(state): State<Arc<AppState>>) -> Json<OverviewView> {
    Json(overview_view(&state.table))
}

/// Build the axum router over a prepared table.
pub fn build_router(table: PreparedTable) -> Router {
    let state = Arc::new(AppState { table });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/v1/recipes", get(handle_recipes))
        .route("/api/v1/views/nutrient-profile", get(handle_profile))
        .route("/api/v1/views/heatmap", get(handle_heatmap))
        .route("/api/v1/views/popularity", get(handle_popularity))
        .route("/api/v1/views/nutrient-impact", get(handle_nutrient_impact))
        .route("/api/v1/views/health-rating", get(handle_health_rating))
        .route("/api/v1/views/health-popularity", get(handle_health_popularity))
        .route("/api/v1/views/overview", get(handle_overview))
        .with_state(state)
}

/// Run the HTTP dashboard server until the listener fails.
pub async fn run_server(table: PreparedTable, host: &str, port: u16) -> std::io::Result<()> {
    let recipes = table.len();
    let app = build_router(table);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("serving {recipes} recipes on http://{addr}");
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use nutriscope_core::{RawRecipe, prepare};
    use tower::ServiceExt;

    fn recipe(name: &str, calories: f64, protein: f64, diet: &str) -> RawRecipe {
        RawRecipe {
            name: Some(name.to_string()),
            calories: Some(calories),
            protein: Some(protein),
            fat: Some(1.0),
            sugar: Some(2.0),
            carbs: Some(15.0),
            minutes: Some(calories / 10.0),
            n_steps: Some(5.0),
            rating: Some(4.0),
            diet_type: Some(diet.to_string()),
        }
    }

    fn router() -> Router {
        build_router(prepare(vec![
            recipe("Lentil Soup", 150.0, 20.0, "Vegan"),
            recipe("Tofu Bowl", 300.0, 25.0, "Vegan"),
            recipe("Omelette", 250.0, 18.0, "Keto"),
        ]))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rows_read"], 3);
        assert_eq!(body["retained"], 3);
        assert_eq!(body["sidebar_recipes"], 3);
    }

    #[tokio::test]
    async fn test_recipes_lists_sidebar() {
        let (status, body) = get_json("/api/v1/recipes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["recipes"][0], "Lentil Soup");
    }

    #[tokio::test]
    async fn test_profile_annotation() {
        let (_, body) = get_json("/api/v1/views/nutrient-profile?selected=2").await;
        let text = body["annotation"]["text"].as_str().unwrap();
        assert!(text.contains("Omelette"));

        let (status, body) = get_json("/api/v1/views/nutrient-profile?selected=99").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["annotation"].is_null());
        assert_eq!(body["traces"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_heatmap_default_and_all() {
        let (status, body) = get_json("/api/v1/views/heatmap").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selection"], "protein");
        assert_eq!(body["panels"].as_array().unwrap().len(), 1);

        let (_, body) = get_json("/api/v1/views/heatmap?nutrient=all").await;
        assert_eq!(body["selection"], "all");
        assert_eq!(body["columns"], 3);
        assert_eq!(body["panels"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_heatmap_rejects_unknown_nutrient() {
        let (status, body) = get_json("/api/v1/views/heatmap?nutrient=fiber").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("fiber"));
    }

    #[tokio::test]
    async fn test_secondary_views_respond() {
        for uri in [
            "/",
            "/api/v1/views/popularity",
            "/api/v1/views/nutrient-impact",
            "/api/v1/views/health-rating",
            "/api/v1/views/health-popularity",
            "/api/v1/views/overview",
        ] {
            let (status, _) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK, "GET {uri}");
        }
    }
}
