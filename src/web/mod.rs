//! Web API module for Panelsmith.
//!
//! This module exposes one in-memory builder session over a REST API so a
//! browser frontend can drive the panel engine. Requests are applied one at
//! a time in arrival order; nothing is persisted.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/sizes` - Panel sizes with their variants
//! - `GET /api/descriptor?size=&variant=` - Resolve a layout descriptor
//! - `GET /api/icons` - Query the icon catalog (optional ?search= and ?category=)
//! - `GET /api/icons/categories` - List icon categories
//! - `GET /api/panel` - Current configuration, descriptor and slots
//! - `PUT /api/panel/config` - Change size, variant, glass or frame
//! - `POST /api/panel/gestures` - Dispatch a drag gesture event
//! - `POST /api/panel/slots/{slot}` - Place an icon at a slot
//! - `POST /api/panel/icons` - Place an icon in the first empty slot
//! - `DELETE /api/panel/icons/{instance_id}` - Remove a placed icon
//! - `DELETE /api/panel/icons` - Clear the panel
//! - `POST /api/panel/move` - Swap two slots
//! - `GET /api/panel/export` - Export snapshot
//! - `GET /api/panel/export/markdown` - Markdown export

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{IconCatalog, IconCategory};
use crate::config::Config;
use crate::export;
use crate::models::{
    BuilderConfig, ExportSnapshot, Frame, Glass, GroupKind, IconDefinition, IconInstance,
    InstanceId, LayoutDescriptor, Notification, PanelSize, Severity,
};
use crate::services::gestures::GestureEvent;
use crate::services::reconciler::Reconciliation;
use crate::services::resolver::{offered_variants, preferred_variant, resolve};
use crate::services::session::{BuilderSession, GestureOutcome, SessionError};
use crate::services::store::{AssignmentError, Placement};

/// Error half of every fallible handler.
type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Icon catalog (immutable after load)
    catalog: Arc<IconCatalog>,
    /// The single builder session
    session: Arc<Mutex<BuilderSession>>,
}

impl AppState {
    /// Creates a new application state with a fresh session from `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(IconCatalog::load()?);
        let session = BuilderSession::new(
            Arc::clone(&catalog),
            config.defaults.builder_config(),
            config.reconcile.policy(),
        );
        Ok(Self {
            catalog,
            session: Arc::new(Mutex::new(session)),
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// One panel size with its variants.
#[derive(Debug, Serialize)]
pub struct SizeInfo {
    /// Size key ("2", "4", ...).
    pub size: PanelSize,
    /// Display name ("4 Module").
    pub name: String,
    /// Variants offered for this size.
    pub variants: Vec<&'static str>,
    /// Variant selected when switching to this size.
    pub preferred: &'static str,
}

/// Size list response.
#[derive(Debug, Serialize)]
pub struct SizeListResponse {
    /// All panel sizes.
    pub sizes: Vec<SizeInfo>,
}

/// Query parameters for descriptor resolution.
#[derive(Debug, Deserialize)]
pub struct DescriptorQuery {
    /// Panel size.
    pub size: String,
    /// Variant name; the size's default layout when omitted.
    pub variant: Option<String>,
}

/// Resolved descriptor response.
#[derive(Debug, Serialize)]
pub struct DescriptorResponse {
    /// The descriptor.
    pub descriptor: LayoutDescriptor,
    /// Number of addressable slots.
    pub total_slots: usize,
    /// Empty-slot label per index.
    pub labels: Vec<String>,
}

/// Query parameters for icon search.
#[derive(Debug, Deserialize)]
pub struct IconQuery {
    /// Search term to filter icon names.
    pub search: Option<String>,
    /// Category ID to filter icons.
    pub category: Option<String>,
}

/// Icon list response.
#[derive(Debug, Serialize)]
pub struct IconListResponse {
    /// Matching icons in catalog order.
    pub icons: Vec<IconDefinition>,
    /// Total count of matching icons.
    pub total: usize,
}

/// Category list response.
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    /// Icon categories in display order.
    pub categories: Vec<IconCategory>,
}

/// One slot of the current panel.
#[derive(Debug, Serialize)]
pub struct SlotView {
    /// 0-based index.
    pub index: usize,
    /// Kind of the owning group.
    pub kind: GroupKind,
    /// Label shown while empty.
    pub label: String,
    /// Placed icon, if any.
    pub icon: Option<IconInstance>,
}

/// Current panel state.
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    /// Builder configuration.
    pub config: BuilderConfig,
    /// Descriptor the slots are sized against.
    pub descriptor: LayoutDescriptor,
    /// Every slot in index order.
    pub slots: Vec<SlotView>,
    /// Number of occupied slots.
    pub occupied: usize,
}

/// Notification with its presentation fields.
#[derive(Debug, Serialize)]
pub struct NotificationView {
    /// Structured notification.
    #[serde(flatten)]
    pub notification: Notification,
    /// Short title.
    pub title: &'static str,
    /// Full message.
    pub message: String,
    /// Presentation severity.
    pub severity: Severity,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            title: notification.title(),
            message: notification.message(),
            severity: notification.severity(),
            notification,
        }
    }
}

/// Placement details returned by place operations.
#[derive(Debug, Serialize)]
pub struct PlacementView {
    /// Slot written to.
    pub slot: usize,
    /// New instance ID.
    pub instance_id: InstanceId,
    /// Instance that was overwritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<IconInstance>,
}

impl From<Placement> for PlacementView {
    fn from(placement: Placement) -> Self {
        Self {
            slot: placement.slot,
            instance_id: placement.instance_id,
            replaced: placement.replaced,
        }
    }
}

/// Response of every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// What happened (e.g. "placed", "panel_full", "moved", "reset").
    pub outcome: &'static str,
    /// Placement details for place operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementView>,
    /// Panel after the mutation.
    pub panel: PanelResponse,
    /// Notifications emitted by the mutation.
    pub notifications: Vec<NotificationView>,
}

/// Configuration change request. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdateRequest {
    /// New size; switches to its preferred variant unless `variant` is set.
    pub size: Option<String>,
    /// New variant.
    pub variant: Option<String>,
    /// New glass.
    pub glass: Option<Glass>,
    /// New frame.
    pub frame: Option<Frame>,
}

/// Place request body.
#[derive(Debug, Deserialize)]
pub struct PlaceRequest {
    /// Catalog icon id.
    pub icon_id: String,
}

/// Move request body.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// Source slot.
    pub from: usize,
    /// Target slot.
    pub to: usize,
}

/// Markdown export response.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// The exported markdown content.
    pub markdown: String,
    /// Suggested filename for download.
    pub suggested_filename: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl From<SessionError> for (StatusCode, Json<ApiError>) {
    fn from(err: SessionError) -> Self {
        let status = match &err {
            SessionError::UnknownIcon(_) => StatusCode::NOT_FOUND,
            SessionError::Assignment(AssignmentError::OutOfRange { .. }) => StatusCode::BAD_REQUEST,
            SessionError::Assignment(AssignmentError::PanelFull { .. }) => StatusCode::CONFLICT,
        };
        (status, Json(ApiError::new(err.to_string())))
    }
}

fn parse_size(value: &str) -> Result<PanelSize, (StatusCode, Json<ApiError>)> {
    value
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, Json(ApiError::with_details("Invalid size", e))))
}

fn panel_view(session: &BuilderSession) -> PanelResponse {
    let descriptor = session.descriptor().clone();
    let slots = session
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let location = descriptor.group_of(index)?;
            Some(SlotView {
                index,
                kind: location.kind,
                label: descriptor.slot_label(index).unwrap_or_default(),
                icon: slot.clone(),
            })
        })
        .collect();

    PanelResponse {
        config: session.config().clone(),
        occupied: session.active_icons().count(),
        descriptor,
        slots,
    }
}

fn mutation(
    session: &mut BuilderSession,
    outcome: &'static str,
    placement: Option<Placement>,
) -> MutationResponse {
    MutationResponse {
        outcome,
        placement: placement.map(PlacementView::from),
        panel: panel_view(session),
        notifications: session
            .take_notifications()
            .into_iter()
            .map(NotificationView::from)
            .collect(),
    }
}

const fn reconciliation_outcome(reconciliation: Reconciliation) -> &'static str {
    match reconciliation {
        Reconciliation::Initialized => "initialized",
        Reconciliation::Unchanged => "unchanged",
        Reconciliation::Reset { .. } => "reset",
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/sizes - List panel sizes and variants.
async fn list_sizes() -> Json<SizeListResponse> {
    let sizes = PanelSize::ALL
        .iter()
        .map(|&size| SizeInfo {
            size,
            name: size.to_string(),
            variants: offered_variants(size).to_vec(),
            preferred: preferred_variant(size),
        })
        .collect();

    Json(SizeListResponse { sizes })
}

/// GET /api/descriptor - Resolve a descriptor.
async fn get_descriptor(Query(query): Query<DescriptorQuery>) -> ApiResult<DescriptorResponse> {
    let size = parse_size(&query.size)?;
    let descriptor = resolve(size, query.variant.as_deref().unwrap_or_default());
    let total_slots = descriptor.total_slots();
    let labels = (0..total_slots)
        .filter_map(|index| descriptor.slot_label(index))
        .collect();

    Ok(Json(DescriptorResponse {
        descriptor,
        total_slots,
        labels,
    }))
}

/// GET /api/icons - Query the icon catalog.
async fn list_icons(
    State(state): State<AppState>,
    Query(query): Query<IconQuery>,
) -> Json<IconListResponse> {
    let search = query.search.as_deref().unwrap_or("");

    let icons: Vec<IconDefinition> = state
        .catalog
        .search(search)
        .into_iter()
        .filter(|icon| {
            query
                .category
                .as_deref()
                .map_or(true, |category| icon.category == category)
        })
        .cloned()
        .collect();

    let total = icons.len();
    Json(IconListResponse { icons, total })
}

/// GET /api/icons/categories - List icon categories.
async fn list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        categories: state.catalog.categories().to_vec(),
    })
}

/// GET /api/panel - Current panel.
async fn get_panel(State(state): State<AppState>) -> Json<PanelResponse> {
    let session = state.session.lock().await;
    Json(panel_view(&session))
}

/// PUT /api/panel/config - Change configuration and reconcile.
async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<ConfigUpdateRequest>,
) -> ApiResult<MutationResponse> {
    let mut session = state.session.lock().await;
    let mut config = session.config().clone();

    if let Some(size) = &request.size {
        let size = parse_size(size)?;
        if size != config.size {
            config.size = size;
            config.variant = preferred_variant(size).to_string();
        }
    }
    if let Some(variant) = request.variant {
        config.variant = variant;
    }
    if let Some(glass) = request.glass {
        config.glass = glass;
    }
    if let Some(frame) = request.frame {
        config.frame = frame;
    }

    let reconciliation = session.apply_config(config);
    Ok(Json(mutation(
        &mut session,
        reconciliation_outcome(reconciliation),
        None,
    )))
}

/// POST /api/panel/gestures - Dispatch a drag gesture.
async fn handle_gesture(
    State(state): State<AppState>,
    Json(event): Json<GestureEvent>,
) -> ApiResult<MutationResponse> {
    let mut session = state.session.lock().await;
    let response = match session.handle_gesture(event)? {
        GestureOutcome::Ignored => mutation(&mut session, "ignored", None),
        GestureOutcome::Placed(placement) => mutation(&mut session, "placed", Some(placement)),
        GestureOutcome::PanelFull => mutation(&mut session, "panel_full", None),
        GestureOutcome::Moved { .. } => mutation(&mut session, "moved", None),
        GestureOutcome::NotMoved => mutation(&mut session, "not_moved", None),
    };
    Ok(Json(response))
}

/// POST /api/panel/slots/{slot} - Place an icon at a slot.
async fn place_at_slot(
    State(state): State<AppState>,
    Path(slot): Path<usize>,
    Json(request): Json<PlaceRequest>,
) -> ApiResult<MutationResponse> {
    let mut session = state.session.lock().await;
    let placement = session.place(&request.icon_id, slot)?;
    Ok(Json(mutation(&mut session, "placed", Some(placement))))
}

/// POST /api/panel/icons - Place an icon in the first empty slot.
async fn place_first_empty(
    State(state): State<AppState>,
    Json(request): Json<PlaceRequest>,
) -> ApiResult<MutationResponse> {
    let mut session = state.session.lock().await;
    let response = match session.place_first_empty(&request.icon_id)? {
        Some(placement) => mutation(&mut session, "placed", Some(placement)),
        None => mutation(&mut session, "panel_full", None),
    };
    Ok(Json(response))
}

/// DELETE /api/panel/icons/{instance_id} - Remove a placed icon.
async fn remove_icon(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    let outcome = match session.remove(&InstanceId::from(instance_id)) {
        Some(_) => "removed",
        None => "not_found",
    };
    Json(mutation(&mut session, outcome, None))
}

/// DELETE /api/panel/icons - Clear the panel.
async fn clear_icons(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    session.clear_all();
    Json(mutation(&mut session, "cleared", None))
}

/// POST /api/panel/move - Swap two slots.
async fn move_icon(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    let outcome = if session.move_icon(request.from, request.to) {
        "moved"
    } else {
        "not_moved"
    };
    Json(mutation(&mut session, outcome, None))
}

/// GET /api/panel/export - Export snapshot.
async fn export_snapshot(State(state): State<AppState>) -> Json<ExportSnapshot> {
    let session = state.session.lock().await;
    Json(session.export_snapshot())
}

/// GET /api/panel/export/markdown - Markdown export.
async fn export_markdown(State(state): State<AppState>) -> Json<ExportResponse> {
    let snapshot = state.session.lock().await.export_snapshot();
    let now = chrono::Local::now();

    Json(ExportResponse {
        markdown: export::export_to_markdown(&snapshot, &state.catalog, now),
        suggested_filename: export::default_filename(snapshot.size, now),
    })
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run locally next to its frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/sizes", get(list_sizes))
        .route("/api/descriptor", get(get_descriptor))
        .route("/api/icons", get(list_icons))
        .route("/api/icons/categories", get(list_categories))
        // Session endpoints
        .route("/api/panel", get(get_panel))
        .route("/api/panel/config", put(update_config))
        .route("/api/panel/gestures", post(handle_gesture))
        .route("/api/panel/slots/{slot}", post(place_at_slot))
        .route(
            "/api/panel/icons",
            post(place_first_empty).delete(clear_icons),
        )
        .route(
            "/api/panel/icons/{instance_id}",
            axum::routing::delete(remove_icon),
        )
        .route("/api/panel/move", post(move_icon))
        .route("/api/panel/export", get(export_snapshot))
        .route("/api/panel/export/markdown", get(export_markdown))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the catalog fails to load or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(&config)?;
    let app = create_router(state);

    info!("Starting Panelsmith web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
