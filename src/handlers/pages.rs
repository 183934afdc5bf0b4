use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::handlers::orders::WidgetResponse;
use crate::state::AppState;

/// Everything a front-end needs to render one page.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageModel {
    pub page: String,
    /// Only set for pages that mount the card form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,
    pub data: Value,
}

impl PageModel {
    pub fn plain(page: &str, data: Value) -> Self {
        Self {
            page: page.to_string(),
            publishable_key: None,
            data,
        }
    }

    pub fn with_card_form(page: &str, state: &AppState, data: Value) -> Self {
        Self {
            page: page.to_string(),
            publishable_key: Some(state.publishable_key.clone()),
            data,
        }
    }
}

pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(PageModel::plain("home", json!({})))
}

pub async fn virtual_terminal(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(PageModel::with_card_form("terminal", &state, json!({})))
}

/// Buy-once page for a single widget.
pub async fn charge_once(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let widget = web::block({
        let state = state.clone();
        move || state.orders.get_widget(id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let data = json!({ "widget": WidgetResponse::from(widget) });
    Ok(HttpResponse::Ok().json(PageModel::with_card_form("buy-once", &state, data)))
}

/// Subscription page; only recurring widgets qualify.
pub async fn plan(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let widget = web::block({
        let state = state.clone();
        move || state.orders.get_plan(id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let data = json!({ "widget": WidgetResponse::from(widget) });
    Ok(HttpResponse::Ok().json(PageModel::with_card_form("plan", &state, data)))
}
