use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::error;

use crate::interchange::{export_csv, import_csv};
use crate::roster::{rows_from_session, Company, DaysRegistered};
use crate::session::EditorSession;
use crate::store::{CsvFileStore, RosterStore};

/// Shared state: one editing session plus the external store handle,
/// constructed once at startup.
pub struct AppState {
    pub session: Mutex<EditorSession>,
    pub store: CsvFileStore,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignmentDto {
    pub slot_id: String,
    pub company_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub companies: Vec<Company>,
    pub assignments: Vec<SlotAssignmentDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub company_id: String,
    pub slot_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaysRequest {
    pub days_registered: DaysRegistered,
}

async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "booth-assignments",
        "endpoints": ["/companies", "/assignments", "/import", "/export"],
    })))
}

// Fetches the roster from the store and starts a fresh session over it.
// Every slot comes back unassigned; prior in-memory edits are discarded.
async fn get_companies(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store.fetch_roster() {
        Ok(rows) => {
            let session = EditorSession::load(&rows);
            let companies = session.companies.clone();
            *state.session.lock().unwrap() = session;
            Ok(HttpResponse::Ok().json(companies))
        }
        Err(e) => {
            error!("failed to fetch roster: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": "Failed to fetch companies"})))
        }
    }
}

// Replaces the session with the client's view of it, then persists to the
// store. A save failure keeps the in-memory state so the operator can retry.
async fn save_companies(
    req: web::Json<SaveRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let mut session = state.session.lock().unwrap();

    session.companies = req.companies;
    session.floor.reset();
    for dto in &req.assignments {
        let Some(company_id) = &dto.company_id else {
            continue;
        };
        // Ids that don't parse as floor slots match nothing and are skipped.
        if let Ok(slot_id) = dto.slot_id.parse() {
            let _ = session.floor.place(company_id, slot_id);
        }
    }

    let rows = rows_from_session(&session.companies, &session.floor);
    match state.store.persist_roster(&rows) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "savedAt": chrono::Utc::now().to_rfc3339(),
        }))),
        Err(e) => {
            error!("failed to persist roster: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": "Failed to update companies"})))
        }
    }
}

async fn get_assignments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session.lock().unwrap();
    let assignments: Vec<SlotAssignmentDto> = session
        .floor
        .iter()
        .map(|(slot_id, company_id)| SlotAssignmentDto {
            slot_id: slot_id.to_string(),
            company_id: company_id.map(str::to_string),
        })
        .collect();
    Ok(HttpResponse::Ok().json(assignments))
}

async fn post_assignment(
    req: web::Json<AssignRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slot_id = match req.slot_id.parse() {
        Ok(id) => id,
        Err(()) => {
            return Ok(HttpResponse::BadRequest()
                .json(serde_json::json!({"error": format!("Invalid slot id: {}", req.slot_id)})))
        }
    };

    let mut session = state.session.lock().unwrap();
    match session.assign(&req.company_id, slot_id) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "evicted": outcome.evicted.map(|s| s.to_string()),
            "displaced": outcome.displaced,
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()}))),
    }
}

async fn delete_assignment(
    slot_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slot_id = match slot_id.parse() {
        Ok(id) => id,
        Err(()) => {
            return Ok(HttpResponse::BadRequest()
                .json(serde_json::json!({"error": format!("Invalid slot id: {}", slot_id)})))
        }
    };

    let mut session = state.session.lock().unwrap();
    let removed = session.unassign(slot_id);
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "removed": removed})))
}

async fn set_days(
    company_id: web::Path<String>,
    req: web::Json<DaysRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.session.lock().unwrap();
    if session.set_days(&company_id, req.days_registered) {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::NotFound()
            .json(serde_json::json!({"error": format!("Unknown company: {}", company_id)})))
    }
}

// CSV upload. The header is validated before any row is applied, so a
// rejected file leaves the session exactly as it was.
async fn import(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    let text = String::from_utf8_lossy(&body);
    match import_csv(&text) {
        Ok((companies, assignments)) => {
            let mut session = state.session.lock().unwrap();
            let summary = session.apply_import(&companies, &assignments);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "importedCompanies": summary.rows,
                "matchedCompanies": summary.matched,
            })))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {e}"),
        }))),
    }
}

async fn export(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session.lock().unwrap();
    let csv = export_csv(&session.companies, &session.floor);
    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

pub async fn start_server(port: u16, store: CsvFileStore) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState {
        session: Mutex::new(EditorSession::new()),
        store,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .route("/", web::get().to(index))
            .route("/companies", web::get().to(get_companies))
            .route("/companies", web::post().to(save_companies))
            .route("/companies/{id}/days", web::post().to(set_days))
            .route("/assignments", web::get().to(get_assignments))
            .route("/assignments", web::post().to(post_assignment))
            .route("/assignments/{slot_id}", web::delete().to(delete_assignment))
            .route("/import", web::post().to(import))
            .route("/export", web::get().to(export))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
