use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::attempt::AttemptPatch;
use crate::utils::validation::parse_uuid;
use crate::AppState;

struct RecordingUpload {
    filename: String,
    data: Bytes,
    candidate_id: Uuid,
    question_set_id: Uuid,
    qa_entries: JsonValue,
}

async fn collect_recording(multipart: &mut Multipart, file_field: &str) -> Result<RecordingUpload> {
    let mut file: Option<(String, Bytes)> = None;
    let mut candidate_id: Option<String> = None;
    let mut question_set_id: Option<String> = None;
    let mut qa_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == file_field {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await?;
            file = Some((filename, data));
        } else {
            match name.as_str() {
                "candidate_id" => candidate_id = Some(field.text().await?),
                "question_set_id" => question_set_id = Some(field.text().await?),
                "qa_data" => qa_raw = Some(field.text().await?),
                _ => {}
            }
        }
    }

    let (filename, data) =
        file.ok_or_else(|| Error::BadRequest(format!("{} file required", file_field)))?;
    if filename.is_empty() {
        return Err(Error::BadRequest("empty filename".to_string()));
    }

    let candidate_id = parse_uuid(candidate_id.as_deref(), "candidate_id")?;
    let question_set_id = parse_uuid(question_set_id.as_deref(), "question_set_id")?;
    let qa_entries = parse_qa_entries(qa_raw.as_deref());

    Ok(RecordingUpload {
        filename,
        data,
        candidate_id,
        question_set_id,
        qa_entries,
    })
}

/// Unparseable or non-array `qa_data` degrades to an empty log rather than
/// rejecting the upload; the recording itself is the valuable part.
fn parse_qa_entries(raw: Option<&str>) -> JsonValue {
    raw.and_then(|r| serde_json::from_str::<JsonValue>(r).ok())
        .filter(|v| v.is_array())
        .unwrap_or_else(|| json!([]))
}

#[axum::debug_handler]
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let upload = collect_recording(&mut multipart, "audio").await?;
    let audio_url = state
        .media_service
        .store_recording(upload.candidate_id, &upload.filename, "webm", upload.data)
        .await?;
    state
        .attempt_service
        .upsert(
            upload.candidate_id,
            upload.question_set_id,
            AttemptPatch::audio(audio_url.clone(), upload.qa_entries),
        )
        .await?;
    Ok(Json(json!({ "status": "success", "audio_url": audio_url })).into_response())
}

#[axum::debug_handler]
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let upload = collect_recording(&mut multipart, "file").await?;
    let video_url = state
        .media_service
        .store_recording(upload.candidate_id, &upload.filename, "webm", upload.data)
        .await?;
    state
        .attempt_service
        .upsert(
            upload.candidate_id,
            upload.question_set_id,
            AttemptPatch::video(video_url.clone(), upload.qa_entries),
        )
        .await?;
    Ok(Json(json!({ "status": "success", "video_url": video_url })).into_response())
}
