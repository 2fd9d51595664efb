//! HTML export page (/export-data)

use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};
use serde_json::Value;
use std::sync::Arc;

use crate::AppState;
use crate::domain::records;
use crate::models::RecordKind;
use crate::services::error::LogErr;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/export-data", get(export_data))
}

/// GET /export-data - List uploaded videos as download links
async fn export_data(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let vlogs = records::list_records(state.store.as_ref(), RecordKind::Video)
        .await
        .log_500("List vlogs for export error")?;

    Ok(Html(render_export_page(&vlogs)))
}

fn non_empty_str<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    doc.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn render_export_page(vlogs: &[Value]) -> String {
    let mut items = String::new();
    for vlog in vlogs {
        let Some(url) = non_empty_str(vlog, "video_url") else {
            continue;
        };
        let title = non_empty_str(vlog, "video_title").unwrap_or(url);
        let user = non_empty_str(vlog, "user_id").unwrap_or("unknown");

        items.push_str(&format!(
            "      <li><a href=\"{}\" download>{}</a> <small>({})</small></li>\n",
            escape_html(url),
            escape_html(title),
            escape_html(user),
        ));
    }

    let videos = if items.is_empty() {
        "    <p>No videos uploaded yet.</p>\n".to_string()
    } else {
        format!("    <ul>\n{items}    </ul>\n")
    };

    format!(
        "<!DOCTYPE html>
<html>
  <head>
    <meta charset=\"utf-8\">
    <title>EmoGo Data Export</title>
  </head>
  <body>
    <h1>EmoGo Data Export</h1>
    <h2>JSON data</h2>
    <ul>
      <li><a href=\"/vlogs\">Vlogs</a></li>
      <li><a href=\"/sentiments\">Sentiments</a></li>
      <li><a href=\"/gps\">GPS</a></li>
    </ul>
    <h2>Videos</h2>
{videos}  </body>
</html>
"
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
