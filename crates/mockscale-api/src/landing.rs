//! Informational landing page.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::ApiState;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Mock WiFi Scale</title>
</head>
<body>
  <h1>Mock WiFi Scale</h1>
  <p>Running.</p>
  <ul>
    <li>Read weight: <code>GET /api/weight</code></li>
    <li>Tare: <code>POST /api/tare</code></li>
  </ul>
  <table>
    <tr><th>Range</th><td>0 - {{ capacity }} kg</td></tr>
    <tr><th>Precision</th><td>0.01 kg</td></tr>
    <tr><th>Stable rate</th><td>{{ stable_rate }}%</td></tr>
    <tr><th>Payload dialect</th><td>{{ format }}</td></tr>
  </table>
</body>
</html>"#
)]
struct LandingTemplate {
    capacity: String,
    stable_rate: String,
    format: &'static str,
}

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(
        tmpl.render()
            .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")),
    )
}

/// GET /
pub async fn index(State(state): State<ApiState>) -> Html<String> {
    let model = state.instrument.model();
    render(LandingTemplate {
        capacity: format!("{}", model.capacity),
        stable_rate: format!("{}", (model.stable_probability * 100.0).round()),
        format: state.format.as_str(),
    })
}
