//! Server-rendered pages. Every form posts its own inputs; nothing is kept
//! between requests.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use mindsignal_instruments::all_instruments;

use crate::error::ApiError;
use crate::render::{
    self, AssessmentPage, ClassifyPage, ErrorPage, ForumPage, IndexPage, InstrumentOption,
    Verdict,
};
use crate::service;
use crate::state::AppState;

/// Forum offered in the form by default; Reddit picks a community.
pub const DEFAULT_FORUM: &str = "random";

#[derive(Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct ForumForm {
    #[serde(default)]
    pub forum: String,
}

#[derive(Deserialize)]
pub struct AssessmentForm {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub instrument: Option<String>,
}

/// Render a page, or the error page when anything before it failed.
fn respond(state: &AppState, page: Result<String, ApiError>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            let (status, message) = e.into_parts();
            let body = ErrorPage {
                status: status.as_u16(),
                message,
            };
            match render::render_page(&state.templates, render::ERROR, &body) {
                Ok(html) => (status, Html(html)).into_response(),
                Err(e) => {
                    let (status, message) = e.into_parts();
                    (status, message).into_response()
                }
            }
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Response {
    let page = IndexPage {
        instruments: all_instruments()
            .iter()
            .map(|i| InstrumentOption {
                id: i.id().to_string(),
                name: i.name().to_string(),
            })
            .collect(),
        default_forum: DEFAULT_FORUM,
    };
    let html = render::render_page(&state.templates, render::INDEX, &page);
    respond(&state, html)
}

pub async fn classify(State(state): State<AppState>, Form(form): Form<ClassifyForm>) -> Response {
    let html = match service::classify_text(&state, form.text.clone()).await {
        Ok(prediction) => {
            let page = ClassifyPage {
                text: form.text,
                verdict: Verdict::from(&prediction),
            };
            render::render_page(&state.templates, render::CLASSIFY_RESULT, &page)
        }
        Err(ApiError::BadRequest(_)) => Err(ApiError::BadRequest(
            "Please enter some text to analyze.".to_string(),
        )),
        Err(e) => Err(e),
    };
    respond(&state, html)
}

pub async fn forum(State(state): State<AppState>, Form(form): Form<ForumForm>) -> Response {
    let html = service::sample_forum(&state, &form.forum)
        .await
        .and_then(|sample| {
            render::render_page(&state.templates, render::FORUM_RESULT, &ForumPage::from(&sample))
        });
    respond(&state, html)
}

pub async fn assessment(
    State(state): State<AppState>,
    Form(form): Form<AssessmentForm>,
) -> Response {
    let html = service::assess_user(&state, &form.user, form.instrument.as_deref())
        .await
        .and_then(|result| {
            render::render_page(
                &state.templates,
                render::ASSESSMENT_RESULT,
                &AssessmentPage::from(&result),
            )
        });
    respond(&state, html)
}
