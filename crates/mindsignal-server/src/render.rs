//! HTML pages rendered with Tera.
//!
//! Templates are compiled into the binary and parsed once at startup. Page
//! data is built as plain serializable structs and handed to Tera through
//! `serde_json`, so templates only format values and never compute them.

use serde::Serialize;
use tera::{Context, Tera};

use mindsignal_core::classification::{ClassLabel, Prediction};
use mindsignal_instruments::scoring::{MAX_GRADE, SeverityBand};

use crate::error::ApiError;
use crate::service::{ForumSample, UserAssessment};

pub const INDEX: &str = "index.html";
pub const CLASSIFY_RESULT: &str = "classify_result.html";
pub const FORUM_RESULT: &str = "forum_result.html";
pub const ASSESSMENT_RESULT: &str = "assessment_result.html";
pub const ERROR: &str = "error.html";

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../templates/base.html")),
    (INDEX, include_str!("../templates/index.html")),
    (CLASSIFY_RESULT, include_str!("../templates/classify_result.html")),
    (FORUM_RESULT, include_str!("../templates/forum_result.html")),
    (ASSESSMENT_RESULT, include_str!("../templates/assessment_result.html")),
    (ERROR, include_str!("../templates/error.html")),
];

pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}

pub fn render_page<T: Serialize>(tera: &Tera, name: &str, page: &T) -> Result<String, ApiError> {
    let value = serde_json::to_value(page)?;
    let context = Context::from_value(value)?;
    Ok(tera.render(name, &context)?)
}

// ── Bars ─────────────────────────────────────────────────────────────────────

/// A horizontal bar: fill width in percent and its colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub percent: u32,
    pub color: &'static str,
}

pub fn band_color(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::Minimal => "green",
        SeverityBand::Mild => "yellow",
        SeverityBand::Moderate => "orange",
        SeverityBand::Severe => "red",
    }
}

pub fn grade_color(grade: u32) -> &'static str {
    match grade {
        0 => "green",
        1 => "yellow",
        2 => "orange",
        _ => "red",
    }
}

/// Total-score bar, truncated to a whole percent.
pub fn total_bar(total: u32, max_total: u32, band: SeverityBand) -> Bar {
    let percent = if max_total == 0 {
        0
    } else {
        total.min(max_total) * 100 / max_total
    };
    Bar {
        percent,
        color: band_color(band),
    }
}

/// Item bar. Grade 0 still shows a quarter-width bar.
pub fn item_bar(grade: u32) -> Bar {
    let grade = grade.min(MAX_GRADE);
    Bar {
        percent: (grade + 1) * 25,
        color: grade_color(grade),
    }
}

// ── Pages ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct InstrumentOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub instruments: Vec<InstrumentOption>,
    pub default_forum: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub heading: &'static str,
    pub suicidal: bool,
    /// Confidence in percent, one decimal.
    pub confidence: Option<String>,
}

impl From<&Prediction> for Verdict {
    fn from(p: &Prediction) -> Self {
        Self {
            heading: p.label.display_name(),
            suicidal: p.label == ClassLabel::Suicidal,
            confidence: p.confidence.map(|c| format!("{:.1}", c * 100.0)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyPage {
    pub text: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForumPage {
    pub forum: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub fallback: bool,
    pub verdict: Verdict,
}

impl From<&ForumSample> for ForumPage {
    fn from(s: &ForumSample) -> Self {
        Self {
            forum: s.post.forum.clone(),
            author: s.post.author.clone(),
            title: s.post.title.clone(),
            content: s.post.content(),
            url: s.url.clone(),
            fallback: s.via == mindsignal_forum::selection::Selection::HotFallback,
            verdict: Verdict::from(&s.prediction),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub name: String,
    pub grade: u32,
    pub max_grade: u32,
    pub bar: Bar,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentPage {
    pub user: String,
    pub instrument_name: String,
    pub post_count: usize,
    pub total: u32,
    pub max_total: u32,
    pub severity: &'static str,
    pub bar: Bar,
    pub items: Vec<ItemRow>,
}

impl From<&UserAssessment> for AssessmentPage {
    fn from(a: &UserAssessment) -> Self {
        let result = &a.assessment;
        Self {
            user: a.user.clone(),
            instrument_name: a.instrument_name.clone(),
            post_count: a.post_count,
            total: result.total,
            max_total: a.max_total,
            severity: result.severity_band.label(),
            bar: total_bar(result.total, a.max_total, result.severity_band),
            items: result
                .breakdown
                .iter()
                .map(|item| ItemRow {
                    name: item.item_name.clone(),
                    grade: item.grade,
                    max_grade: MAX_GRADE,
                    bar: item_bar(item.grade),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}
