use std::path::{Path, PathBuf};

use critique_core::{
    BadgeList, ImprovementCard, ImprovementList, Polarity, ResultView, SnapshotRequest, Theme,
};
use critique_logging::critique_info;

use crate::filename::snapshot_filename;
use crate::persist::{AtomicFileWriter, PersistError};

/// Turns a captured result view into a standalone document.
pub trait SnapshotRenderer {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &'static str;
    fn render(&self, request: &SnapshotRequest) -> Vec<u8>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Renders the snapshot and writes it to `dir`, named after the candidate.
pub fn export_snapshot(
    dir: &Path,
    request: &SnapshotRequest,
    renderer: &dyn SnapshotRenderer,
) -> Result<ExportSummary, ExportError> {
    let filename = snapshot_filename(&request.view.candidate_name, renderer.extension());
    let content = renderer.render(request);
    let path = AtomicFileWriter::new(dir.to_path_buf()).write(&filename, &content)?;
    critique_info!("Exported snapshot to {:?} ({} bytes)", path, content.len());
    Ok(ExportSummary {
        path,
        bytes: content.len() as u64,
    })
}

/// Self-contained themed HTML page: inline CSS, no scripts, no external assets.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSnapshotRenderer;

impl SnapshotRenderer for HtmlSnapshotRenderer {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, request: &SnapshotRequest) -> Vec<u8> {
        render_page(request).into_bytes()
    }
}

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(16 * 1024),
        }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    fn text(&mut self, s: &str) {
        self.buf.push_str(&esc(s));
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn render_page(request: &SnapshotRequest) -> String {
    let view = &request.view;
    let mut w = Html::new();

    w.push("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>");
    w.text(&view.candidate_name);
    w.push(" - Critique</title><style>");
    w.push(BASE_CSS);
    w.push("</style></head><body class=\"");
    w.push(match request.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    });
    w.push("\">");

    if request.controls_visible {
        w.push(
            "<nav class=\"controls\"><button>Toggle theme</button>\
             <button>Download PDF</button><button>Debug</button></nav>",
        );
    }

    w.push("<main class=\"content\"><h1 id=\"candidateName\">");
    w.text(&view.candidate_name);
    w.push("</h1>");
    push_score(&mut w, view);

    w.push("<section><h2>Summary</h2><p>");
    w.text(&view.summary);
    w.push("</p></section>");

    w.push("<section><h2>Strengths</h2>");
    push_badges(&mut w, &view.strengths);
    w.push("</section><section><h2>Weaknesses</h2>");
    push_badges(&mut w, &view.weaknesses);
    w.push("</section><section><h2>Suggested rewrites</h2>");
    push_improvements(&mut w, &view.improvements);
    w.push("</section></main></body></html>");
    w.finish()
}

fn push_score(w: &mut Html, view: &ResultView) {
    w.push("<div class=\"score\"><span id=\"scoreVal\">");
    w.push(view.score.to_string());
    w.push("</span>/100<div class=\"score-bar\"><div class=\"score-fill\" style=\"width:");
    w.push(view.score_bar.width_percent.to_string());
    w.push("%;background:");
    w.text(&view.score_bar.color);
    w.push("\"></div></div></div>");
}

fn push_badges(w: &mut Html, badges: &BadgeList) {
    match badges {
        BadgeList::Placeholder(message) => {
            w.push("<p class=\"placeholder\">");
            w.text(message);
            w.push("</p>");
        }
        BadgeList::Badges(items) => {
            w.push("<div class=\"badge-container\">");
            for badge in items {
                let (class, mark) = match badge.polarity {
                    Polarity::Positive => ("skill-badge success", "&#10004;"),
                    Polarity::Negative => ("skill-badge error", "&#10008;"),
                };
                w.push(format!("<div class=\"{class}\">{mark} "));
                w.text(&badge.text);
                w.push("</div>");
            }
            w.push("</div>");
        }
    }
}

fn push_improvements(w: &mut Html, improvements: &ImprovementList) {
    let cards = match improvements {
        ImprovementList::Placeholder(message) => {
            w.push("<p class=\"placeholder\">");
            w.text(message);
            w.push("</p>");
            return;
        }
        ImprovementList::Cards(cards) => cards,
    };

    for card in cards {
        match card {
            ImprovementCard::General { advice, rationale } => {
                w.push("<div class=\"general-card\"><h4>General Advice</h4><p>");
                w.text(advice);
                w.push("</p>");
                if let Some(why) = rationale {
                    w.push("<p class=\"why\"><em>Why: ");
                    w.text(why);
                    w.push("</em></p>");
                }
                w.push("</div>");
            }
            ImprovementCard::Rewrite {
                original,
                improved,
                rationale,
            } => {
                w.push("<div class=\"rewrite-card\"><div class=\"rewrite-original\"><strong>Original:</strong> &quot;");
                w.text(original);
                w.push("&quot;</div><div class=\"rewrite-better\"><strong>Better:</strong> &quot;");
                w.text(improved);
                w.push("&quot;</div><div class=\"rewrite-why\"><em>");
                w.text(rationale);
                w.push("</em></div></div>");
            }
        }
    }
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

const BASE_CSS: &str = "body{font-family:system-ui,sans-serif;margin:0;padding:24px;}\
body.light{background:#f8fafc;color:#0f172a;}\
body.dark{background:#0f172a;color:#e2e8f0;}\
.controls{display:flex;gap:8px;margin-bottom:16px;}\
.score-bar{height:12px;background:#e2e8f0;border-radius:6px;overflow:hidden;}\
.score-fill{height:100%;}\
.badge-container{display:flex;flex-wrap:wrap;gap:6px;}\
.skill-badge{padding:4px 10px;border-radius:12px;font-size:.9rem;}\
.skill-badge.success{background:#dcfce7;color:#166534;}\
.skill-badge.error{background:#fee2e2;color:#991b1b;}\
.placeholder{color:#94a3b8;}\
.general-card,.rewrite-card{border-radius:8px;padding:12px;margin:8px 0;}\
.general-card{background:#dbeafe;color:#1e3a8a;}\
.rewrite-card{background:#f1f5f9;color:#0f172a;}\
.rewrite-original{color:#b91c1c;}\
.rewrite-better{color:#15803d;}\
.why,.rewrite-why{font-size:.85rem;opacity:.7;}";
