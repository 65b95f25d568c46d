//! HTML for the single-page form and its results.

use crate::pipeline::{FailureNotice, Outcome, Solution};
use pulldown_cmark::escape::{escape_href, escape_html};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

pub const PAGE_TITLE: &str = "ADF Support AI";
pub const HEADING: &str = "Azure Data Factory Support Portal";
pub const ISSUE_LABEL: &str = "Describe the issue (no PII):";
pub const SUBMIT_LABEL: &str = "Get Solution";
pub const SPINNER_TEXT: &str = "Analyzing and searching for the best solution...";
pub const SOLUTION_HEADING: &str = "Suggested Solution";
pub const REFERENCES_HEADING: &str = "References";

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 10rem; font: inherit; }
.spinner { display: none; margin-top: 1rem; }
.spinner.active { display: flex; align-items: center; gap: 0.5rem; }
.spinner .wheel { width: 1rem; height: 1rem; border: 2px solid #ccc; border-top-color: #0078d4; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.notice { padding: 0.75rem 1rem; background: #fde7e9; border-left: 4px solid #a4262c; }
"#;

/// Render the whole page.
///
/// `issue` refills the text area after a submission. `outcome` is `None` on a
/// plain `GET`; an ignored submission renders the same as `None`.
pub fn render_page(issue: Option<&str>, outcome: Option<&Outcome>) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", PAGE_TITLE));
    out.push_str(&format!("<style>{}</style>\n", STYLE));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", HEADING));

    render_form(&mut out, issue.unwrap_or_default());

    match outcome {
        Some(Outcome::Solved(solution)) => render_solution(&mut out, solution),
        Some(Outcome::Failed(notice)) => render_notice(&mut out, *notice),
        Some(Outcome::Ignored) | None => {}
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_form(out: &mut String, issue: &str) {
    out.push_str(
        "<form method=\"post\" action=\"/\" \
onsubmit=\"document.getElementById('spinner').classList.add('active')\">\n",
    );
    out.push_str(&format!("<label for=\"issue\">{}</label>\n", ISSUE_LABEL));
    out.push_str("<textarea id=\"issue\" name=\"issue\">");
    push_escaped(out, issue);
    out.push_str("</textarea>\n");
    out.push_str(&format!("<button type=\"submit\">{}</button>\n", SUBMIT_LABEL));
    out.push_str(&format!(
        "<div id=\"spinner\" class=\"spinner\"><span class=\"wheel\"></span><span>{}</span></div>\n",
        SPINNER_TEXT
    ));
    out.push_str("</form>\n");
}

fn render_solution(out: &mut String, solution: &Solution) {
    out.push_str(&format!("<h3>{}</h3>\n", SOLUTION_HEADING));
    out.push_str("<div class=\"solution\">\n");
    out.push_str(&render_markdown(&solution.explanation));
    out.push_str("</div>\n");

    out.push_str(&format!("<h3>{}</h3>\n", REFERENCES_HEADING));
    if solution.references.is_empty() {
        return;
    }
    out.push_str("<ul class=\"references\">\n");
    for link in &solution.references {
        out.push_str("<li><a href=\"");
        if is_safe_href(link) {
            push_escaped_href(out, link);
        } else {
            out.push('#');
        }
        out.push_str("\" rel=\"noopener noreferrer\" target=\"_blank\">");
        push_escaped(out, link);
        out.push_str("</a></li>\n");
    }
    out.push_str("</ul>\n");
}

fn render_notice(out: &mut String, notice: FailureNotice) {
    out.push_str("<p class=\"notice\" role=\"alert\">");
    push_escaped(out, notice.message());
    out.push_str("</p>\n");
}

/// Render model output as Markdown. Raw HTML comes out as escaped text and
/// links with a script-capable scheme are neutralised.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) => {
            Event::Start(Tag::Link(kind, neutralise(dest), title))
        }
        Event::End(Tag::Link(kind, dest, title)) => {
            Event::End(Tag::Link(kind, neutralise(dest), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Event::Start(Tag::Image(kind, neutralise(dest), title))
        }
        Event::End(Tag::Image(kind, dest, title)) => {
            Event::End(Tag::Image(kind, neutralise(dest), title))
        }
        other => other,
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    rendered
}

fn neutralise(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_href(&dest) {
        dest
    } else {
        CowStr::Borrowed("#")
    }
}

/// Relative references and http(s)/mailto URLs only
fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    let scheme_end = match href.find(':') {
        Some(i) => i,
        None => return true,
    };
    // a colon after a path, query or fragment delimiter is not a scheme
    if href[..scheme_end].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = href[..scheme_end].to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto")
}

fn push_escaped(out: &mut String, text: &str) {
    // writing into a String cannot fail
    let _ = escape_html(&mut *out, text);
}

fn push_escaped_href(out: &mut String, href: &str) {
    let _ = escape_href(&mut *out, href);
}
