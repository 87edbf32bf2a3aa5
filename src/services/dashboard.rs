use std::fmt::Write as _;

use crate::schemas::statistics::StatisticsReport;

const REFRESH_SECONDS: u32 = 5;

/// Renders the usage counters as a self-refreshing HTML bar chart with a summary list.
pub(crate) fn render(project_name: &str, report: &StatisticsReport) -> String {
    let entries = report.entries();
    let max = entries.iter().map(|(_, value)| *value).max().unwrap_or(0).max(1);
    let title = escape_html(project_name);

    let mut bars = String::new();
    let mut summary = String::new();
    for (label, value) in entries {
        let width = value.max(0) as f64 / max as f64 * 100.0;
        let _ = write!(
            bars,
            "<div class=\"row\"><span class=\"label\">{label}</span>\
             <div class=\"track\"><div class=\"bar\" style=\"width: {width:.1}%\"></div></div>\
             <span class=\"value\">{value}</span></div>"
        );
        let _ = write!(summary, "<li>{label}: <strong>{value}</strong></li>");
    }

    format!(
        "<!DOCTYPE html>\
<html lang=\"en\">\
<head>\
<meta charset=\"utf-8\">\
<meta http-equiv=\"refresh\" content=\"{REFRESH_SECONDS}\">\
<title>{title} statistics</title>\
<style>\
body {{ font-family: sans-serif; margin: 2rem; color: #222; }}\
.row {{ display: flex; align-items: center; margin: 0.4rem 0; }}\
.label {{ width: 12rem; }}\
.track {{ flex: 1; background: #eee; height: 1.2rem; margin: 0 0.8rem; }}\
.bar {{ background: #3b7dd8; height: 100%; }}\
.value {{ width: 4rem; text-align: right; }}\
</style>\
</head>\
<body>\
<h1>{title} statistics</h1>\
<section class=\"chart\">{bars}</section>\
<h2>Summary</h2>\
<ul>{summary}</ul>\
</body>\
</html>"
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
