use crate::Result;
use crate::series::{AggregatedSeries, Bucket, StarHistory};
use chrono::{DateTime, Local};
use core::fmt::Write;
use serde_json::{Value, json};

const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const CHART_DIV_ID: &str = "star-history";
const Y_AXIS_TITLE: &str = "cumulative_star_count";

// Panel domains of a two-row layout with a 0.15 vertical gap
const TOP_PANEL: [f64; 2] = [0.575, 1.0];
const BOTTOM_PANEL: [f64; 2] = [0.0, 0.425];

/// Render both series as a two-panel interactive chart.
///
/// Row 1 plots the daily cumulative count against the day, row 2 the quarterly
/// cumulative count against the quarter label.
pub fn generate<W: Write>(history: &StarHistory, title: Option<&str>, timestamp: DateTime<Local>, writer: &mut W) -> Result<()> {
    let data = json!([
        trace(&history.daily, "Daily", "x", "y"),
        trace(&history.quarterly, "Quarterly", "x2", "y2"),
    ]);

    let layout = layout(title);

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(writer, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(writer, "  <title>{}</title>", html_escape(title.unwrap_or("Star History")))?;
    writeln!(writer, "  <script src=\"{PLOTLY_CDN_URL}\" charset=\"utf-8\"></script>")?;
    write_styles(writer)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "  <div id=\"{CHART_DIV_ID}\" class=\"chart\"></div>")?;
    writeln!(
        writer,
        "  <p class=\"footer\">{} stars. Produced by star-history {} on {}</p>",
        history.daily.total(),
        env!("CARGO_PKG_VERSION"),
        timestamp.format("%Y-%m-%d")
    )?;
    writeln!(writer, "  <script>")?;
    writeln!(writer, "    const data = {};", script_json(&data))?;
    writeln!(writer, "    const layout = {};", script_json(&layout))?;
    writeln!(writer, "    Plotly.newPlot(\"{CHART_DIV_ID}\", data, layout, {{ responsive: true }});")?;
    writeln!(writer, "  </script>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;

    Ok(())
}

fn trace<B: Bucket>(series: &AggregatedSeries<B>, name: &str, xaxis: &str, yaxis: &str) -> Value {
    let (x, y): (Vec<String>, Vec<u64>) = series
        .rows()
        .iter()
        .map(|row| (row.bucket.to_string(), row.cumulative_star_count))
        .unzip();

    json!({
        "type": "scatter",
        "mode": "markers",
        "name": name,
        "x": x,
        "y": y,
        "xaxis": xaxis,
        "yaxis": yaxis,
    })
}

fn layout(title: Option<&str>) -> Value {
    let mut layout = json!({
        "showlegend": false,
        "xaxis": { "anchor": "y", "domain": [0.0, 1.0], "type": "date" },
        "yaxis": { "anchor": "x", "domain": TOP_PANEL, "title": { "text": Y_AXIS_TITLE } },
        "xaxis2": { "anchor": "y2", "domain": [0.0, 1.0], "type": "category" },
        "yaxis2": { "anchor": "x2", "domain": BOTTOM_PANEL, "title": { "text": Y_AXIS_TITLE } },
        "annotations": [
            subplot_title("Daily", TOP_PANEL[1]),
            subplot_title("Quarterly", BOTTOM_PANEL[1]),
        ],
    });

    if let Some(title) = title {
        layout["title"] = json!({ "text": title });
    }

    layout
}

fn subplot_title(text: &str, y: f64) -> Value {
    json!({
        "text": text,
        "x": 0.5,
        "y": y,
        "xref": "paper",
        "yref": "paper",
        "xanchor": "center",
        "yanchor": "bottom",
        "showarrow": false,
        "font": { "size": 16 },
    })
}

fn write_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "  <style>")?;
    writeln!(writer, "    body {{ margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }}")?;
    writeln!(writer, "    .chart {{ width: 100%; height: 90vh; }}")?;
    writeln!(writer, "    .footer {{ text-align: center; color: #64748b; font-size: 0.85rem; }}")?;
    writeln!(writer, "  </style>")?;
    Ok(())
}

/// Serialize a value for inclusion in an inline script.
///
/// `</` is escaped so that no string value can close the script element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
