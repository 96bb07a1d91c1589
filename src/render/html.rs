use serde::Serialize;

use crate::Result;
use crate::engine::Keyframes;
use crate::model::TableView;

#[derive(Serialize)]
struct Embedded<'a> {
    table: &'a TableView,
    keyframes: &'a Keyframes,
}

/// Render a self-contained HTML report (data embedded as JSON).
///
/// The page does not simulate anything: it loops over keyframes sampled from
/// the engine, picking the frame for the elapsed time on each repaint.
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(table: &TableView, keyframes: &Keyframes) -> Result<String> {
    let json = serde_json::to_string(&Embedded { table, keyframes })?
        // Keep "</script>" in a row name from closing the script element.
        .replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; background: #f8fafc; }
  main { max-width: 1100px; margin: 48px auto; padding: 0 16px; }
  .card { background: white; border: 1px solid #e5e7eb; border-radius: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.06); }
  header { padding: 16px 20px 8px; }
  h1 { font-size: 20px; margin: 0; color: #111827; }
  .muted { color: #6b7280; font-size: 13px; margin-top: 4px; }

  table { border-collapse: collapse; width: 100%; table-layout: fixed; }
  th, td { border-bottom: 1px solid #eee; padding: 8px 12px; text-align: left; font-size: 14px; }
  th { background: #f9fafb; color: #6b7280; font-weight: 500; font-size: 12px; }
  .num { text-align: right; font-variant-numeric: tabular-nums; font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 12px; color: #4b5563; }
  .name { white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }

  .track { position: relative; width: 100%; height: 24px; background: #f3f4f6; border-radius: 6px; overflow: hidden; }
  .bar { position: absolute; top: 0; height: 24px; border-radius: 6px; }
  .trail { position: absolute; top: 0; left: 0; width: 100%; height: 100%; opacity: 0.3; }
</style>
</head>
<body>
<main>
  <div class="card">
    <header>
      <h1 id="title"></h1>
      <div class="muted" id="legend"></div>
    </header>
    <table>
      <colgroup>
        <col style="width: 220px">
        <col style="width: 110px">
        <col style="width: 110px">
        <col>
      </colgroup>
      <thead>
        <tr>
          <th>Operation</th>
          <th class="num">Throughput</th>
          <th class="num">Latency</th>
          <th>Visualization</th>
        </tr>
      </thead>
      <tbody id="rows"></tbody>
    </table>
  </div>
  <p class="muted" id="footer"></p>
</main>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;
const TABLE = DATA.table;
const KEYFRAMES = DATA.keyframes;

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function withAlpha(rgb, alpha) {
  return rgb.replace("rgb(", "rgba(").replace(")", `, ${alpha})`);
}

function renderRows() {
  document.getElementById("title").textContent = TABLE.title;
  document.getElementById("legend").textContent = TABLE.legend;
  document.getElementById("footer").textContent =
    `profile: ${TABLE.profile} | max latency: ${TABLE.max_latency_label}`;

  const body = document.getElementById("rows");
  body.innerHTML = "";
  const bars = [];
  for (const row of TABLE.rows) {
    const tr = document.createElement("tr");
    tr.title = row.description;
    tr.innerHTML = `
      <td class="name" title="${escapeHtml(row.name)}">${escapeHtml(row.name)}</td>
      <td class="num">${escapeHtml(row.throughput_label)}</td>
      <td class="num">${escapeHtml(row.latency_label)}</td>
      <td><div class="track"><div class="bar"><div class="trail"></div></div></div></td>
    `;
    body.appendChild(tr);

    const bar = tr.querySelector(".bar");
    bar.style.width = `${row.params.visual_length}%`;
    bar.style.backgroundColor = row.color;
    bar.style.boxShadow = `0 0 15px ${withAlpha(row.color, 0.25)}`;
    bars.push({ row, bar, trail: tr.querySelector(".trail"), lastSign: 0 });
  }
  return bars;
}

function paint(entry, frame) {
  const [position, sign] = frame;
  const { row, bar, trail } = entry;
  bar.style.left = `${position}%`;
  if (sign === entry.lastSign) return;
  entry.lastSign = sign;

  const fx = sign > 0 ? row.effects_forward : row.effects_backward;
  bar.style.filter = fx.blur_px > 0 ? `blur(${fx.blur_px}px)` : "";
  bar.style.transform = `scaleX(${fx.scale_x})`;
  bar.style.transformOrigin = fx.anchor;
  trail.style.background = `linear-gradient(to ${sign > 0 ? "left" : "right"}, ${row.color}, transparent)`;
  trail.style.transform = `scaleX(${fx.trail_scale})`;
  trail.style.transformOrigin = fx.anchor === "left" ? "right" : "left";
}

const bars = renderRows();
let start = null;
let handle = null;

function tick(now) {
  if (start === null) start = now;
  const index = Math.floor((now - start) / KEYFRAMES.frame_ms);
  bars.forEach((entry, i) => {
    const frames = KEYFRAMES.rows[i];
    if (frames && frames.length) paint(entry, frames[index % frames.length]);
  });
  handle = requestAnimationFrame(tick);
}

handle = requestAnimationFrame(tick);
window.addEventListener("pagehide", () => {
  if (handle !== null) cancelAnimationFrame(handle);
});
</script>
</body>
</html>
"#;

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(&table.title))
        .replace("__DATA__", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
