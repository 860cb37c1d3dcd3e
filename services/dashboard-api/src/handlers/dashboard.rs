//! Embedded dashboard page.
//!
//! A single static page driven by the JSON endpoints; charts are rendered
//! client-side as inline SVG, so the service itself stays a plain data API.

use axum::response::Html;

/// Dashboard HTML, served at `/`.
const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="cs">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Srážky v ČR</title>
<style>
    body { margin: 0; font-family: system-ui, sans-serif; background: #fafafa; color: #222; }
    header { background: #1a365d; color: white; padding: 14px 24px; }
    header h1 { margin: 0; font-size: 1.3rem; font-weight: 600; }
    main { max-width: 1100px; margin: 0 auto; padding: 20px 24px; }
    .controls { display: flex; flex-wrap: wrap; gap: 16px; align-items: end; margin-bottom: 20px; }
    .controls label { display: block; font-size: 0.8rem; margin-bottom: 4px; color: #555; }
    select[multiple] { min-width: 260px; min-height: 110px; }
    input[type=date] { padding: 4px; }
    button { padding: 6px 16px; background: #1a365d; color: white; border: 0; border-radius: 4px; cursor: pointer; }
    button:hover { background: #2d4a6f; }
    h2 { font-size: 1.05rem; margin: 24px 0 8px; }
    #chart { background: white; border: 1px solid #ddd; border-radius: 4px; width: 100%; }
    table { border-collapse: collapse; background: white; }
    th, td { border: 1px solid #ddd; padding: 6px 12px; font-size: 0.9rem; }
    th { background: #f0f2f5; text-align: left; }
    td.num { text-align: right; font-variant-numeric: tabular-nums; }
    .error { color: #b00020; margin: 12px 0; }
    .hint { color: #888; font-style: italic; }
</style>
</head>
<body>
<header><h1>Denní úhrn srážek v ČR</h1></header>
<main>
    <div class="controls">
        <div>
            <label for="stations">Stanice</label>
            <select id="stations" multiple></select>
        </div>
        <div>
            <label for="start">Od</label>
            <input type="date" id="start">
        </div>
        <div>
            <label for="end">Do</label>
            <input type="date" id="end">
        </div>
        <div>
            <label for="stat">Sumarizace</label>
            <select id="stat">
                <option value="sum">Suma srážek (mm)</option>
                <option value="mean">Denní průměr srážek (mm)</option>
                <option value="var">Variabilita</option>
            </select>
        </div>
        <div><button id="apply">Zobrazit</button></div>
    </div>
    <div id="message" class="error" hidden></div>
    <h2>Denní úhrn srážek (mm)</h2>
    <svg id="chart" viewBox="0 0 1000 320" height="320"></svg>
    <h2>Sumarizace za vybrané období</h2>
    <div id="summary"><span class="hint">vyberte stanici</span></div>
</main>
<script>
const COLORS = ['#1f77b4', '#ff7f0e', '#2ca02c', '#d62728', '#9467bd', '#8c564b',
                '#e377c2', '#7f7f7f', '#bcbd22', '#17becf'];

async function getJson(url) {
    const resp = await fetch(url);
    const body = await resp.json();
    if (!resp.ok) throw new Error(body.message || resp.statusText);
    return body;
}

function selectedStations() {
    return Array.from(document.getElementById('stations').selectedOptions)
        .map(o => o.value);
}

function showError(text) {
    const el = document.getElementById('message');
    el.textContent = text || '';
    el.hidden = !text;
}

function drawChart(daily) {
    const svg = document.getElementById('chart');
    const w = 1000, h = 320, pad = { l: 46, r: 12, t: 10, b: 28 };
    let max = 1;
    for (const s of daily.series)
        for (const v of s.values)
            if (v !== null && v > max) max = v;

    const n = daily.dates.length;
    const x = i => pad.l + (n < 2 ? 0 : i * (w - pad.l - pad.r) / (n - 1));
    const y = v => h - pad.b - v * (h - pad.t - pad.b) / max;

    let parts = [];
    for (let g = 0; g <= 4; g++) {
        const val = max * g / 4, yy = y(val);
        parts.push(`<line x1="${pad.l}" y1="${yy}" x2="${w - pad.r}" y2="${yy}" stroke="#eee"/>`);
        parts.push(`<text x="${pad.l - 6}" y="${yy + 4}" text-anchor="end" font-size="11" fill="#777">${val.toFixed(1)}</text>`);
    }
    const tick = Math.max(1, Math.ceil(n / 8));
    for (let i = 0; i < n; i += tick) {
        parts.push(`<text x="${x(i)}" y="${h - 8}" text-anchor="middle" font-size="11" fill="#777">${daily.dates[i]}</text>`);
    }
    daily.series.forEach((s, si) => {
        const color = COLORS[si % COLORS.length];
        let d = '', pen = false;
        s.values.forEach((v, i) => {
            if (v === null) { pen = false; return; }
            d += (pen ? 'L' : 'M') + x(i).toFixed(1) + ' ' + y(v).toFixed(1);
            pen = true;
        });
        if (d) parts.push(`<path d="${d}" fill="none" stroke="${color}" stroke-width="2"/>`);
        s.values.forEach((v, i) => {
            if (v !== null && v > 0)
                parts.push(`<circle cx="${x(i).toFixed(1)}" cy="${y(v).toFixed(1)}" r="3" fill="${color}"><title>${s.station} ${daily.dates[i]}: ${v} mm</title></circle>`);
        });
        parts.push(`<text x="${w - pad.r}" y="${pad.t + 14 + si * 16}" text-anchor="end" font-size="12" fill="${color}">${s.station}</text>`);
    });
    svg.innerHTML = parts.join('');
}

function drawSummary(summary) {
    const label = { sum: 'Suma (mm)', mean: 'Průměr (mm)', var: 'Variabilita' }[summary.stat];
    let html = `<table><tr><th>Stanice</th><th>${label}</th><th>Dny s daty</th></tr>`;
    for (const row of summary.rows) {
        const value = row.value === null ? '–' : row.value.toFixed(2);
        html += `<tr><td>${row.station}</td><td class="num">${value}</td><td class="num">${row.days_with_data}</td></tr>`;
    }
    document.getElementById('summary').innerHTML = html + '</table>';
}

async function refresh() {
    const stations = selectedStations();
    if (stations.length === 0) {
        showError('Vyberte alespoň jednu stanici.');
        return;
    }
    const params = new URLSearchParams({
        start: document.getElementById('start').value,
        end: document.getElementById('end').value,
        stations: stations.join(','),
    });
    try {
        const daily = await getJson('/api/daily?' + params);
        params.set('stat', document.getElementById('stat').value);
        const summary = await getJson('/api/summary?' + params);
        showError('');
        drawChart(daily);
        drawSummary(summary);
    } catch (e) {
        showError(e.message);
    }
}

async function init() {
    try {
        const [stations, range] = await Promise.all([
            getJson('/api/stations'),
            getJson('/api/range'),
        ]);
        const select = document.getElementById('stations');
        for (const s of stations) {
            if (!s.has_data) continue;
            const option = document.createElement('option');
            option.value = s.name;
            option.textContent = `${s.name} (${s.elevation_m} m)`;
            select.appendChild(option);
        }
        const start = document.getElementById('start'), end = document.getElementById('end');
        start.min = end.min = range.start;
        start.max = end.max = range.end;
        start.value = range.start;
        end.value = range.end;
    } catch (e) {
        showError(e.message);
    }
}

document.getElementById('apply').addEventListener('click', refresh);
init();
</script>
</body>
</html>
"##;

/// GET / - Dashboard page
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
