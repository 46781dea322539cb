//! Report generator implementation.

use bh_common::AnalysisDataset;
use chrono::Utc;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::payload::encode_payload;

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate the self-contained HTML report for a dataset.
    pub fn generate(&self, dataset: &AnalysisDataset) -> Result<String> {
        debug!("Generating report");
        let payload = encode_payload(dataset)?;
        let html = self.render_html(dataset, &payload.base64);

        info!(
            bytes = html.len(),
            title = self.config.resolved_title(),
            "Report generated"
        );

        Ok(html)
    }

    fn render_html(&self, dataset: &AnalysisDataset, payload_b64: &str) -> String {
        let title = escape_html(self.config.resolved_title());
        let theme_class = self.config.theme.css_class();
        let pako_url = self.config.pako.url(&self.config.cdn_base);
        let pako_sri = &self.config.pako.sri;
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let total_sessions = dataset.original_data.len();
        let total_joins = dataset.suspicious_joins.len();
        let active_hunters = dataset.active_hunter_count();
        let max_score = dataset.max_score();

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="bh-report {version}">
    <meta name="robots" content="noindex, nofollow">
    <script src="{pako_url}" integrity="{pako_sri}" crossorigin="anonymous"></script>
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f9fafb;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --border-color: #e5e7eb;
            --accent-color: #3b82f6;
            --danger-color: #dc2626;
        }}
        .dark {{
            --bg-primary: #111827;
            --bg-secondary: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --border-color: #374151;
            --accent-color: #60a5fa;
            --danger-color: #f87171;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-primary: #111827;
                --bg-secondary: #1f2937;
                --text-primary: #f9fafb;
                --text-secondary: #9ca3af;
                --border-color: #374151;
                --accent-color: #60a5fa;
                --danger-color: #f87171;
            }}
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
            margin: 0 auto;
            max-width: 72rem;
            padding: 1.5rem;
        }}
        h1 {{ margin-bottom: 0.25rem; }}
        .subtitle {{ color: var(--text-secondary); margin-bottom: 1.5rem; }}
        .stats {{ display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }}
        .stat-card {{
            background-color: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            flex: 1 1 10rem;
            padding: 1rem;
            text-align: center;
        }}
        .stat-value {{
            color: var(--accent-color);
            font-size: 2rem;
            font-weight: 700;
        }}
        .stat-label {{ color: var(--text-secondary); font-size: 0.875rem; }}
        .tabs {{ border-bottom: 1px solid var(--border-color); display: flex; gap: 0.25rem; }}
        .tab-btn {{
            background: none;
            border: none;
            border-bottom: 2px solid transparent;
            color: var(--text-primary);
            cursor: pointer;
            font-size: 1rem;
            padding: 0.75rem 1.25rem;
        }}
        .tab-btn:hover {{ background-color: var(--bg-secondary); }}
        .tab-btn.active {{ border-bottom-color: var(--accent-color); color: var(--accent-color); }}
        .tab-content {{ display: none; padding-top: 1rem; }}
        .tab-content.active {{ display: block; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{
            border-bottom: 1px solid var(--border-color);
            padding: 0.5rem 0.75rem;
            text-align: left;
        }}
        th {{ color: var(--text-secondary); font-size: 0.875rem; }}
        .score-high {{ color: var(--danger-color); font-weight: 700; }}
        .empty {{ color: var(--text-secondary); padding: 2rem 0; text-align: center; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="subtitle">Generated {generated_at} · threshold-window join analysis</p>

    <div class="stats">
        <div class="stat-card"><div class="stat-value">{total_sessions}</div><div class="stat-label">Sessions</div></div>
        <div class="stat-card"><div class="stat-value">{total_joins}</div><div class="stat-label">Suspicious joins</div></div>
        <div class="stat-card"><div class="stat-value">{active_hunters}</div><div class="stat-label">Users with joins</div></div>
        <div class="stat-card"><div class="stat-value">{max_score}</div><div class="stat-label">Top score</div></div>
    </div>

    <div class="tabs">
        <button class="tab-btn active" data-tab="joins">Suspicious joins</button>
        <button class="tab-btn" data-tab="hunters">Hunters</button>
        <button class="tab-btn" data-tab="targets">Targets</button>
        <button class="tab-btn" data-tab="sessions">Sessions</button>
    </div>
    <div id="tab-joins" class="tab-content active"></div>
    <div id="tab-hunters" class="tab-content"></div>
    <div id="tab-targets" class="tab-content"></div>
    <div id="tab-sessions" class="tab-content"></div>

    <script>
        const PAYLOAD = "{payload_b64}";

        function inflatePayload() {{
            const decoded = atob(PAYLOAD);
            const bytes = new Uint8Array(decoded.length);
            for (let i = 0; i < decoded.length; i++) {{
                bytes[i] = decoded.charCodeAt(i);
            }}
            return JSON.parse(pako.inflate(bytes, {{ to: "string" }}));
        }}

        function cell(value) {{
            const td = document.createElement("td");
            td.textContent = value === null || value === undefined ? "" : String(value);
            return td;
        }}

        function renderTable(containerId, columns, rows, rowCells) {{
            const container = document.getElementById(containerId);
            if (rows.length === 0) {{
                const p = document.createElement("p");
                p.className = "empty";
                p.textContent = "Nothing to show.";
                container.appendChild(p);
                return;
            }}
            const table = document.createElement("table");
            const head = table.createTHead().insertRow();
            for (const column of columns) {{
                const th = document.createElement("th");
                th.textContent = column;
                head.appendChild(th);
            }}
            const body = table.createTBody();
            for (const row of rows) {{
                const tr = body.insertRow();
                for (const td of rowCells(row)) {{
                    tr.appendChild(td);
                }}
            }}
            container.appendChild(table);
        }}

        function scoreCell(score) {{
            const td = cell(score);
            if (score >= 50) {{
                td.className = "score-high";
            }}
            return td;
        }}

        function loadData(data) {{
            renderTable("tab-joins",
                ["Table", "Joiner", "Joined after", "Gap (s)", "Join time", "Stakes"],
                data.suspiciousJoins,
                j => [cell(j.tableName), cell(j.joiner), cell(j.preceding_player),
                      cell(j.time_gap_sec.toFixed(1)), cell(j.join_time),
                      cell(j.smallBlind + "/" + j.bigBlind + " " + j.gameType)]);

            renderTable("tab-hunters",
                ["User", "Score", "Joins", "Join %", "Top target", "Consistency %", "Sessions"],
                data.bumphunterProfiles,
                h => [cell(h.username), scoreCell(h.score), cell(h.join_after_count),
                      cell(h.join_after_percentage), cell(h.most_common_target),
                      cell(h.target_consistency), cell(h.total_sessions)]);

            renderTable("tab-targets",
                ["User", "Joined after", "Joined %", "Top hunter", "Consistency %", "Sessions"],
                data.targetProfiles,
                t => [cell(t.username), cell(t.joined_after_count),
                      cell(t.joined_after_percentage), cell(t.most_common_hunter),
                      cell(t.hunter_consistency), cell(t.total_sessions)]);

            renderTable("tab-sessions",
                ["Table", "User", "Start", "End", "Game", "Stakes"],
                data.originalData,
                s => [cell(s.tableName || ("Table " + s.tableId)), cell(s.username),
                      cell(s.startSession), cell(s.endSession),
                      cell(s.gameType + " " + s.limitType),
                      cell(s.smallBlind + "/" + s.bigBlind)]);
        }}

        document.querySelectorAll(".tab-btn").forEach(btn => {{
            btn.addEventListener("click", () => {{
                document.querySelectorAll(".tab-btn").forEach(b => b.classList.remove("active"));
                document.querySelectorAll(".tab-content").forEach(c => c.classList.remove("active"));
                btn.classList.add("active");
                document.getElementById("tab-" + btn.dataset.tab).classList.add("active");
            }});
        }});

        window.addEventListener("DOMContentLoaded", () => {{
            try {{
                loadData(inflatePayload());
            }} catch (error) {{
                console.error("Error decompressing data:", error);
            }}
        }});
    </script>
</body>
</html>
"##,
            theme_class = theme_class,
            title = title,
            version = env!("CARGO_PKG_VERSION"),
            pako_url = pako_url,
            pako_sri = pako_sri,
            generated_at = generated_at,
            total_sessions = total_sessions,
            total_joins = total_joins,
            active_hunters = active_hunters,
            max_score = max_score,
            payload_b64 = payload_b64,
        )
    }
}

/// Minimal HTML escaping for text interpolated into the document.
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
