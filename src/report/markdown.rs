//! Markdown report generator

use anyhow::Result;

use super::AuditReport;

/// Generate a Markdown report
pub fn generate(report: &AuditReport<'_>) -> Result<String> {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.metadata.title));
    md.push_str(&format!("- **Target:** `{}`\n", report.metadata.target));
    md.push_str(&format!(
        "- **Generated:** {}\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Tool Version:** {}\n\n",
        report.metadata.tool_version
    ));

    for result in &report.session.results {
        md.push_str(&format!("## {}  **[{}]**\n\n", result.name, result.verdict.as_str()));
        md.push_str(&format!("- URL: `{}`\n", result.url));
        md.push_str(&format!(
            "- HTTP: `{}`  |  Content-Type: `{}`\n",
            result.status, result.content_type
        ));
        md.push_str(&format!("- Detail: {}\n", result.detail));
        if let Some(meta) = &result.json_meta {
            md.push_str(&format!(
                "- JSON meta: `{}`\n",
                serde_json::to_string(meta)?
            ));
        }
        if !result.body_preview.is_empty() {
            md.push_str("\n<details><summary>Body Preview</summary>\n\n");
            md.push_str(&format!("```\n{}\n```\n", result.body_preview));
            md.push_str("</details>\n");
        }
        md.push('\n');
    }

    for failure in &report.session.failures {
        md.push_str(&format!("## {}  **[FAILED]**\n\n", failure.name));
        md.push_str(&format!("- URL: `{}`\n", failure.url));
        md.push_str(&format!("- Error: {}\n\n", failure.error));
    }

    for sweep in &report.session.oracle_sweeps {
        md.push_str(&format!("## {}\n\n", sweep.name));
        md.push_str("| Shortcode | Status | Verdict | Error |\n");
        md.push_str("|-----------|--------|---------|-------|\n");
        for item in &sweep.results {
            md.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                item.shortcode,
                item.status.map_or("-".to_string(), |s| s.to_string()),
                item.verdict.map_or("-", |v| v.as_str()),
                item.error.as_deref().unwrap_or("-"),
            ));
        }
        md.push('\n');
    }

    md.push_str(
        "\n---\nThis report was produced with **anonymous (unauthenticated)** requests only. \
         Use only against your own content or authorized targets.\n",
    );

    Ok(md)
}
