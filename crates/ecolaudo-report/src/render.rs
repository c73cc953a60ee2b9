//! Markdown template rendering.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ReportError;

/// The shared section skeleton every assembled report flows through.
///
/// Sections arrive pre-rendered; empty observation/notes sections collapse.
pub const REPORT_SKELETON: &str = "\
# {{ title }}

## TÉCNICA
{{ technique }}

## {{ findings_title }}

{{ findings }}

## {{ impression_title }}

{{ impression }}
{%- if observations != \"\" %}

## OBSERVAÇÕES
{{ observations }}
{%- endif %}
{%- if notes != \"\" %}

**Observações:** {{ notes }}
{%- endif %}
";

/// Context of [`REPORT_SKELETON`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportSections {
    pub title: String,
    pub technique: String,
    pub findings_title: String,
    pub findings: String,
    pub impression_title: String,
    pub impression: String,
    pub observations: String,
    pub notes: String,
}

/// Render a Tera template with any serializable context.
///
/// The `template_content` is the raw template string. Autoescape is not
/// applied — the output is markdown, not HTML.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    context: &impl Serialize,
) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ReportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ReportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the report skeleton for a fully assembled section set.
pub fn render_report(sections: &ReportSections) -> Result<String, ReportError> {
    render_template("report.md", REPORT_SKELETON, sections)
}
