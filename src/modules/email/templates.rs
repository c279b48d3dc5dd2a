//! Email body templates rendered with Jinja2 syntax.
//!
//! Templates are embedded at compile time, so rendering never depends on the
//! process working directory.

use minijinja::{Environment, Value};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Values interpolated into the notification and confirmation bodies.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEmailContext {
    pub report_code: String,
    pub report_name: String,
    pub user_name: String,
    pub user_title: String,
    pub user_email: String,
    pub squadron_number: String,
    pub district_number: String,
    pub file_name: String,
    pub submitted_at: String,
    pub service_year: String,
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let templates: [(&str, &str); 4] = [
        (
            "notification.txt.jinja",
            include_str!("templates/notification.txt.jinja"),
        ),
        (
            "notification.html.jinja",
            include_str!("templates/notification.html.jinja"),
        ),
        (
            "confirmation.txt.jinja",
            include_str!("templates/confirmation.txt.jinja"),
        ),
        (
            "confirmation.html.jinja",
            include_str!("templates/confirmation.html.jinja"),
        ),
    ];

    for (name, content) in templates {
        env.add_template(name, content)
            .expect("embedded template must parse");
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

fn render(template_name: &str, ctx: &SubmissionEmailContext) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(Value::from_serialize(ctx))
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

pub fn notification_subject(report_code: &str) -> String {
    format!("New {} Report Submission", report_code)
}

pub fn confirmation_subject(report_code: &str) -> String {
    format!("Confirmation: {} Report Submitted", report_code)
}

/// Render the notification bodies as (text, html).
pub fn render_notification(
    ctx: &SubmissionEmailContext,
) -> Result<(String, String), TemplateError> {
    Ok((
        render("notification.txt.jinja", ctx)?,
        render("notification.html.jinja", ctx)?,
    ))
}

/// Render the confirmation bodies as (text, html).
pub fn render_confirmation(
    ctx: &SubmissionEmailContext,
) -> Result<(String, String), TemplateError> {
    Ok((
        render("confirmation.txt.jinja", ctx)?,
        render("confirmation.html.jinja", ctx)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> SubmissionEmailContext {
        SubmissionEmailContext {
            report_code: "VA&R".to_string(),
            report_name: "Veterans Affairs & Rehabilitation".to_string(),
            user_name: "Pat Example".to_string(),
            user_title: "Adjutant".to_string(),
            user_email: "pat@example.org".to_string(),
            squadron_number: "42".to_string(),
            district_number: "5".to_string(),
            file_name: "SAL-SQ42-VAR-08072026.pdf".to_string(),
            submitted_at: "2026-08-07 14:30 UTC".to_string(),
            service_year: "2026-2027".to_string(),
        }
    }

    #[test]
    fn test_render_notification_includes_all_fields() {
        let (text, html) = render_notification(&sample_context()).unwrap();

        for body in [&text, &html] {
            assert!(body.contains("Pat Example"));
            assert!(body.contains("Adjutant"));
            assert!(body.contains("42"));
            assert!(body.contains("5"));
            assert!(body.contains("pat@example.org"));
            assert!(body.contains("SAL-SQ42-VAR-08072026.pdf"));
        }
        assert!(html.contains("<h2>"));
    }

    #[test]
    fn test_render_confirmation_mentions_service_year() {
        let (text, html) = render_confirmation(&sample_context()).unwrap();

        assert!(text.contains("2026-2027"));
        assert!(html.contains("2026-2027"));
        assert!(text.contains("Veterans Affairs & Rehabilitation"));
    }
}
