//! One-time code email templates
//!
//! Placeholders use the `{{name}}` form and are substituted verbatim after
//! HTML escaping.

use rr_core::domain::entities::{OtpEmail, OtpPurpose};

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2933;">
    <h2>{{headline}}</h2>
    <p>Hi {{username}},</p>
    <p>{{intro}}</p>
    <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{{code}}</p>
    <p>This code expires in {{expires_in_minutes}} minutes.</p>
    <p>If you did not request this, you can safely ignore this email.</p>
    <p>The {{app_name}} team</p>
  </body>
</html>
"#;

const TEXT_TEMPLATE: &str = "Hi {{username}},

{{intro}}

{{code}}

This code expires in {{expires_in_minutes}} minutes.
If you did not request this, you can safely ignore this email.

The {{app_name}} team
";

/// Rendered subject and bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Render the HTML and text bodies for a code email
pub fn render_otp_email(email: &OtpEmail, app_name: &str) -> RenderedEmail {
    let (headline, intro) = match email.purpose {
        OtpPurpose::PasswordReset => (
            "Reset your password",
            "Use the code below to reset your password.",
        ),
        OtpPurpose::EmailVerification => (
            "Verify your email address",
            "Use the code below to verify your email address.",
        ),
    };

    let expires = email.template_data.expires_in_minutes.to_string();
    let values = [
        ("headline", headline),
        ("intro", intro),
        ("username", email.template_data.username.as_str()),
        ("code", email.template_data.code.as_str()),
        ("expires_in_minutes", expires.as_str()),
        ("app_name", app_name),
    ];

    RenderedEmail {
        subject: email.subject.clone(),
        html: fill(HTML_TEMPLATE, &values, escape_html),
        text: fill(TEXT_TEMPLATE, &values, |value| value.to_string()),
    }
}

fn fill(template: &str, values: &[(&str, &str)], encode: impl Fn(&str) -> String) -> String {
    let mut body = template.to_string();
    for (key, value) in values {
        let placeholder = format!("{{{{{}}}}}", key);
        body = body.replace(&placeholder, &encode(value));
    }
    body
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
