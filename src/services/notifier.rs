//! Reference lead backend
//!
//! Used when no external webhook is configured: appends the lead to a
//! CSV log, notifies the operator by email when the visitor left an
//! email, and composes an SMS when they left a phone number. Email and
//! SMS dispatch go through seams; the default implementations only log,
//! leaving real providers as an integration point.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;
use crate::models::Lead;

pub trait EmailSender: Send + Sync {
    fn send(&self, to: &str, subject: &str, html_body: &str);
}

pub trait SmsProvider: Send + Sync {
    fn send(&self, to: &str, body: &str);
}

/// Log-only email dispatch
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, to: &str, subject: &str, _html_body: &str) {
        info!("Email to {}: {}", to, subject);
    }
}

/// Log-only SMS dispatch
pub struct LogSmsProvider;

impl SmsProvider for LogSmsProvider {
    fn send(&self, to: &str, body: &str) {
        info!("SMS to {}: {}", to, body);
    }
}

pub struct LeadNotifier {
    log_path: PathBuf,
    operator_email: String,
    operator_phone: String,
    email: Box<dyn EmailSender>,
    sms: Box<dyn SmsProvider>,
}

impl LeadNotifier {
    pub fn new(log_path: PathBuf, operator_email: String, operator_phone: String) -> Self {
        Self {
            log_path,
            operator_email,
            operator_phone,
            email: Box::new(LogEmailSender),
            sms: Box::new(LogSmsProvider),
        }
    }

    #[cfg(test)]
    fn with_dispatch(
        log_path: PathBuf,
        operator_email: String,
        operator_phone: String,
        email: Box<dyn EmailSender>,
        sms: Box<dyn SmsProvider>,
    ) -> Self {
        Self { log_path, operator_email, operator_phone, email, sms }
    }

    /// Log the lead and fire the configured notifications. The row is
    /// written first; a notification problem must not lose the lead.
    pub fn handle(&self, lead: &Lead) -> Result<()> {
        self.append_row(lead)?;

        let estimate_str = format!("${:.2} CAD", lead.estimate_total);

        // The notification goes to the operator; the visitor's address
        // travels inside the body.
        if lead.email.is_some() {
            let subject = format!("Nouveau Lead Estimation Or - {}", estimate_str);
            let body = render_email_body(lead, &estimate_str);
            self.email.send(&self.operator_email, &subject, &body);
        }

        if let Some(phone) = &lead.phone {
            let name = lead.name.as_deref().unwrap_or("Un client");
            let message = format!(
                "Nouvelle estimation: {}. Tél: {}. Total: {}. Date: {}. Voir le journal pour détails.",
                name, phone, estimate_str, lead.created_at
            );
            self.sms.send(&self.operator_phone, &message);
        }

        info!(
            estimate_total = lead.estimate_total,
            total_weight = lead.total_weight,
            lines = lead.breakdown.len(),
            "Lead recorded"
        );
        Ok(())
    }

    fn append_row(&self, lead: &Lead) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        let estimate_total = format!("{:.2}", lead.estimate_total);
        let total_weight = format!("{:.2}", lead.total_weight);
        let breakdown_json = serde_json::to_string(&lead.breakdown)?;

        writer.write_record([
            lead.created_at.as_str(),
            lead.name.as_deref().unwrap_or("N/A"),
            lead.phone.as_deref().unwrap_or("N/A"),
            lead.email.as_deref().unwrap_or("N/A"),
            estimate_total.as_str(),
            total_weight.as_str(),
            breakdown_json.as_str(),
            lead.language.as_str(),
            lead.page_url.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

fn render_email_body(lead: &Lead, estimate_str: &str) -> String {
    format!(
        concat!(
            "<div style=\"font-family: sans-serif; padding: 20px; border: 1px solid #D4AF37; border-radius: 10px;\">",
            "<h2 style=\"color: #D4AF37;\">Nouveau Lead Estimation Or</h2>",
            "<p><strong>Nom:</strong> {name}</p>",
            "<p><strong>Email:</strong> {email}</p>",
            "<p><strong>Téléphone:</strong> {phone}</p>",
            "<hr/>",
            "<p style=\"font-size: 1.2em;\"><strong>Estimation Totale:</strong> {estimate}</p>",
            "<p><strong>Poids Cumulé:</strong> {weight}g</p>",
            "<hr/>",
            "<p style=\"font-size: 0.8em; color: #666;\">Soumis le {created} depuis {url}</p>",
            "</div>",
        ),
        name = lead.name.as_deref().unwrap_or("Non fourni"),
        email = lead.email.as_deref().unwrap_or("Non fourni"),
        phone = lead.phone.as_deref().unwrap_or("Non fourni"),
        estimate = estimate_str,
        weight = lead.total_weight,
        created = lead.created_at,
        url = lead.page_url,
    )
}
