//! Email notification dispatch: plain + HTML multipart, comma-separated
//! recipients, event selection by build status.

use bass_core::job::{EmailNotification, Notifications};
use bass_core::status::ExecStatus;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::AsyncSmtpTransport;
use lettre::{AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

const SENDER: &str = "bass@localhost";

/// Resolve `PIPELINE_NAME`/`TRACEID` template variables in a notification
/// body/subject.
fn resolve_template(input: &str, pipeline_name: &str, trace_id: &str) -> String {
    input.replace("PIPELINE_NAME", pipeline_name).replace("TRACEID", trace_id)
}

/// Pick the notification event for a finished build's status: `onSuccess`
/// when `status == OK`, `onFailure` otherwise.
fn select_event(notifications: &Notifications, status: ExecStatus) -> Option<&EmailNotification> {
    if status == ExecStatus::Ok {
        notifications.on_success.as_ref().map(|e| &e.email)
    } else {
        notifications.on_failure.as_ref().map(|e| &e.email)
    }
}

/// Send the notification configured for `status`, if any. Failures are
/// logged, not propagated: a notification problem must not fail the build.
pub async fn dispatch(notifications: &Notifications, status: ExecStatus, pipeline_name: &str, trace_id: &str) {
    let Some(email) = select_event(notifications, status) else {
        return;
    };

    let subject = resolve_template(&email.subject, pipeline_name, trace_id);
    let body = resolve_template(&email.body, pipeline_name, trace_id);

    if let Err(e) = send_email(&email.to, &subject, &body).await {
        warn!(error = %e, to = %email.to, "failed to send notification email");
    } else {
        info!(to = %email.to, "sent notification email");
    }
}

async fn send_email(recipients: &str, subject: &str, body: &str) -> anyhow::Result<()> {
    let mut builder = Message::builder().from(SENDER.parse::<Mailbox>()?).subject(subject);

    for recipient in recipients.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    let message = builder.multipart(
        MultiPart::alternative()
            .singlepart(SinglePart::plain(body.to_string()))
            .singlepart(SinglePart::html(body.to_string())),
    )?;

    let mailer: AsyncSmtpTransport<Tokio1Executor> = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("localhost").build();
    mailer.send(message).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_variables_are_substituted() {
        let out = resolve_template("build PIPELINE_NAME (TRACEID)", "demo", "abc123");
        assert_eq!(out, "build demo (abc123)");
    }

    #[test]
    fn select_event_picks_on_success_when_ok() {
        let notifications = Notifications {
            on_success: Some(bass_core::job::NotificationEvent {
                email: EmailNotification {
                    to: "a@example.com".into(),
                    subject: "s".into(),
                    body: "b".into(),
                },
            }),
            on_failure: None,
        };
        assert!(select_event(&notifications, ExecStatus::Ok).is_some());
        assert!(select_event(&notifications, ExecStatus::Error).is_none());
    }

    #[test]
    fn select_event_picks_on_failure_for_any_non_ok_status() {
        let notifications = Notifications {
            on_success: None,
            on_failure: Some(bass_core::job::NotificationEvent {
                email: EmailNotification {
                    to: "a@example.com".into(),
                    subject: "s".into(),
                    body: "b".into(),
                },
            }),
        };
        assert!(select_event(&notifications, ExecStatus::Timeout).is_some());
        assert!(select_event(&notifications, ExecStatus::Ok).is_none());
    }
}
