use color_eyre::Result;
use eyre::WrapErr;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use crate::config::MailSettings;
use super::validators::JoinUsForm;

// Subject and body are fixed, only the form fields get
// interpolated. The destination mailbox is the site
// owner's, nothing is stored on our side.
const JOIN_US_SUBJECT: &str = "Nová žádost o připojení školy do UŠI";

pub struct JoinUsMailer {
  transport: SmtpTransport,
  from: Mailbox,
  to: Mailbox
}

impl JoinUsMailer {

  // Building the transport doesn't talk to the relay yet,
  // a bad host only shows up on the first submission.
  pub fn open(settings: &MailSettings) -> Result<Self> {
    let transport = SmtpTransport::starttls_relay(&settings.host)
      .context("Configuring the mail relay")?
      .credentials(Credentials::new(
        settings.username.clone(),
        settings.password.clone()
      ))
      .build();
    Ok(Self {
      transport,
      from: settings.from.parse()
        .context("Parsing the mail_from address")?,
      to: settings.to.parse()
        .context("Parsing the mail_to address")?
    })
  }

  // One synchronous submission, no retry and no queue. A
  // transport failure drops the notification, the caller
  // only gets to report a generic error.
  pub fn send(&self, form: &JoinUsForm) -> Result<()> {
    let message = Message::builder()
      .from(self.from.clone())
      .to(self.to.clone())
      .subject(JOIN_US_SUBJECT)
      .body(Self::body(form))
      .context("Building the join us mail")?;
    self.transport.send(&message)
      .context("Submitting the join us mail")?;
    Ok(())
  }

  fn body(form: &JoinUsForm) -> String {
    format!(
      "Název školy: {}\n\
      Kontakt na tři aktivní studenty:\n\
      1. {}\n\
      2. {}\n\
      3. {}\n\
      Popis školy:\n        {}\n\
      Důvod:\n        {}\n\
      E-mail na školu: {}",
      form.school_name,
      form.students_contact[0],
      form.students_contact[1],
      form.students_contact[2],
      form.school_description,
      form.reason,
      form.mail
    )
  }

}
