//! Formulario de contacto: validación y envío simulado.

use crate::config::config::FORM_SEND_DELAY;
use crate::i18n::en::{MSG_FILL_ALL_FIELDS, MSG_INVALID_EMAIL};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("{}", MSG_FILL_ALL_FIELDS)]
    MissingFields,
    #[error("{}", MSG_INVALID_EMAIL)]
    InvalidEmail,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub inquiry: String,
    pub message: String,
    sending_until: Option<Instant>,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [&self.name, &self.email, &self.inquiry, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(FormError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Valida y, si todo está bien, pasa a "enviando" durante unos segundos.
    pub fn submit(&mut self, now: Instant) -> Result<(), FormError> {
        if self.is_sending() {
            return Ok(());
        }
        self.validate()?;
        self.sending_until = Some(now + FORM_SEND_DELAY);
        tracing::info!(inquiry = %self.inquiry, "contact form submitted");
        Ok(())
    }

    /// Devuelve `true` cuando el envío termina; el formulario queda vacío.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.sending_until {
            Some(until) if now >= until => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending_until.is_some()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}
