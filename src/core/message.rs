use crate::utils::error::{Result, SorteoError};
use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const DEFAULT_TEMPLATE: &str =
    "Hola {giver}, tu Amigo secreto es {recipient}. ¡Que sea secreto! 🤫";

pub const DEFAULT_COUNTRY_CODE: &str = "57";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(giver|recipient)\}").expect("static regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    template: String,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains("{recipient}") {
            return Err(SorteoError::InvalidConfigValueError {
                field: "template".to_string(),
                value: template,
                reason: "Template must contain the {recipient} placeholder".to_string(),
            });
        }
        Ok(Self { template })
    }

    /// Placeholders are filled in one pass, so braces inside the names are
    /// copied through as written.
    pub fn render(&self, giver: &str, recipient: &str) -> String {
        placeholder_pattern()
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "giver" => giver,
                _ => recipient,
            })
            .into_owned()
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Turns a sheet phone cell into the international digits-only form the
/// gateway expects. Numbers written with a leading `+` already carry their
/// country code; everything else gets `country_code` prepended.
pub fn format_phone(country_code: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(SorteoError::ValidationError {
            message: format!("phone number '{}' has no digits", raw),
        });
    }

    if trimmed.starts_with('+') {
        Ok(digits)
    } else {
        Ok(format!("{}{}", country_code, digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let text = MessageTemplate::default().render("Laura", "Andrés");
        assert_eq!(
            text,
            "Hola Laura, tu Amigo secreto es Andrés. ¡Que sea secreto! 🤫"
        );
    }

    #[test]
    fn test_custom_template_without_giver() {
        let template = MessageTemplate::new("Te tocó: {recipient}").unwrap();
        assert_eq!(template.render("Laura", "Andrés"), "Te tocó: Andrés");
    }

    #[test]
    fn test_placeholders_inside_names_are_not_expanded() {
        let template = MessageTemplate::default();
        assert_eq!(
            template.render("{recipient}", "{giver}"),
            "Hola {recipient}, tu Amigo secreto es {giver}. ¡Que sea secreto! 🤫"
        );
    }

    #[test]
    fn test_template_requires_recipient() {
        assert!(MessageTemplate::new("Hola {giver}").is_err());
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("57", "3005997373").unwrap(), "573005997373");
        assert_eq!(format_phone("57", " 300 599-7373 ").unwrap(), "573005997373");
        assert_eq!(format_phone("57", "+1 (415) 555-0100").unwrap(), "14155550100");
        assert!(format_phone("57", "n/a").is_err());
    }
}
