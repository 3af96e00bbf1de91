/// Largest accepted selfie, measured on the encoded data URL.
pub const MAX_SELFIE_LEN: usize = 2_500_000;

/// Validate a trimmed text field with inclusive character bounds.
pub fn validate_length(value: &str, field_name: &str, min: usize, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    let len = trimmed.chars().count();
    if len < min {
        return Some(format!("{field_name} must be at least {min} characters"));
    }
    if len > max {
        return Some(format!("{field_name} must be at most {max} characters"));
    }
    None
}

/// Respondent name: 2-80 chars.
pub fn validate_name(name: &str) -> Option<String> {
    validate_length(name, "Name", 2, 80)
}

/// Who asked: 2-120 chars.
pub fn validate_asked_by(asked_by: &str) -> Option<String> {
    validate_length(asked_by, "Asked by", 2, 120)
}

/// Validate an email: one '@', non-empty local part, dotted domain, max 160 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 160 {
        return Some("Email must be at most 160 characters".to_string());
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !trimmed.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        }
        None => false,
    };
    if !valid {
        return Some("Email must be a valid address".to_string());
    }
    None
}

/// Optional selfie: an image data URL within the size cap.
pub fn validate_selfie(selfie: Option<&str>) -> Option<String> {
    let selfie = selfie?;
    if selfie.len() > MAX_SELFIE_LEN {
        return Some("Selfie image is too large".to_string());
    }
    if !selfie.starts_with("data:image/") {
        return Some("Selfie must be an image data URL".to_string());
    }
    None
}
