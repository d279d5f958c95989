/// Validate email format
///
/// Accepts a plain `local@domain` address: no display names, no quoting,
/// no whitespace. The domain is one or more dot-separated labels.
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let (local, domain) = email
        .rsplit_once('@')
        .ok_or_else(|| "Invalid email format".to_string())?;

    if local.is_empty() || domain.is_empty() {
        return Err("Invalid email format".to_string());
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err("Invalid email format".to_string());
    }

    if !local.chars().all(is_local_char) {
        return Err("Invalid email format".to_string());
    }

    if !domain.split('.').all(is_domain_label) {
        return Err("Invalid email domain".to_string());
    }

    Ok(())
}

/// Fields that must be present and not blank
pub fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c)
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
