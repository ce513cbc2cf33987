// ============================================================================
// LOGIN VIEWMODEL - Validación local de credenciales
// ============================================================================

/// Credenciales listas para enviar al API
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub database: String,
}

/// Validar los campos del form de login. Si falla, NO se emite ningún request;
/// el mensaje se muestra inline en #login-error.
pub fn validate_credentials(username: &str, database: &str) -> Result<Credentials, String> {
    let username = username.trim();
    let database = database.trim();

    if username.is_empty() || database.is_empty() {
        return Err("Please enter username and select database.".to_string());
    }

    Ok(Credentials {
        username: username.to_string(),
        database: database.to_uppercase(),
    })
}

/// Parsear un barcode: debe ser un número finito
pub fn parse_barcode(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected_locally() {
        assert!(validate_credentials("", "KOL").is_err());
        assert!(validate_credentials("operator1", "").is_err());
        assert!(validate_credentials("   ", "  ").is_err());
    }

    #[test]
    fn database_is_uppercased() {
        let creds = validate_credentials(" operator1 ", "kol").unwrap();
        assert_eq!(creds.username, "operator1");
        assert_eq!(creds.database, "KOL");
    }

    #[test]
    fn barcode_must_be_a_finite_number() {
        assert_eq!(parse_barcode(" 123456 "), Some(123456));
        assert_eq!(parse_barcode(""), None);
        assert_eq!(parse_barcode("12ab"), None);
    }
}
