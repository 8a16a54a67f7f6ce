use alloc::string::String;

/// Converts an underscore separated key to lower camel case.
///
/// The first character is lowered and every character following an
/// underscore is raised, dropping that underscore. Leading underscores and
/// an underscore not followed by an alphanumeric character are kept.
/// Keys already in camel case pass through unchanged.
///
/// # Examples
///
/// ```
/// use am_utils::text::lower_camel;
///
/// assert_eq!(lower_camel("first_name"), "firstName");
/// assert_eq!(lower_camel("password_confirmation"), "passwordConfirmation");
/// assert_eq!(lower_camel("firstName"), "firstName");
/// assert_eq!(lower_camel("Id"), "id");
/// ```
pub fn lower_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    // Leading underscores are not separators.
    while let Some('_') = chars.peek() {
        out.push('_');
        chars.next();
    }

    let mut first = true;
    let mut raise = false;
    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.peek() {
                Some(next) if next.is_alphanumeric() => raise = true,
                _ => out.push('_'),
            }
            continue;
        }

        if first {
            out.extend(c.to_lowercase());
        } else if raise {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        first = false;
        raise = false;
    }
    out
}

/// Upper-cases the first character and lower-cases the rest.
///
/// ```
/// use am_utils::text::capitalize;
///
/// assert_eq!(capitalize("admin"), "Admin");
/// assert_eq!(capitalize("ADMIN"), "Admin");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character only.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_camel_edge_cases() {
        assert_eq!(lower_camel(""), "");
        assert_eq!(lower_camel("id"), "id");
        assert_eq!(lower_camel("_id"), "_id");
        assert_eq!(lower_camel("__private_key"), "__privateKey");
        assert_eq!(lower_camel("trailing_"), "trailing_");
        assert_eq!(lower_camel("a_b_c"), "aBC");
        assert_eq!(lower_camel("email_2"), "email2");
        assert_eq!(lower_camel("FirstName"), "firstName");
    }

    #[test]
    fn lower_camel_is_idempotent() {
        for key in ["first_name", "emails", "password_history", "x_y_z"] {
            let once = lower_camel(key);
            assert_eq!(lower_camel(&once), once);
        }
    }

    #[test]
    fn lower_first_only_touches_first_letter() {
        assert_eq!(lower_first("CamelKey"), "camelKey");
        assert_eq!(lower_first(""), "");
    }
}
