//! Identifier case conversion.

/// Converts a camelCase or PascalCase name to snake_case.
///
/// Names that are already snake_case pass through unchanged.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Converts a name to SCREAMING_SNAKE_CASE, for generated constants.
#[must_use]
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Converts a snake_case name to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Derives a constant-style identifier from free comment text.
///
/// Runs of characters that cannot appear in an identifier collapse to a
/// single underscore; a leading digit gets an underscore prefix.
#[must_use]
pub fn comment_ident(comment: &str) -> String {
    let mut result = String::with_capacity(comment.len());
    for c in comment.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_uppercase());
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }
    while result.ends_with('_') {
        result.pop();
    }
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("userName"), "user_name");
        assert_eq!(to_snake_case("createdAt"), "created_at");
        assert_eq!(to_snake_case("UserProfile"), "user_profile");
        assert_eq!(to_snake_case("user_name"), "user_name");
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case("postId"), "post_id");
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("userName"), "USER_NAME");
        assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user_name"), "UserName");
        assert_eq!(to_pascal_case("id"), "Id");
    }

    #[test]
    fn test_comment_ident() {
        assert_eq!(comment_ident("user login name"), "USER_LOGIN_NAME");
        assert_eq!(comment_ident("  row creation time. "), "ROW_CREATION_TIME");
        assert_eq!(comment_ident("2fa secret"), "_2FA_SECRET");
        assert_eq!(comment_ident("---"), "_");
        assert_eq!(comment_ident("회원 이름"), "회원_이름");
    }
}
