/// Names that cannot be used as a type alias or interface name.
///
/// Besides keywords this covers type operators such as `keyof`, which would be read
/// as an operator in a type position.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "any", "asserts", "bigint", "boolean", "break", "case", "catch", "class", "const",
    "continue", "debugger", "default", "delete", "do", "else", "enum", "export", "extends",
    "false", "finally", "for", "function", "if", "import", "in", "infer", "instanceof",
    "keyof", "never", "new", "null", "number", "object", "readonly", "return", "string",
    "super", "switch", "symbol", "this", "throw", "true", "try", "typeof", "undefined",
    "unique", "unknown", "var", "void", "while", "with",
];

/// Check whether `s` is a plain identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
///
/// # Examples
/// ```
/// use core_types::utils::is_identifier;
/// assert!(is_identifier("User"));
/// assert!(is_identifier("$ref_2"));
/// assert!(!is_identifier("2fa"));
/// assert!(!is_identifier("my-type"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check whether `s` is reserved and cannot name a declared type.
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_TYPE_NAMES.contains(&s)
}

/// Convert an arbitrary name into a usable type identifier.
///
/// Invalid characters become `_`, a leading digit gets a `_` prefix and reserved
/// words get a `_` suffix. Valid, unreserved names are returned unchanged.
///
/// # Examples
/// ```
/// use core_types::utils::to_identifier;
/// assert_eq!(to_identifier("User"), "User");
/// assert_eq!(to_identifier("my-type"), "my_type");
/// assert_eq!(to_identifier("2fa"), "_2fa");
/// assert_eq!(to_identifier("string"), "string_");
/// ```
pub fn to_identifier(s: &str) -> String {
    if s.is_empty() {
        return "_".to_string();
    }

    let mut result = String::with_capacity(s.len() + 1);
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        result.push('_');
    }
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            result.push(c);
        } else {
            result.push('_');
        }
    }

    if is_reserved_word(&result) {
        result.push('_');
    }
    result
}
