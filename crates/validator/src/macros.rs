//! Macros for building rule lists.

/// Builds a `Vec<Rule>` from `field: "expression" => "message"` entries.
///
/// Fields are written as identifiers and stringified, so they read like the
/// struct they refer to. Raw identifiers lose their `r#` prefix.
///
/// ```rust
/// use fieldrules::rules;
///
/// let rules = rules! {
///     user_name: "required,alpha" => "Name must contain only letters",
///     email: "required,email" => "Email must be a valid email address",
/// };
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[0].field(), "user_name");
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        ::std::vec::Vec::<$crate::Rule>::new()
    };
    ($($field:ident : $expression:expr => $message:expr),+ $(,)?) => {
        ::std::vec![
            $($crate::Rule::new(
                ::std::stringify!($field).trim_start_matches("r#"),
                $expression,
                $message,
            )),+
        ]
    };
}
