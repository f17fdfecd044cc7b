//! Predeclared identifiers of Go's universe scope.
//!
//! ## Notes
//! - Only [`ANY`] is reserved against import aliases: shadowing it would break the `any`-typed recorder
//!   signatures the generator emits.
//! - Parameters spelled like one of [`BODY_BUILTINS`] are renamed, since forwarding bodies call `append` and build
//!   `[]any` literals.

/// The universe name of the dynamic type.
pub const ANY: &str = "any";

/// Predeclared type names.
pub const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// The universe function that grows the forwarded argument list.
pub const APPEND: &str = "append";

/// Universe names referenced inside generated method bodies. A parameter spelled like one would shadow it.
pub const BODY_BUILTINS: &[&str] = &[ANY, APPEND];

/// Check whether a parameter named `name` would shadow a universe name the generated bodies rely on.
pub fn is_body_builtin(name: &str) -> bool {
    BODY_BUILTINS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_and_append_are_body_builtins() {
        assert!(is_body_builtin(ANY));
        assert!(is_body_builtin(APPEND));
    }

    #[test]
    fn test_other_names_are_not_body_builtins() {
        assert!(!is_body_builtin("error"));
        assert!(!is_body_builtin("varargs"));
    }
}
