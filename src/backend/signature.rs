//! Parameter, result and type-parameter rendering.
//!
//! Names are settled here, before any method body is emitted: anonymous, blank, alias-shadowing or
//! builtin-shadowing (`any`, `append`) parameters are renamed `argN`, and the survivors are made unique against the file's import aliases and the interface's type
//! parameters.

use mockforge_core::lang::universe;
use mockforge_model::{Interface, Method, Parameter, RenderContext, RenderError};

use super::idents::IdentifierAllocator;
use super::imports::AliasTable;

/// Declaration-site and use-site spellings of an interface's type parameters.
///
/// For `[I any, O any]` this is `long = "[I any, O any]"` and `short = "[I, O]"`; both are empty when the interface is
/// not generic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParamForms {
    pub long: String,
    pub short: String,
}

/// A method signature with every name and type already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSignature {
    /// Input names; the variadic parameter, if any, is last.
    pub arg_names: Vec<String>,
    /// Input types; the variadic parameter renders as `...Elem`.
    pub arg_types: Vec<String>,
    pub ret_names: Vec<String>,
    pub ret_types: Vec<String>,
    pub is_variadic: bool,
}

impl RenderedSignature {
    /// `a, b string, c ...int`
    pub fn params(&self) -> String {
        join_params(&self.arg_names, &self.arg_types)
    }

    /// Named results for the typed `Return` builder: `arg0 int, err error`.
    pub fn named_results(&self) -> String {
        join_params(&self.ret_names, &self.ret_types)
    }

    /// `""`, `" T"` or `" (A, B)"`
    pub fn results(&self) -> String {
        format_results(&self.ret_types)
    }

    /// Names of the non-variadic inputs.
    pub fn fixed_arg_names(&self) -> &[String] {
        if self.is_variadic {
            &self.arg_names[..self.arg_names.len() - 1]
        } else {
            &self.arg_names
        }
    }

    /// Name of the variadic input.
    pub fn variadic_name(&self) -> Option<&str> {
        if self.is_variadic {
            self.arg_names.last().map(String::as_str)
        } else {
            None
        }
    }

    /// The signature as an anonymous function type: `func(string, ...int) error`.
    pub fn func_type(&self) -> String {
        format!("func({}){}", self.arg_types.join(", "), self.results())
    }
}

/// Join parameter names and types, stating a type only once for a run of adjacent equal types.
///
/// ## Examples
/// ```rust
/// use mockforge::backend::signature::join_params;
///
/// let names = ["x", "y", "z"].map(String::from);
/// let types = ["int", "int", "string"].map(String::from);
/// assert_eq!(join_params(&names, &types), "x, y int, z string");
/// ```
pub fn join_params(names: &[String], types: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| match (types.get(i), types.get(i + 1)) {
            (Some(ty), Some(next)) if ty == next => name.clone(),
            (Some(ty), _) => format!("{name} {ty}"),
            (None, _) => name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a result list the way it follows a parameter list.
pub fn format_results(types: &[String]) -> String {
    match types {
        [] => String::new(),
        [single] => format!(" {single}"),
        many => format!(" ({})", many.join(", ")),
    }
}

/// Renders signatures against one file's alias table.
pub struct SignatureRenderer<'a> {
    aliases: &'a AliasTable,
    package_override: Option<&'a str>,
}

impl<'a> SignatureRenderer<'a> {
    /// `package_override` is the output package path; types from it render unqualified.
    pub fn new(aliases: &'a AliasTable, package_override: Option<&'a str>) -> Self {
        Self {
            aliases,
            package_override,
        }
    }

    fn context(&self) -> RenderContext<'a> {
        RenderContext::new(self.aliases.as_map(), self.package_override)
    }

    /// Long and short type-parameter lists for `intf`.
    pub fn type_params(&self, intf: &Interface) -> Result<TypeParamForms, RenderError> {
        if intf.type_params.is_empty() {
            return Ok(TypeParamForms::default());
        }
        let ctx = self.context();
        let mut long = Vec::with_capacity(intf.type_params.len());
        let mut short = Vec::with_capacity(intf.type_params.len());
        for tp in &intf.type_params {
            long.push(format!("{} {}", tp.name, tp.constraint.render(&ctx)?));
            short.push(tp.name.clone());
        }
        Ok(TypeParamForms {
            long: format!("[{}]", long.join(", ")),
            short: format!("[{}]", short.join(", ")),
        })
    }

    /// Render `method` as it appears inside `intf`.
    pub fn method(&self, intf: &Interface, method: &Method) -> Result<RenderedSignature, RenderError> {
        let ctx = self.context();

        let mut arg_types = render_types(&method.inputs, &ctx)?;
        if let Some(variadic) = &method.variadic {
            arg_types.push(format!("...{}", variadic.ty.render(&ctx)?));
        }
        let ret_types = render_types(&method.outputs, &ctx)?;

        Ok(RenderedSignature {
            arg_names: self.param_names(intf, &method.inputs, method.variadic.as_ref()),
            arg_types,
            ret_names: self.param_names(intf, &method.outputs, None),
            ret_types,
            is_variadic: method.variadic.is_some(),
        })
    }

    fn param_names(&self, intf: &Interface, params: &[Parameter], variadic: Option<&Parameter>) -> Vec<String> {
        let mut ia = IdentifierAllocator::new(self.aliases.aliases());
        ia.reserve(intf.type_params.iter().map(|tp| tp.name.as_str()));

        params
            .iter()
            .chain(variadic)
            .enumerate()
            .map(|(i, param)| {
                let name = param.name.as_str();
                if name.is_empty()
                    || name == "_"
                    || self.aliases.contains_alias(name)
                    || universe::is_body_builtin(name)
                {
                    ia.allocate(&format!("arg{i}"))
                } else {
                    ia.allocate(name)
                }
            })
            .collect()
    }
}

fn render_types(params: &[Parameter], ctx: &RenderContext<'_>) -> Result<Vec<String>, RenderError> {
    params.iter().map(|p| p.ty.render(ctx)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::super::imports::ImportResolver;
    use super::super::oracle::NoOracle;
    use super::*;
    use mockforge_model::Type;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn table(paths: &[&str]) -> AliasTable {
        let overrides = BTreeMap::new();
        let paths: BTreeSet<String> = paths.iter().map(|s| s.to_string()).collect();
        ImportResolver::new(&NoOracle, &overrides).resolve_paths(&paths, "example.com/src", None)
    }

    // ========================================
    // join_params / format_results
    // ========================================

    #[test]
    fn test_join_params_compresses_adjacent_equal_types() {
        let got = join_params(&strings(&["x", "y", "z"]), &strings(&["int", "int", "string"]));
        assert_eq!(got, "x, y int, z string");
    }

    #[test]
    fn test_join_params_only_adjacent_runs() {
        let got = join_params(&strings(&["a", "b", "c"]), &strings(&["int", "string", "int"]));
        assert_eq!(got, "a int, b string, c int");
    }

    #[test]
    fn test_join_params_variadic_not_merged() {
        let got = join_params(&strings(&["a", "b", "c"]), &strings(&["string", "string", "...string"]));
        assert_eq!(got, "a, b string, c ...string");
    }

    #[test]
    fn test_join_params_empty() {
        assert_eq!(join_params(&[], &[]), "");
    }

    #[test]
    fn test_format_results() {
        assert_eq!(format_results(&[]), "");
        assert_eq!(format_results(&strings(&["error"])), " error");
        assert_eq!(format_results(&strings(&["int", "error"])), " (int, error)");
    }

    // ========================================
    // Type parameters
    // ========================================

    #[test]
    fn test_type_params_long_and_short() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let intf = Interface::new("Pipe")
            .with_type_param("I", Type::predeclared("any"))
            .with_type_param("O", Type::predeclared("comparable"));
        let forms = renderer.type_params(&intf).unwrap();
        assert_eq!(forms.long, "[I any, O comparable]");
        assert_eq!(forms.short, "[I, O]");
    }

    #[test]
    fn test_type_params_absent_yield_empty_strings() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        assert_eq!(renderer.type_params(&Interface::new("Plain")).unwrap(), TypeParamForms::default());
    }

    // ========================================
    // Method signatures
    // ========================================

    #[test]
    fn test_method_variadic_rendering() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let method = Method::new("Log")
            .with_input("a", Type::predeclared("string"))
            .with_input("b", Type::predeclared("string"))
            .with_variadic("c", Type::predeclared("int"))
            .with_output("", Type::predeclared("error"));
        let sig = renderer.method(&Interface::new("Logger"), &method).unwrap();
        assert_eq!(sig.params(), "a, b string, c ...int");
        assert_eq!(sig.results(), " error");
        assert_eq!(sig.fixed_arg_names(), &strings(&["a", "b"])[..]);
        assert_eq!(sig.variadic_name(), Some("c"));
        assert_eq!(sig.func_type(), "func(string, string, ...int) error");
        assert_eq!(sig.named_results(), "arg0 error");
    }

    #[test]
    fn test_anonymous_blank_and_alias_names_become_arg_n() {
        let aliases = table(&["context"]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let method = Method::new("Do")
            .with_input("", Type::named("context", "Context"))
            .with_input("_", Type::predeclared("int"))
            .with_input("context", Type::predeclared("string"))
            .with_variadic("", Type::predeclared("byte"));
        let sig = renderer.method(&Interface::new("Doer"), &method).unwrap();
        assert_eq!(sig.arg_names, strings(&["arg0", "arg1", "arg2", "arg3"]));
        assert_eq!(sig.params(), "arg0 context.Context, arg1 int, arg2 string, arg3 ...byte");
    }

    #[test]
    fn test_builtin_shadowing_names_become_arg_n() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let method = Method::new("Push")
            .with_input("append", Type::predeclared("bool"))
            .with_variadic("any", Type::predeclared("string"));
        let sig = renderer.method(&Interface::new("Stack"), &method).unwrap();
        assert_eq!(sig.params(), "arg0 bool, arg1 ...string");
    }

    #[test]
    fn test_synthesized_name_does_not_duplicate_user_name() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let method = Method::new("Swap")
            .with_input("arg1", Type::predeclared("int"))
            .with_input("", Type::predeclared("int"));
        let sig = renderer.method(&Interface::new("Swapper"), &method).unwrap();
        assert_eq!(sig.arg_names, strings(&["arg1", "arg1_2"]));
    }

    #[test]
    fn test_param_named_like_type_param_is_renamed() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let intf = Interface::new("Box").with_type_param("T", Type::predeclared("any"));
        let method = Method::new("Put").with_input("T", Type::type_param("T"));
        let sig = renderer.method(&intf, &method).unwrap();
        assert_eq!(sig.params(), "T_2 T");
    }

    #[test]
    fn test_override_package_unqualified() {
        let aliases = table(&["example.com/src"]);
        let renderer = SignatureRenderer::new(&aliases, Some("example.com/src"));
        let method = Method::new("Get").with_output("", Type::named("example.com/src", "Record"));
        let sig = renderer.method(&Interface::new("Getter"), &method).unwrap();
        assert_eq!(sig.results(), " Record");
    }

    #[test]
    fn test_render_error_propagates() {
        let aliases = table(&[]);
        let renderer = SignatureRenderer::new(&aliases, None);
        let method = Method::new("Bad").with_input("x", Type::named("example.com/src", ""));
        assert!(renderer.method(&Interface::new("Broken"), &method).is_err());
    }
}
