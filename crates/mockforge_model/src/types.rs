//! Go type model and its renderer.
//!
//! [`Type`] is a closed sum type; [`Type::render`] is an exhaustive `match` producing Go source text. The only
//! inputs besides the type itself are the import alias table and the optional package whose qualifier is
//! suppressed (see [`RenderContext`]).

use std::collections::{BTreeMap, BTreeSet};

use mockforge_core::naming;
use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::package::{Method, Parameter};

/// Everything a [`Type`] needs to render itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Import path → local alias.
    pub aliases: &'a BTreeMap<String, String>,
    /// Types from this package render unqualified.
    pub package_override: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(aliases: &'a BTreeMap<String, String>, package_override: Option<&'a str>) -> Self {
        Self {
            aliases,
            package_override,
        }
    }

    fn qualifier(&self, package: &str) -> Option<&'a str> {
        if package.is_empty() || self.package_override == Some(package) {
            return None;
        }
        self.aliases.get(package).map(String::as_str)
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Recv,
    Send,
}

/// A function signature used as a type (`func(int) error`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FuncType {
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    #[serde(default)]
    pub variadic: Option<Box<Parameter>>,
}

/// A struct-literal field. An empty name marks an embedded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// A Go type as it appears in an interface method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Builtin types rendered verbatim: `int`, `error`, `any`, `interface{}`.
    Predeclared { name: String },
    /// A declared type, qualified by its package's alias unless that package is elided.
    Named {
        #[serde(default)]
        package: String,
        name: String,
        #[serde(default)]
        type_args: Vec<Type>,
    },
    Pointer { elem: Box<Type> },
    /// `[]T` when `len` is absent, `[N]T` otherwise.
    Array {
        #[serde(default)]
        len: Option<u64>,
        elem: Box<Type>,
    },
    Map { key: Box<Type>, value: Box<Type> },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<Type>,
    },
    Func(FuncType),
    Interface {
        #[serde(default)]
        methods: Vec<Method>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// A reference to one of the enclosing interface's type parameters.
    TypeParam { name: String },
}

impl Type {
    pub fn predeclared(name: impl Into<String>) -> Self {
        Type::Predeclared { name: name.into() }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Named {
            package: package.into(),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn generic(package: impl Into<String>, name: impl Into<String>, type_args: Vec<Type>) -> Self {
        Type::Named {
            package: package.into(),
            name: name.into(),
            type_args,
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer { elem: Box::new(elem) }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len: Some(len),
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: Type) -> Self {
        Type::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Type::TypeParam { name: name.into() }
    }

    /// Render this type as Go source text.
    ///
    /// ## Errors
    /// - [`RenderError`] when a named type, type parameter, interface-literal method or struct field has an empty or
    ///   non-identifier name, or a predeclared type is empty.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        match self {
            Type::Predeclared { name } => {
                if name.is_empty() {
                    return Err(RenderError::EmptyName { what: "predeclared type" });
                }
                Ok(name.clone())
            }
            Type::Named {
                package,
                name,
                type_args,
            } => {
                check_identifier("named type", name)?;
                let args = render_type_args(type_args, ctx)?;
                Ok(match ctx.qualifier(package) {
                    Some(alias) => format!("{alias}.{name}{args}"),
                    None => format!("{name}{args}"),
                })
            }
            Type::Pointer { elem } => Ok(format!("*{}", elem.render(ctx)?)),
            Type::Array { len: None, elem } => Ok(format!("[]{}", elem.render(ctx)?)),
            Type::Array { len: Some(n), elem } => Ok(format!("[{n}]{}", elem.render(ctx)?)),
            Type::Map { key, value } => Ok(format!("map[{}]{}", key.render(ctx)?, value.render(ctx)?)),
            Type::Chan { dir, elem } => {
                let inner = elem.render(ctx)?;
                Ok(match dir {
                    ChanDir::Recv => format!("<-chan {inner}"),
                    ChanDir::Send => format!("chan<- {inner}"),
                    // `chan <-chan T` would parse as `chan<- chan T`.
                    ChanDir::Both if matches!(**elem, Type::Chan { dir: ChanDir::Recv, .. }) => {
                        format!("chan ({inner})")
                    }
                    ChanDir::Both => format!("chan {inner}"),
                })
            }
            Type::Func(func) => Ok(format!(
                "func{}",
                render_signature(&func.inputs, &func.outputs, func.variadic.as_deref(), ctx)?
            )),
            Type::Interface { methods } => {
                if methods.is_empty() {
                    return Ok("interface{}".to_string());
                }
                let mut parts = Vec::with_capacity(methods.len());
                for method in methods {
                    check_identifier("interface method", &method.name)?;
                    let sig = render_signature(&method.inputs, &method.outputs, method.variadic.as_ref(), ctx)?;
                    parts.push(format!("{}{sig}", method.name));
                }
                Ok(format!("interface{{ {} }}", parts.join("; ")))
            }
            Type::Struct { fields } => {
                if fields.is_empty() {
                    return Ok("struct{}".to_string());
                }
                let mut parts = Vec::with_capacity(fields.len());
                for field in fields {
                    let ty = field.ty.render(ctx)?;
                    if field.name.is_empty() {
                        parts.push(ty);
                    } else {
                        check_identifier("struct field", &field.name)?;
                        parts.push(format!("{} {ty}", field.name));
                    }
                }
                Ok(format!("struct{{ {} }}", parts.join("; ")))
            }
            Type::TypeParam { name } => {
                check_identifier("type parameter", name)?;
                Ok(name.clone())
            }
        }
    }

    /// Add every import path this type references to `out`.
    pub fn collect_imports(&self, out: &mut BTreeSet<String>) {
        match self {
            Type::Predeclared { .. } | Type::TypeParam { .. } => {}
            Type::Named {
                package, type_args, ..
            } => {
                if !package.is_empty() {
                    out.insert(package.clone());
                }
                for arg in type_args {
                    arg.collect_imports(out);
                }
            }
            Type::Pointer { elem } | Type::Array { elem, .. } | Type::Chan { elem, .. } => elem.collect_imports(out),
            Type::Map { key, value } => {
                key.collect_imports(out);
                value.collect_imports(out);
            }
            Type::Func(func) => {
                for param in func.inputs.iter().chain(&func.outputs).chain(func.variadic.as_deref()) {
                    param.ty.collect_imports(out);
                }
            }
            Type::Interface { methods } => {
                for method in methods {
                    method.collect_imports(out);
                }
            }
            Type::Struct { fields } => {
                for field in fields {
                    field.ty.collect_imports(out);
                }
            }
        }
    }
}

fn check_identifier(what: &'static str, name: &str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::EmptyName { what });
    }
    if !naming::is_identifier(name) {
        return Err(RenderError::InvalidName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn render_type_args(args: &[Type], ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    if args.is_empty() {
        return Ok(String::new());
    }
    let rendered = args.iter().map(|arg| arg.render(ctx)).collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", rendered.join(", ")))
}

/// Render `(A, B, ...V) R` for function types and interface-literal methods; parameter names are dropped.
fn render_signature(
    inputs: &[Parameter],
    outputs: &[Parameter],
    variadic: Option<&Parameter>,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let mut args = inputs.iter().map(|p| p.ty.render(ctx)).collect::<Result<Vec<_>, _>>()?;
    if let Some(v) = variadic {
        args.push(format!("...{}", v.ty.render(ctx)?));
    }
    let rets = outputs.iter().map(|p| p.ty.render(ctx)).collect::<Result<Vec<_>, _>>()?;
    let ret = match rets.len() {
        0 => String::new(),
        1 => format!(" {}", rets[0]),
        _ => format!(" ({})", rets.join(", ")),
    };
    Ok(format!("({}){ret}", args.join(", ")))
}
