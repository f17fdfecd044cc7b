//! Package, interface and method definitions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Type;

/// A Go package and the interfaces to mock from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Declared package name (`driver`).
    pub name: String,
    /// Full import path (`database/sql/driver`).
    pub path: String,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    /// Packages imported with `.`; their symbols are used unqualified.
    #[serde(default)]
    pub dot_imports: Vec<String>,
}

impl Package {
    /// Import paths referenced by any interface, its type-parameter constraints, or its methods.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for intf in &self.interfaces {
            intf.collect_imports(&mut out);
        }
        out
    }

    /// Whether any interface has at least one method.
    pub fn has_methods(&self) -> bool {
        self.interfaces.iter().any(|intf| !intf.methods.is_empty())
    }

    /// Drop the named interfaces.
    pub fn exclude_interfaces<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let excluded: BTreeSet<&str> = names.into_iter().collect();
        self.interfaces.retain(|intf| !excluded.contains(intf.name.as_str()));
    }
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            type_params: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_type_param(mut self, name: impl Into<String>, constraint: Type) -> Self {
        self.type_params.push(TypeParam {
            name: name.into(),
            constraint,
        });
        self
    }

    fn collect_imports(&self, out: &mut BTreeSet<String>) {
        for method in &self.methods {
            method.collect_imports(out);
        }
        for tp in &self.type_params {
            tp.constraint.collect_imports(out);
        }
    }
}

/// A generic type parameter and its constraint (`T any`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Type,
}

/// A method of an interface.
///
/// A trailing variadic parameter is carried in `variadic`, never in `inputs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    /// The variadic parameter; its `ty` is the element type (`int` for `...int`).
    #[serde(default)]
    pub variadic: Option<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            variadic: None,
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.inputs.push(Parameter::new(name, ty));
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.outputs.push(Parameter::new(name, ty));
        self
    }

    pub fn with_variadic(mut self, name: impl Into<String>, elem: Type) -> Self {
        self.variadic = Some(Parameter::new(name, elem));
        self
    }

    pub(crate) fn collect_imports(&self, out: &mut BTreeSet<String>) {
        for param in self.inputs.iter().chain(&self.outputs).chain(&self.variadic) {
            param.ty.collect_imports(out);
        }
    }
}

/// A named or anonymous parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }
}
