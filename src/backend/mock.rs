//! Mock type synthesis.
//!
//! For one interface this emits the mock struct, its recorder, the constructor, the `EXPECT` accessor and, per
//! method (in name order), the forwarding method, the recorder method and optionally the typed call wrapper.
//!
//! Every receiver and temporary is minted by an [`IdentifierAllocator`] seeded with the names already visible in
//! that body, so nothing the user named can be shadowed.

use mockforge_model::{Interface, Method};

use super::emitter::GoEmitter;
use super::errors::GenerateError;
use super::idents::IdentifierAllocator;
use super::imports::{AliasTable, GOMOCK_IMPORT_PATH, REFLECT_IMPORT_PATH};
use super::signature::{RenderedSignature, SignatureRenderer, TypeParamForms, join_params};

/// Names shared by every block of one interface's mock.
struct MockNames<'i> {
    intf: &'i Interface,
    mock: String,
    recorder: String,
    forms: TypeParamForms,
}

impl MockNames<'_> {
    /// `MockFoo[T]`
    fn mock_type(&self) -> String {
        format!("{}{}", self.mock, self.forms.short)
    }

    /// `MockFooMockRecorder[T]`
    fn recorder_type(&self) -> String {
        format!("{}{}", self.recorder, self.forms.short)
    }

    /// `MockFooBarCall`, without type parameters.
    fn call_name(&self, method: &Method) -> String {
        format!("{}{}Call", self.mock, method.name)
    }
}

/// Emits mocks for the interfaces of one generated file.
pub struct MockSynthesizer<'a> {
    aliases: &'a AliasTable,
    signatures: SignatureRenderer<'a>,
    typed: bool,
    gomock: String,
    reflect: String,
}

impl<'a> MockSynthesizer<'a> {
    /// `output_package_path` is the generated file's own import path, whose types render unqualified.
    pub fn new(aliases: &'a AliasTable, output_package_path: Option<&'a str>, typed: bool) -> Self {
        Self {
            aliases,
            signatures: SignatureRenderer::new(aliases, output_package_path),
            typed,
            gomock: aliases.qualifier(GOMOCK_IMPORT_PATH),
            reflect: aliases.qualifier(REFLECT_IMPORT_PATH),
        }
    }

    /// Emit every block for `intf`, naming its mock `mock_name`.
    pub fn interface(&self, e: &mut GoEmitter, intf: &Interface, mock_name: &str) -> Result<(), GenerateError> {
        let forms = self
            .signatures
            .type_params(intf)
            .map_err(|source| GenerateError::render(format!("{} type parameters", intf.name), source))?;
        let names = MockNames {
            intf,
            mock: mock_name.to_string(),
            recorder: format!("{mock_name}MockRecorder"),
            forms,
        };

        self.emit_structs(e, &names);
        self.emit_constructor(e, &names);
        self.emit_expect(e, &names);

        let mut methods: Vec<&Method> = intf.methods.iter().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        for method in methods {
            let sig = self
                .signatures
                .method(intf, method)
                .map_err(|source| GenerateError::render(format!("{}.{}", intf.name, method.name), source))?;
            self.emit_forwarding(e, &names, method, &sig);
            self.emit_recorder(e, &names, method, &sig);
            if self.typed {
                self.emit_call_wrapper(e, &names, method, &sig);
            }
        }
        Ok(())
    }

    /// Allocator seeded with the import aliases and the interface's type parameters.
    fn base_allocator(&self, names: &MockNames<'_>) -> IdentifierAllocator {
        let mut ia = IdentifierAllocator::new(self.aliases.aliases());
        ia.reserve(names.intf.type_params.iter().map(|tp| tp.name.as_str()));
        ia
    }

    /// [`Self::base_allocator`] plus the body's own `locals`.
    fn allocator<'n>(&self, names: &MockNames<'_>, locals: impl IntoIterator<Item = &'n String>) -> IdentifierAllocator {
        let mut ia = self.base_allocator(names);
        ia.reserve(locals.into_iter().cloned());
        ia
    }

    fn emit_structs(&self, e: &mut GoEmitter, names: &MockNames<'_>) {
        e.blank_line();
        e.comment(&format!("{} is a mock of {} interface.", names.mock, names.intf.name));
        e.struct_def(
            &format!("{}{}", names.mock, names.forms.long),
            &[
                ("ctrl", format!("*{}Controller", self.gomock)),
                ("recorder", format!("*{}", names.recorder_type())),
                ("isgomock", "struct{}".to_string()),
            ],
        );

        e.blank_line();
        e.comment(&format!("{} is the mock recorder for {}.", names.recorder, names.mock));
        e.struct_def(
            &format!("{}{}", names.recorder, names.forms.long),
            &[("mock", format!("*{}", names.mock_type()))],
        );
    }

    fn emit_constructor(&self, e: &mut GoEmitter, names: &MockNames<'_>) {
        let mut ia = self.base_allocator(names);
        let ctrl = ia.allocate("ctrl");
        let mock = ia.allocate("mock");

        e.blank_line();
        e.comment(&format!("New{} creates a new mock instance.", names.mock));
        e.block(
            &format!(
                "func New{}{}({ctrl} *{}Controller) *{}",
                names.mock,
                names.forms.long,
                self.gomock,
                names.mock_type()
            ),
            |e| {
                e.line(&format!("{mock} := &{}{{ctrl: {ctrl}}}", names.mock_type()));
                e.line(&format!("{mock}.recorder = &{}{{{mock}}}", names.recorder_type()));
                e.line(&format!("return {mock}"));
            },
        );
    }

    fn emit_expect(&self, e: &mut GoEmitter, names: &MockNames<'_>) {
        let recv = self.base_allocator(names).allocate("m");

        e.blank_line();
        e.comment("EXPECT returns an object that allows the caller to indicate expected use.");
        e.block(
            &format!("func ({recv} *{}) EXPECT() *{}", names.mock_type(), names.recorder_type()),
            |e| e.line(&format!("return {recv}.recorder")),
        );
    }

    fn emit_forwarding(&self, e: &mut GoEmitter, names: &MockNames<'_>, method: &Method, sig: &RenderedSignature) {
        let mut ia = self.allocator(names, &sig.arg_names);
        let recv = ia.allocate("m");

        e.blank_line();
        e.comment(&format!("{} mocks base method.", method.name));
        let header = format!(
            "func ({recv} *{}) {}({}){}",
            names.mock_type(),
            method.name,
            sig.params(),
            sig.results()
        );
        e.block(&header, |e| {
            e.line(&format!("{recv}.ctrl.T.Helper()"));

            let call_args = match sig.variadic_name() {
                Some(variadic) => {
                    let varargs = ia.allocate("varargs");
                    let item = ia.allocate("a");
                    e.line(&format!("{varargs} := []any{{{}}}", sig.fixed_arg_names().join(", ")));
                    e.block(&format!("for _, {item} := range {variadic}"), |e| {
                        e.line(&format!("{varargs} = append({varargs}, {item})"));
                    });
                    format!(", {varargs}...")
                }
                None => trailing_args(&sig.arg_names),
            };

            let call = format!("{recv}.ctrl.Call({recv}, \"{}\"{call_args})", method.name);
            if sig.ret_types.is_empty() {
                e.line(&call);
                return;
            }

            let ret = ia.allocate("ret");
            e.line(&format!("{ret} := {call}"));
            let results: Vec<String> = sig
                .ret_types
                .iter()
                .enumerate()
                .map(|(i, ty)| {
                    let id = ia.allocate(&format!("ret{i}"));
                    e.line(&format!("{id}, _ := {ret}[{i}].({ty})"));
                    id
                })
                .collect();
            e.line(&format!("return {}", results.join(", ")));
        });
    }

    fn emit_recorder(&self, e: &mut GoEmitter, names: &MockNames<'_>, method: &Method, sig: &RenderedSignature) {
        let mut ia = self.allocator(names, &sig.arg_names);
        let recv = ia.allocate("mr");

        // Recorder arguments accept matchers as well as values.
        let arity = sig.arg_names.len();
        let any_types: Vec<String> = (0..arity)
            .map(|i| if sig.is_variadic && i + 1 == arity { "...any" } else { "any" }.to_string())
            .collect();
        let returns = if self.typed {
            format!("*{}{}", names.call_name(method), names.forms.short)
        } else {
            format!("*{}Call", self.gomock)
        };

        e.blank_line();
        e.comment(&format!("{} indicates an expected call of {}.", method.name, method.name));
        let header = format!(
            "func ({recv} *{}) {}({}) {returns}",
            names.recorder_type(),
            method.name,
            join_params(&sig.arg_names, &any_types)
        );
        e.block(&header, |e| {
            e.line(&format!("{recv}.mock.ctrl.T.Helper()"));

            let call_args = match sig.variadic_name() {
                Some(variadic) if sig.fixed_arg_names().is_empty() => format!(", {variadic}..."),
                Some(variadic) => {
                    let varargs = ia.allocate("varargs");
                    e.line(&format!(
                        "{varargs} := append([]any{{{}}}, {variadic}...)",
                        sig.fixed_arg_names().join(", ")
                    ));
                    format!(", {varargs}...")
                }
                None => trailing_args(&sig.arg_names),
            };

            let record = format!(
                "{recv}.mock.ctrl.RecordCallWithMethodType({recv}.mock, \"{name}\", {reflect}TypeOf((*{mock})(nil).{name}){call_args})",
                name = method.name,
                reflect = self.reflect,
                mock = names.mock_type(),
            );
            if self.typed {
                let call = ia.allocate("call");
                e.line(&format!("{call} := {record}"));
                e.line(&format!(
                    "return &{}{}{{Call: {call}}}",
                    names.call_name(method),
                    names.forms.short
                ));
            } else {
                e.line(&format!("return {record}"));
            }
        });
    }

    fn emit_call_wrapper(&self, e: &mut GoEmitter, names: &MockNames<'_>, method: &Method, sig: &RenderedSignature) {
        let call_name = names.call_name(method);
        let call_type = format!("{call_name}{}", names.forms.short);
        let mut ia = self.allocator(names, sig.arg_names.iter().chain(&sig.ret_names));
        let recv = ia.allocate("c");
        let f = ia.allocate("f");

        e.blank_line();
        e.comment(&format!("{call_name} wrap *gomock.Call"));
        e.struct_def(
            &format!("{call_name}{}", names.forms.long),
            &[("", format!("*{}Call", self.gomock))],
        );

        e.blank_line();
        e.comment("Return rewrite *gomock.Call.Return");
        e.block(
            &format!("func ({recv} *{call_type}) Return({}) *{call_type}", sig.named_results()),
            |e| {
                e.line(&format!("{recv}.Call = {recv}.Call.Return({})", sig.ret_names.join(", ")));
                e.line(&format!("return {recv}"));
            },
        );

        let func_type = sig.func_type();
        for builder in ["Do", "DoAndReturn"] {
            e.blank_line();
            e.comment(&format!("{builder} rewrite *gomock.Call.{builder}"));
            e.block(
                &format!("func ({recv} *{call_type}) {builder}({f} {func_type}) *{call_type}"),
                |e| {
                    e.line(&format!("{recv}.Call = {recv}.Call.{builder}({f})"));
                    e.line(&format!("return {recv}"));
                },
            );
        }
    }
}

/// `, a, b` for appending to a call's fixed arguments.
fn trailing_args(names: &[String]) -> String {
    names.iter().map(|name| format!(", {name}")).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::super::imports::ImportResolver;
    use super::super::oracle::NoOracle;
    use super::*;
    use mockforge_model::Type;

    fn table(paths: &[&str]) -> AliasTable {
        let overrides = BTreeMap::new();
        let paths: BTreeSet<String> = paths.iter().map(|s| s.to_string()).collect();
        ImportResolver::new(&NoOracle, &overrides).resolve_paths(&paths, "example.com/src", None)
    }

    fn synthesize(intf: &Interface, typed: bool) -> String {
        let aliases = table(&[GOMOCK_IMPORT_PATH, REFLECT_IMPORT_PATH]);
        let synth = MockSynthesizer::new(&aliases, None, typed);
        let mut e = GoEmitter::new();
        synth.interface(&mut e, intf, &format!("Mock{}", intf.name)).unwrap();
        e.finish()
    }

    fn logger() -> Interface {
        Interface::new("Foo").with_method(
            Method::new("Bar")
                .with_input("a", Type::predeclared("string"))
                .with_input("b", Type::predeclared("string"))
                .with_variadic("c", Type::predeclared("int"))
                .with_output("", Type::predeclared("error")),
        )
    }

    // ========================================
    // Structs, constructor, accessor
    // ========================================

    #[test]
    fn test_mock_struct_fields_aligned() {
        let out = synthesize(&Interface::new("Foo"), false);
        assert!(out.contains(
            "type MockFoo struct {\n\tctrl     *gomock.Controller\n\trecorder *MockFooMockRecorder\n\tisgomock struct{}\n}\n"
        ));
        assert!(out.contains("type MockFooMockRecorder struct {\n\tmock *MockFoo\n}\n"));
    }

    #[test]
    fn test_constructor_and_expect() {
        let out = synthesize(&Interface::new("Foo"), false);
        assert!(out.contains(
            "func NewMockFoo(ctrl *gomock.Controller) *MockFoo {\n\tmock := &MockFoo{ctrl: ctrl}\n\tmock.recorder = &MockFooMockRecorder{mock}\n\treturn mock\n}\n"
        ));
        assert!(out.contains("func (m *MockFoo) EXPECT() *MockFooMockRecorder {\n\treturn m.recorder\n}\n"));
    }

    #[test]
    fn test_explicit_mock_name() {
        let aliases = table(&[GOMOCK_IMPORT_PATH]);
        let synth = MockSynthesizer::new(&aliases, None, false);
        let mut e = GoEmitter::new();
        synth.interface(&mut e, &Interface::new("Conn"), "FakeConn").unwrap();
        let out = e.finish();
        assert!(out.contains("// FakeConn is a mock of Conn interface."));
        assert!(out.contains("type FakeConnMockRecorder struct"));
    }

    // ========================================
    // Forwarding and recorder methods
    // ========================================

    #[test]
    fn test_variadic_forwarding_method() {
        let out = synthesize(&logger(), false);
        assert!(out.contains(
            "func (m *MockFoo) Bar(a, b string, c ...int) error {\n\
\tm.ctrl.T.Helper()\n\
\tvarargs := []any{a, b}\n\
\tfor _, a_2 := range c {\n\
\t\tvarargs = append(varargs, a_2)\n\
\t}\n\
\tret := m.ctrl.Call(m, \"Bar\", varargs...)\n\
\tret0, _ := ret[0].(error)\n\
\treturn ret0\n\
}\n"
        ));
    }

    #[test]
    fn test_variadic_recorder_method() {
        let out = synthesize(&logger(), false);
        assert!(out.contains(
            "func (mr *MockFooMockRecorder) Bar(a, b any, c ...any) *gomock.Call {\n\
\tmr.mock.ctrl.T.Helper()\n\
\tvarargs := append([]any{a, b}, c...)\n\
\treturn mr.mock.ctrl.RecordCallWithMethodType(mr.mock, \"Bar\", reflect.TypeOf((*MockFoo)(nil).Bar), varargs...)\n\
}\n"
        ));
    }

    #[test]
    fn test_single_variadic_recorder_passes_through() {
        let intf = Interface::new("Foo").with_method(Method::new("Log").with_variadic("v", Type::predeclared("any")));
        let out = synthesize(&intf, false);
        assert!(out.contains("func (mr *MockFooMockRecorder) Log(v ...any) *gomock.Call {"));
        assert!(out.contains("reflect.TypeOf((*MockFoo)(nil).Log), v...)\n"));
        assert!(out.contains("\tm.ctrl.Call(m, \"Log\", varargs...)\n"));
    }

    #[test]
    fn test_variadic_params_named_like_builtins_are_renamed() {
        let intf = Interface::new("Foo").with_method(
            Method::new("Push")
                .with_input("append", Type::predeclared("bool"))
                .with_variadic("any", Type::predeclared("string")),
        );
        let out = synthesize(&intf, false);
        assert!(out.contains(
            "func (m *MockFoo) Push(arg0 bool, arg1 ...string) {\n\
\tm.ctrl.T.Helper()\n\
\tvarargs := []any{arg0}\n\
\tfor _, a := range arg1 {\n\
\t\tvarargs = append(varargs, a)\n\
\t}\n"
        ));
        assert!(out.contains("\tvarargs := append([]any{arg0}, arg1...)\n"));
    }

    #[test]
    fn test_no_results_skips_ret() {
        let intf = Interface::new("Foo").with_method(Method::new("Close"));
        let out = synthesize(&intf, false);
        assert!(out.contains("func (m *MockFoo) Close() {\n\tm.ctrl.T.Helper()\n\tm.ctrl.Call(m, \"Close\")\n}\n"));
        assert!(out.contains("func (mr *MockFooMockRecorder) Close() *gomock.Call {"));
    }

    #[test]
    fn test_param_named_m_renames_receiver() {
        let intf = Interface::new("Foo").with_method(Method::new("Set").with_input("m", Type::predeclared("int")));
        let out = synthesize(&intf, false);
        assert!(out.contains("func (m_2 *MockFoo) Set(m int) {"));
        assert!(out.contains("\tm_2.ctrl.Call(m_2, \"Set\", m)\n"));
    }

    #[test]
    fn test_methods_emitted_in_name_order() {
        let intf = Interface::new("Foo")
            .with_method(Method::new("Zeta"))
            .with_method(Method::new("Alpha"));
        let out = synthesize(&intf, false);
        let alpha = out.find("Alpha mocks base method").unwrap();
        let zeta = out.find("Zeta mocks base method").unwrap();
        assert!(alpha < zeta);
    }

    // ========================================
    // Generics
    // ========================================

    #[test]
    fn test_generic_long_and_short_forms() {
        let intf = Interface::new("Store")
            .with_type_param("T", Type::predeclared("any"))
            .with_method(Method::new("Get").with_output("", Type::type_param("T")));
        let out = synthesize(&intf, false);
        assert!(out.contains("type MockStore[T any] struct {"));
        assert!(out.contains("\trecorder *MockStoreMockRecorder[T]\n"));
        assert!(out.contains("func NewMockStore[T any](ctrl *gomock.Controller) *MockStore[T] {"));
        assert!(out.contains("func (m *MockStore[T]) Get() T {"));
        assert!(out.contains("reflect.TypeOf((*MockStore[T])(nil).Get)"));
    }

    // ========================================
    // Typed wrappers
    // ========================================

    #[test]
    fn test_typed_wrapper() {
        let out = synthesize(&logger(), true);
        assert!(out.contains("func (mr *MockFooMockRecorder) Bar(a, b any, c ...any) *MockFooBarCall {"));
        assert!(out.contains("\tcall := mr.mock.ctrl.RecordCallWithMethodType("));
        assert!(out.contains("\treturn &MockFooBarCall{Call: call}\n"));
        assert!(out.contains("// MockFooBarCall wrap *gomock.Call\ntype MockFooBarCall struct {\n\t*gomock.Call\n}\n"));
        // The variadic input is named `c`, so the wrapper receiver moves aside.
        assert!(out.contains(
            "func (c_2 *MockFooBarCall) Return(arg0 error) *MockFooBarCall {\n\tc_2.Call = c_2.Call.Return(arg0)\n\treturn c_2\n}\n"
        ));
        assert!(out.contains(
            "func (c_2 *MockFooBarCall) Do(f func(string, string, ...int) error) *MockFooBarCall {\n\tc_2.Call = c_2.Call.Do(f)\n"
        ));
        assert!(out.contains(
            "func (c_2 *MockFooBarCall) DoAndReturn(f func(string, string, ...int) error) *MockFooBarCall {"
        ));
    }

    #[test]
    fn test_typed_wrapper_generic() {
        let intf = Interface::new("Store")
            .with_type_param("T", Type::predeclared("any"))
            .with_method(Method::new("Put").with_input("v", Type::type_param("T")));
        let out = synthesize(&intf, true);
        assert!(out.contains("type MockStorePutCall[T any] struct {"));
        assert!(out.contains("func (c *MockStorePutCall[T]) Return() *MockStorePutCall[T] {"));
        assert!(out.contains("\treturn &MockStorePutCall[T]{Call: call}\n"));
    }

    #[test]
    fn test_typed_wrapper_receiver_avoids_input_named_c() {
        let intf = Interface::new("Foo").with_method(Method::new("Use").with_input("c", Type::predeclared("int")));
        let out = synthesize(&intf, true);
        assert!(out.contains("func (c_2 *MockFooUseCall) Do(f func(int)) *MockFooUseCall {"));
    }

    // ========================================
    // Qualifiers
    // ========================================

    #[test]
    fn test_runtime_qualifier_follows_alias_table() {
        let aliases = table(&["example.com/gomock", GOMOCK_IMPORT_PATH, REFLECT_IMPORT_PATH]);
        let synth = MockSynthesizer::new(&aliases, None, false);
        let mut e = GoEmitter::new();
        let intf = Interface::new("Foo").with_method(Method::new("Ping"));
        synth.interface(&mut e, &intf, "MockFoo").unwrap();
        let out = e.finish();
        assert!(out.contains("ctrl     *gomock0.Controller"));
        assert!(out.contains(") *gomock0.Call {"));
    }

    #[test]
    fn test_render_error_names_site() {
        let aliases = table(&[GOMOCK_IMPORT_PATH]);
        let synth = MockSynthesizer::new(&aliases, None, false);
        let mut e = GoEmitter::new();
        let intf = Interface::new("Foo").with_method(Method::new("Bad").with_input("x", Type::named("example.com/x", "")));
        let err = synth.interface(&mut e, &intf, "MockFoo").unwrap_err();
        assert!(err.to_string().contains("Foo.Bad"));
    }
}
