use std::{cell::RefCell, rc::Rc};

use lux::{
    evaluate,
    interpreter::{
        builtins::core::standard_library,
        evaluator::core::{Evaluation, Interpreter},
        lexer::lex,
        parser::core::parse_program,
        value::{core::Value, env::Environment},
    },
};

fn run(source: &str) -> Evaluation {
    evaluate(source, "test.lux")
}

fn assert_output(source: &str, expected: &[&str]) {
    let result = run(source);
    if let Some(error) = &result.error {
        panic!("Script failed: {error}\nSource:\n{source}");
    }
    assert_eq!(result.output, expected, "Source:\n{source}");
}

fn assert_error_contains(source: &str, needle: &str) {
    let result = run(source);
    match &result.error {
        Some(error) => {
            assert!(error.contains(needle),
                    "Expected error containing {needle:?}, got: {error}")
        },
        None => panic!("Script succeeded but was expected to fail:\n{source}"),
    }
}

fn run_with_limit(source: &str, limit: u64) -> Evaluation {
    let output = Rc::new(RefCell::new(Vec::new()));
    let globals = Environment::new();
    for (name, builtin) in standard_library(Rc::clone(&output)) {
        globals.borrow_mut()
               .define(&name, Value::Builtin(builtin), true);
    }

    let tokens = lex(source).unwrap();
    let program = parse_program(&mut tokens.iter().peekable()).unwrap();
    Interpreter::new("test.lux", globals, output).with_step_limit(limit)
                                                .run(&program)
}

#[test]
fn hello_world() {
    assert_output("println(\"hello\")", &["hello"]);
}

#[test]
fn let_and_to_string() {
    assert_output("let x = 42\nprintln(to_string(x))", &["42"]);
}

#[test]
fn arithmetic_precedence() {
    assert_output("println(to_string(2 + 3 * 4))", &["14"]);
    assert_output("println(to_string(1 + 2 * 3))", &["7"]);
    assert_output("println(to_string(10 - 4 - 3))", &["3"]);
    assert_output("println(to_string(7 % 3))", &["1"]);
}

#[test]
fn exponent_is_right_associative() {
    assert_output("println(to_string(2 ^ 3 ^ 2))", &["512"]);
}

#[test]
fn logic_precedence() {
    assert_output("println(to_string(true and false or true))", &["true"]);
}

#[test]
fn short_circuit_skips_right_operand() {
    let source = r#"
let calls = []
func t()
    push(calls, 1)
    return true
end
let a = false and t()
println(to_string(len(calls)))
let b = true or t()
println(to_string(len(calls)))
let c = true and t()
println(to_string(len(calls)))
"#;
    assert_output(source, &["0", "0", "1"]);
}

#[test]
fn logic_returns_deciding_operand() {
    assert_output("println(to_string(nil or 5))", &["5"]);
    assert_output("println(to_string(0 and 2))", &["0"]);
    assert_output("println(to_string(1 and 2))", &["2"]);
    assert_output("println(to_string(\"\" or \"fallback\"))", &["fallback"]);
}

#[test]
fn string_concatenation_coerces_either_side() {
    assert_output("println(\"a\" + 1)", &["a1"]);
    assert_output("println(1 + \"a\")", &["1a"]);
    assert_output("println(\"xs: \" + [1, 2])", &["xs: [1, 2]"]);
    assert_output("println(\"is: \" + nil)", &["is: nil"]);
}

#[test]
fn arithmetic_type_errors() {
    assert_error_contains("let x = \"a\" - 1", "must be numbers");
    assert_error_contains("let x = -\"a\"", "must be a number");
    assert_error_contains("let x = 1 < \"a\"", "both be numbers or both be strings");
}

#[test]
fn division_by_zero_is_error() {
    assert_error_contains("let x = 1 / 0", "Division by zero");
    assert_error_contains("let x = 1 % 0", "Division by zero");
}

#[test]
fn string_comparisons_are_lexicographic() {
    assert_output("println(to_string(\"abc\" < \"abd\"))", &["true"]);
    assert_output("println(to_string(\"b\" >= \"ba\"))", &["false"]);
}

#[test]
fn equality_is_value_identity() {
    assert_output("println(to_string(1 == 1.0))", &["true"]);
    assert_output("println(to_string(\"a\" == \"a\"))", &["true"]);
    assert_output("println(to_string(1 == \"1\"))", &["false"]);
    assert_output("println(to_string(nil == false))", &["false"]);
    // Arrays compare by reference, not contents.
    assert_output("println(to_string([1] == [1]))", &["false"]);
    assert_output("let a = [1]\nlet b = a\nprintln(to_string(a == b))", &["true"]);
}

#[test]
fn const_reassignment_fails() {
    assert_error_contains("const PI = 3.14\nPI = 2", "Cannot reassign constant");
}

#[test]
fn function_names_are_constants() {
    assert_error_contains("func f()\nend\nf = 1", "Cannot reassign constant 'f'");
}

#[test]
fn assignment_to_unbound_name_fails() {
    assert_error_contains("x = 1", "Undefined variable 'x'");
}

#[test]
fn undefined_variable_and_function() {
    assert_error_contains("println(to_string(x))", "Undefined variable 'x'");
    assert_error_contains("boom()", "Undefined function 'boom'");
    assert_error_contains("let x = 1\nx()", "'x' is not a function");
}

#[test]
fn recursion() {
    let source = r#"
func fac(n)
    if n <= 1 then
        return 1
    end
    return n * fac(n - 1)
end
println(to_string(fac(5)))
"#;
    assert_output(source, &["120"]);
}

#[test]
fn for_loop_with_continue() {
    let source = r#"
for i in range(5) do
    if i == 2 then continue end
    println(to_string(i))
end
"#;
    assert_output(source, &["0", "1", "3", "4"]);
}

#[test]
fn while_loop_with_break() {
    let source = r#"
let i = 0
while true do
    i = i + 1
    if i == 3 then break end
end
println(to_string(i))
"#;
    assert_output(source, &["3"]);
}

#[test]
fn for_loop_requires_array() {
    assert_error_contains("for x in 5 do\nend", "must be an array");
}

#[test]
fn loop_variable_does_not_alias_source_array() {
    let source = r#"
let xs = [1, 2, 3]
for x in xs do
    x = x * 10
end
println(to_string(xs))
"#;
    assert_output(source, &["[1, 2, 3]"]);
}

#[test]
fn closures_capture_by_reference() {
    let source = r#"
func make()
    let c = 0
    func inc()
        c = c + 1
        return c
    end
    return inc
end
let f = make()
println(to_string(f()))
println(to_string(f()))
"#;
    assert_output(source, &["1", "2"]);
}

#[test]
fn two_closures_share_one_environment() {
    let source = r#"
func make()
    let c = 0
    func inc()
        c = c + 1
        return c
    end
    func get()
        return c
    end
    return [inc, get]
end
let fns = make()
let inc = fns[0]
let get = fns[1]
inc()
inc()
println(to_string(get()))
"#;
    assert_output(source, &["2"]);
}

#[test]
fn call_binds_parameters_positionally() {
    let source = r#"
func second(a, b)
    return b
end
println(to_string(second(1)))
println(to_string(second(1, 2)))
println(to_string(second(1, 2, 3)))
"#;
    assert_output(source, &["nil", "2", "2"]);
}

#[test]
fn return_without_value_yields_nil() {
    let source = r#"
func f()
    return
end
println(to_string(f()))
"#;
    assert_output(source, &["nil"]);
}

#[test]
fn function_without_return_yields_nil() {
    assert_output("func f()\nend\nprintln(to_string(f()))", &["nil"]);
}

#[test]
fn arrays_alias() {
    let source = r#"
let a = [1, 2]
let b = a
b[0] = 9
push(a, 3)
println(to_string(a[0]))
println(to_string(len(b)))
println(to_string(pop(b)))
println(to_string(len(a)))
"#;
    assert_output(source, &["9", "3", "3", "2"]);
}

#[test]
fn index_reads_and_writes() {
    assert_output("let a = [1, 2, 3]\nprintln(to_string(a[2]))", &["3"]);
    assert_output("let g = [[1, 2], [3, 4]]\nprintln(to_string(g[1][0]))", &["3"]);
    assert_output("let a = [1]\na[0] = 5\nprintln(to_string(a[0]))", &["5"]);
    // Indices truncate toward zero.
    assert_output("let a = [1, 2, 3]\nprintln(to_string(a[1.9]))", &["2"]);
    assert_output("println(\"hello\"[1])", &["e"]);
}

#[test]
fn index_errors() {
    assert_error_contains("let a = [1]\nprintln(to_string(a[1]))", "out of bounds");
    assert_error_contains("let a = [1]\na[-1] = 0", "out of bounds");
    assert_error_contains("let a = [1]\nprintln(to_string(a[\"0\"]))", "Index must be a number");
    assert_error_contains("let x = 1\nx[0] = 2", "Cannot assign by index");
    assert_error_contains("let x = true\nprintln(to_string(x[0]))", "Cannot index");
}

#[test]
fn truthiness() {
    let source = r#"
func check(v)
    if v then
        return "truthy"
    end
    return "falsy"
end
println(check(nil))
println(check(false))
println(check(0))
println(check(""))
println(check([]))
println(check("0"))
println(check(0.5))
"#;
    assert_output(source,
                  &["falsy", "falsy", "falsy", "falsy", "truthy", "truthy", "truthy"]);
}

#[test]
fn try_catches_runtime_errors() {
    let source = r#"
try
    let x = 1 / 0
catch err
    println("caught: " + err)
end
"#;
    assert_output(source, &["caught: Division by zero"]);
}

#[test]
fn try_catches_builtin_errors() {
    let source = r#"
try
    pop([])
catch err
    println(err)
end
"#;
    assert_output(source, &["Cannot pop from an empty array"]);
}

#[test]
fn catch_sees_bare_message_without_location() {
    let source = r#"
try
    boom()
catch err
    println(err)
end
"#;
    let result = run(source);
    assert!(result.error.is_none());
    assert_eq!(result.output, vec!["Undefined function 'boom'"]);
}

#[test]
fn return_passes_through_try() {
    let source = r#"
func f()
    try
        return 7
    catch err
        return -1
    end
end
println(to_string(f()))
"#;
    assert_output(source, &["7"]);
}

#[test]
fn break_passes_through_try() {
    let source = r#"
while true do
    try
        break
    catch err
        println("caught")
    end
end
println("done")
"#;
    assert_output(source, &["done"]);
}

#[test]
fn evaluation_resumes_after_catch() {
    let source = r#"
let total = 0
for i in range(4) do
    try
        if i == 2 then
            boom()
        end
        total = total + i
    catch err
        total = total + 100
    end
end
println(to_string(total))
"#;
    assert_output(source, &["104"]);
}

#[test]
fn uncaught_error_reports_call_frames() {
    let source = r#"
func inner()
    return 1 / 0
end
func outer()
    return inner()
end
outer()
"#;
    let result = run(source);
    let error = result.error.expect("expected an error");
    assert!(error.starts_with("RuntimeError: Division by zero at test.lux:3:"),
            "got: {error}");
    assert!(error.contains("\n  at inner (test.lux:"), "got: {error}");
    assert!(error.contains("\n  at outer (test.lux:"), "got: {error}");
}

#[test]
fn frames_unwind_when_caught() {
    // After a catch, later errors must not drag stale frames along.
    let source = r#"
func faulty()
    boom()
end
try
    faulty()
catch err
    println("ok")
end
boom2()
"#;
    let result = run(source);
    assert_eq!(result.output, vec!["ok"]);
    let error = result.error.expect("expected an error");
    assert!(!error.contains("at faulty"), "got: {error}");
}

#[test]
fn step_budget_aborts_infinite_loop() {
    let result = run_with_limit("while true do\nend", 10_000);
    let error = result.error.expect("expected an error");
    assert!(error.contains("Execution limit exceeded"), "got: {error}");
}

#[test]
fn step_budget_spares_short_programs() {
    let source = r#"
let i = 0
while i < 10 do
    i = i + 1
end
println(to_string(i))
"#;
    let result = run_with_limit(source, 10_000);
    assert!(result.error.is_none());
    assert_eq!(result.output, vec!["10"]);
    assert!(result.steps > 0 && result.steps < 10_000);
}

#[test]
fn imports_need_a_loader() {
    assert_error_contains("import \"util\"", "Imports are not available");
}

#[test]
fn type_builtin() {
    let source = r#"
println(type(1))
println(type(1.5))
println(type("x"))
println(type(nil))
println(type(true))
println(type([]))
func f()
end
println(type(f))
println(type(println))
"#;
    assert_output(source,
                  &["int", "float", "string", "nil", "bool", "array", "function", "builtin"]);
}

#[test]
fn conversions() {
    assert_output("println(to_string(to_int(3.9)))", &["3"]);
    assert_output("println(to_string(to_int(-3.9)))", &["-3"]);
    assert_output("println(to_string(to_int(\"42\")))", &["42"]);
    assert_output("println(to_string(to_float(\"2.5\")))", &["2.5"]);
    assert_error_contains("to_int(\"abc\")", "Cannot convert 'abc' to int");
    assert_error_contains("to_int([])", "Cannot convert");
}

#[test]
fn function_values_render_with_their_name() {
    let source = r#"
func greet()
end
println(to_string(greet))
println(to_string(println))
"#;
    assert_output(source, &["<function greet>", "<builtin println>"]);
}

#[test]
fn wrong_builtin_arity_is_reported() {
    assert_error_contains("len()", "Wrong number of arguments for 'len'");
    assert_error_contains("push([1])", "Wrong number of arguments for 'push'");
}

#[test]
fn shadowing_in_child_scopes() {
    let source = r#"
let x = 1
if true then
    let x = 2
    println(to_string(x))
end
println(to_string(x))
"#;
    assert_output(source, &["2", "1"]);
}

#[test]
fn assignment_in_child_scope_mutates_outer_binding() {
    let source = r#"
let x = 1
if true then
    x = 2
end
println(to_string(x))
"#;
    assert_output(source, &["2"]);
}

#[test]
fn else_if_chains_pick_first_truthy_guard() {
    let source = r#"
func bucket(n)
    if n < 10 then
        return "small"
    else if n < 100 then
        return "medium"
    else
        return "large"
    end
end
println(bucket(5))
println(bucket(50))
println(bucket(500))
"#;
    assert_output(source, &["small", "medium", "large"]);
}

#[test]
fn print_extends_the_current_line() {
    assert_output("print(\"a\")\nprint(\"b\")\nprintln(\"\")\nprintln(\"next\")",
                  &["ab", "next"]);
}

#[test]
fn string_builtins() {
    assert_output("println(upper(\"abc\"))", &["ABC"]);
    assert_output("println(lower(\"AbC\"))", &["abc"]);
    assert_output("println(trim(\"  x  \"))", &["x"]);
    assert_output("println(to_string(split(\"a,b,c\", \",\")))", &["[a, b, c]"]);
    assert_output("println(join([1, 2, 3], \"-\"))", &["1-2-3"]);
    assert_output("println(to_string(contains(\"hello\", \"ell\")))", &["true"]);
    assert_output("println(to_string(contains([1, 2], 2)))", &["true"]);
    assert_output("println(to_string(contains([1, 2], 3)))", &["false"]);
}

#[test]
fn math_builtins() {
    assert_output("println(to_string(abs(-3)))", &["3"]);
    assert_output("println(to_string(floor(2.7)))", &["2"]);
    assert_output("println(to_string(ceil(2.1)))", &["3"]);
    assert_output("println(to_string(round(2.5)))", &["3"]);
    assert_output("println(to_string(sqrt(9)))", &["3"]);
    assert_output("println(to_string(min(2, 5)))", &["2"]);
    assert_output("println(to_string(max(2, 5)))", &["5"]);
    assert_output("println(to_string(clamp(7, 0, 5)))", &["5"]);
    assert_error_contains("sqrt(-1)", "square root of a negative number");
}

#[test]
fn range_builtin() {
    assert_output("println(to_string(range(3)))", &["[0, 1, 2]"]);
    assert_output("println(to_string(range(2, 5)))", &["[2, 3, 4]"]);
    assert_output("println(to_string(range(5, 0, -2)))", &["[5, 3, 1]"]);
    assert_output("println(to_string(range(0)))", &["[]"]);
    assert_error_contains("range(0, 5, 0)", "step must not be zero");
}

#[test]
fn steps_are_counted() {
    let result = run("let x = 1");
    assert!(result.error.is_none());
    // One statement entry plus one expression entry, at least.
    assert!(result.steps >= 2);
}
