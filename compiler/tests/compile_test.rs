use std::collections::HashSet;

use indoc::indoc;
use jack_compiler::{compile_source, error::CompileError};

fn lines(vm: &str) -> Vec<&str> {
    vm.lines().collect()
}

#[test]
fn minimal_main() {
    let vm = compile_source("class Main { function void main() { return; } }").unwrap();
    assert_eq!(vm, "function Main.main 0\npush constant 0\nreturn\n");
}

#[test]
fn field_access_in_method() {
    let vm = compile_source("class P { field int x; method int getX() { return x; } }").unwrap();
    assert_eq!(
        lines(&vm),
        vec![
            "function P.getX 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "return",
        ]
    );
}

#[test]
fn discarded_call_result() {
    let vm = compile_source(indoc! {"
        class Main {
            function void main() {
                do Output.printInt(5 + 3);
                return;
            }
        }
    "})
    .unwrap();
    assert_eq!(
        &lines(&vm)[1..6],
        [
            "push constant 5",
            "push constant 3",
            "add",
            "call Output.printInt 1",
            "pop temp 0",
        ]
    );
}

#[test]
fn undefined_identifier_produces_nothing() {
    let result = compile_source(indoc! {"
        class Main {
            function int main() {
                var int a;
                let a = 1;
                return b;
            }
        }
    "});
    assert_eq!(
        result,
        Err(CompileError::UndefinedIdentifier {
            name: "b".to_string()
        })
    );
}

#[test]
fn array_store_and_load() {
    let vm = compile_source(indoc! {"
        class Main {
            function int main() {
                var int n;
                var Array arr;
                let arr[2] = 9;
                return arr[n];
            }
        }
    "})
    .unwrap();
    assert_eq!(
        &lines(&vm)[1..],
        [
            "push local 1",
            "push constant 2",
            "add",
            "push constant 9",
            "pop temp 0",
            "pop pointer 1",
            "push temp 0",
            "pop that 0",
            "push local 1",
            "push local 0",
            "add",
            "pop pointer 1",
            "push that 0",
            "return",
        ]
    );
}

#[test]
fn booleans_and_arithmetic_calls() {
    let vm = compile_source(indoc! {"
        class Main {
            function boolean main() {
                var int x;
                let x = (2 * 3) / x;
                if (~(x = 0)) {
                    return true;
                }
                return false & null;
            }
        }
    "})
    .unwrap();
    let vm = lines(&vm);
    assert!(!vm.iter().any(|l| *l == "mul" || *l == "div"));
    assert_eq!(
        &vm[1..7],
        [
            "push constant 2",
            "push constant 3",
            "call Math.multiply 2",
            "push local 0",
            "call Math.divide 2",
            "pop local 0",
        ]
    );
    assert_eq!(
        &vm[vm.len() - 10..],
        [
            "push constant 0",
            "not",
            "return",
            "goto Main.IF_END$0",
            "label Main.IF_FALSE$0",
            "label Main.IF_END$0",
            "push constant 0",
            "push constant 0",
            "and",
            "return",
        ]
    );
}

#[test]
fn operators_apply_left_to_right() {
    let vm = compile_source("class A { function int f() { return 1 + 2 * 3; } }").unwrap();
    assert_eq!(
        &lines(&vm)[1..],
        [
            "push constant 1",
            "push constant 2",
            "add",
            "push constant 3",
            "call Math.multiply 2",
            "return",
        ]
    );
}

#[test]
fn labels_are_unique_within_a_class() {
    let vm = compile_source(indoc! {"
        class Loops {
            function void a() {
                var int i;
                while (i < 10) {
                    if (i = 5) { let i = i + 2; } else { let i = i + 1; }
                    while (false) { }
                }
                return;
            }

            method void b() {
                if (true) { if (false) { } }
                return;
            }
        }
    "})
    .unwrap();
    let labels: Vec<_> = vm.lines().filter(|l| l.starts_with("label ")).collect();
    let unique: HashSet<_> = labels.iter().collect();
    assert_eq!(labels.len(), 10);
    assert_eq!(unique.len(), labels.len());
}

#[test]
fn constructor_and_method_calls() {
    let vm = compile_source(indoc! {r#"
        class Square {
            field int x, y, size;
            static String name;

            constructor Square new(int ax, int ay) {
                let x = ax;
                let y = ay;
                let name = "sq";
                do draw();
                return this;
            }

            method void draw() {
                do Screen.drawRectangle(x, y, x + size, y + size);
                return;
            }
        }
    "#})
    .unwrap();
    let vm = lines(&vm);
    assert_eq!(
        &vm[..12],
        [
            "function Square.new 0",
            "push constant 3",
            "call Memory.alloc 1",
            "pop pointer 0",
            "push argument 0",
            "pop this 0",
            "push argument 1",
            "pop this 1",
            "push constant 2",
            "call String.new 1",
            "push constant 115",
            "call String.appendChar 2",
        ]
    );
    assert_eq!(
        &vm[14..20],
        [
            "pop static 0",
            "push pointer 0",
            "call Square.draw 1",
            "pop temp 0",
            "push pointer 0",
            "return",
        ]
    );
    assert_eq!(&vm[20..23], ["function Square.draw 0", "push argument 0", "pop pointer 0"]);
    assert!(vm.contains(&"call Screen.drawRectangle 4"));
}

#[test]
fn syntax_errors_name_line_and_construct() {
    let err = compile_source(indoc! {"
        class Main {
            function void main() {
                let x = ;
            }
        }
    "})
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 3: syntax error in term: expected a term, found symbol ';'"
    );
}

#[test]
fn non_ascii_string_characters_are_rejected() {
    let result = compile_source(
        "class M { function void f() { do Output.printString(\"\u{e9}\u{1F600}\"); return; } }",
    );
    assert!(matches!(result, Err(CompileError::Lex { line: 1, .. })));
}
