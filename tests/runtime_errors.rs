mod utils;

use expect_test::expect;

#[test]
fn division_by_zero() {
    utils::check(
        "PUSH 1\nPUSH 0\nDIV\nHALT",
        expect!["Runtime Error: division by zero"],
    );
}

#[test]
fn stack_underflow() {
    utils::check("POP\nHALT", expect!["Runtime Error: operand stack underflow"]);
    utils::check("ADD\nHALT", expect!["Runtime Error: operand stack underflow"]);
}

#[test]
fn store_out_of_bounds() {
    utils::check(
        "PUSH 1\nSTORE 1024\nHALT",
        expect!["Runtime Error: memory store index 1024 is out of bounds"],
    );
}

#[test]
fn load_out_of_bounds() {
    utils::check(
        "LOAD 4096\nHALT",
        expect!["Runtime Error: memory load index 4096 is out of bounds"],
    );
}

#[test]
fn jump_past_the_end() {
    utils::check(
        "JMP 99\nHALT",
        expect!["Runtime Error: invalid jump target 99"],
    );
}

#[test]
fn call_past_the_end() {
    utils::check(
        "CALL 99\nHALT",
        expect!["Runtime Error: invalid jump target 99"],
    );
}

#[test]
fn return_without_call() {
    utils::check("RET", expect!["Runtime Error: return without a matching call"]);
}

#[test]
fn output_before_a_trap_is_kept() {
    utils::check(
        "PUSH 3\nPRINT\nPUSH 1\nPUSH 0\nDIV\nHALT",
        expect![
            "\
VM PRINT: 3
Runtime Error: division by zero"
        ],
    );
}
