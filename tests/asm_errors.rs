use expect_test::{expect, Expect};
use stackvm::{asm, Process};

fn check(source: &str, expect: Expect) {
    let process = Process::new("main.svasm", source);
    let errors = match asm::assemble(&process) {
        Ok(_) => panic!("assembly unexpectedly succeeded"),
        Err(errors) => errors,
    };
    expect.assert_debug_eq(&errors);
}

#[test]
fn unknown_mnemonic_names_the_line() {
    check(
        "HALT\nNOPE\nHALT",
        expect![[r#"
            [
                UnknownMnemonic {
                    range: 5..9,
                },
            ]
        "#]],
    );
}

#[test]
fn duplicate_label_reports_both_sites() {
    check(
        "START:\nHALT\nSTART:\nHALT",
        expect![[r#"
            [
                DuplicateLabel {
                    original: 0..5,
                    redefined: 12..17,
                },
            ]
        "#]],
    );
}

#[test]
fn undefined_symbol_that_is_not_an_integer() {
    check(
        "CALL MISSING\nHALT",
        expect![[r#"
            [
                UnresolvedOperand {
                    range: 5..12,
                },
            ]
        "#]],
    );
}

#[test]
fn multiple_errors_in_one_assembly() {
    check(
        "NOPE\nJMP NOWHERE\nL:\nL:\nHALT",
        expect![[r#"
            [
                DuplicateLabel {
                    original: 17..18,
                    redefined: 20..21,
                },
                UnknownMnemonic {
                    range: 0..4,
                },
                UnresolvedOperand {
                    range: 9..16,
                },
            ]
        "#]],
    );
}
