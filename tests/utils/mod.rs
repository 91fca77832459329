use expect_test::Expect;
use stackvm::{Process, RunConfig, Vm};

pub fn check(source: &str, expected: Expect) {
    expected.assert_eq(&run_to_string(source));
}

/// Assembles and runs `source`, returning everything the program printed
/// followed by the final top-of-stack (or the trap that stopped it).
pub fn run_to_string(source: &str) -> String {
    let process = Process::new("main.svasm", source);
    let assembled = match stackvm::assemble(&process) {
        Ok(assembled) => assembled,
        Err(diagnostics) => panic!("assembly failed: {}", render(&process, &diagnostics)),
    };

    let mut printed = Vec::<u8>::new();
    let mut vm = Vm::with_output(&assembled.code, RunConfig::default(), &mut printed);
    let outcome = vm.run();
    let result = vm.result();
    drop(vm);

    let printed = String::from_utf8(printed).unwrap();
    match outcome {
        Ok(()) => format!("{printed}{result}"),
        Err(trap) => format!("{printed}Runtime Error: {trap}"),
    }
}

fn render(process: &Process<'_>, diagnostics: &[stackvm::Diagnostic]) -> String {
    let mut buf = Vec::<u8>::new();
    let mut writer = codespan_reporting::term::termcolor::NoColor::new(&mut buf);
    let config = codespan_reporting::term::Config::default();
    for diagnostic in diagnostics {
        codespan_reporting::term::emit(&mut writer, &config, process.file(), diagnostic).unwrap();
    }
    String::from_utf8(buf).unwrap()
}
