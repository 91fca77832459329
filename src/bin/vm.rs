use clap::Parser;
use stackvm::{disassemble, BytecodeReader, RunConfig, Vm};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Executes a stack-machine bytecode file.
#[derive(Parser)]
struct Cli {
    /// Bytecode file produced by svasm.
    file_path: PathBuf,
    /// Run the program this many times and report timings.
    iterations: Option<NonZeroU32>,
    /// Dump the bytecode and trace each executed instruction.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let code = match std::fs::read(&args.file_path) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.file_path.display());
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig {
        dump_bytecode: args.debug,
        trace_execution: args.debug,
    };
    if config.dump_bytecode {
        println!("=== BYTECODE ===");
        println!("{}", disassemble(BytecodeReader::new(&code)));
        println!("================");
    }

    let mut vm = Vm::new(&code, config);
    match args.iterations {
        Some(iterations) => {
            let start = Instant::now();
            for _ in 0..iterations.get() {
                vm.reset();
                if let Err(trap) = vm.run() {
                    eprintln!("Runtime Error: {trap}");
                    return ExitCode::FAILURE;
                }
            }
            let total = start.elapsed();
            println!(
                "{iterations} iterations in {total:?} ({:?} per iteration)",
                total / iterations.get()
            );
        }
        None => {
            if let Err(trap) = vm.run() {
                eprintln!("Runtime Error: {trap}");
                return ExitCode::FAILURE;
            }
            if let Some(result) = vm.top() {
                println!("Final Result: {result}");
            }
        }
    }
    ExitCode::SUCCESS
}
