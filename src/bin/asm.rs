use clap::Parser;
use stackvm::{disassemble, BytecodeReader, Process};
use std::path::PathBuf;
use std::process::ExitCode;

/// Assembles stack-machine assembly into a bytecode file.
#[derive(Parser)]
struct Cli {
    /// Assembly source file.
    input: PathBuf,
    /// Output bytecode file.
    #[arg(default_value = "program.bin")]
    output: PathBuf,
    /// Print a disassembly of the emitted bytecode.
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.input.display());
            return ExitCode::FAILURE;
        }
    };

    let name = args.input.display().to_string();
    let process = Process::new(&name, &source);
    let assembled = match stackvm::assemble(&process) {
        Ok(assembled) => assembled,
        Err(diagnostics) => {
            process.emit(&diagnostics);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = std::fs::write(&args.output, &assembled.code) {
        eprintln!("error: cannot write {}: {err}", args.output.display());
        return ExitCode::FAILURE;
    }

    if args.dump {
        println!("{}", disassemble(BytecodeReader::new(&assembled.code)));
    }

    let labels: Vec<&str> = assembled
        .labels
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    println!("Assembled successfully. Labels found: {}", labels.join(" "));
    ExitCode::SUCCESS
}
