//! CLI command implementations.

use std::fs;
use std::io::{self, Read, Write};

use tracing::debug;
use wspace_common::Program;
use wspace_vm::{Config, Machine};

/// Where `run` takes its input sequence from.
#[derive(Debug, PartialEq, Eq)]
enum InputSource {
    None,
    File(String),
    Stdin,
}

/// Parsed arguments of the `run` command.
#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    program: String,
    input: InputSource,
    max_steps: Option<u64>,
}

/// Decode, discover labels, and execute a whitespace program.
pub fn run(args: &[String]) -> Result<(), i32> {
    let opts = parse_run_args(args)?;
    let program = read_program(&opts.program)?;
    let input = read_input(&opts.input)?;

    let mut config = Config::default();
    if let Some(limit) = opts.max_steps {
        config = config.with_step_limit(limit);
    }

    let mut vm = Machine::new(&program, &input).with_config(config);

    // Problems in the program text itself surface here, before any output.
    if let Err(e) = vm.discover() {
        eprintln!("error: {e}");
        return Err(2);
    }

    let result = vm.execute();
    debug!(steps = vm.steps(), "run finished");

    // Output produced before a runtime error is still delivered.
    let written = write_output(&mut io::stdout().lock(), vm.output());

    result.map_err(|e| {
        eprintln!("runtime error: {e}");
        3
    })?;
    written
}

/// Decode a program and collect its labels without executing it.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: wspace check <prog.ws>");
        return Err(1);
    }

    let input = &args[0];
    let program = read_program(input)?;
    let mut vm = Machine::new(&program, "");

    match vm.discover() {
        Ok(()) => {
            println!("OK: {input} ({} labels)", vm.labels().len());
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(2)
        }
    }
}

/// Assemble a .wsa mnemonic file to a .ws program.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires an input file");
        eprintln!("Usage: wspace assemble <input.wsa> [-o output.ws]");
        return Err(1);
    }

    let input = &args[0];
    let output = output_path(input, &args[1..], ".wsa");

    let text = read_text(input)?;
    let program = wspace_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    write_program(&program, &output)
}

/// Disassemble a .ws program to mnemonic text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: wspace disassemble <prog.ws>");
        return Err(1);
    }

    let program = read_program(&args[0])?;
    let text = wspace_assembler::disassemble(&program).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;
    write_output(&mut io::stdout().lock(), &text)
}

/// Convert S/T/N letter notation to a .ws program.
pub fn stn(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: stn requires an input file");
        eprintln!("Usage: wspace stn <input.stn> [-o output.ws]");
        return Err(1);
    }

    let input = &args[0];
    let output = output_path(input, &args[1..], ".stn");
    let program = wspace_assembler::from_stn(&read_text(input)?);

    write_program(&program, &output)
}

// --- Helpers ---

fn parse_run_args(args: &[String]) -> Result<RunArgs, i32> {
    let mut program = None;
    let mut input = InputSource::None;
    let mut max_steps = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--input" => {
                let path = iter.next().ok_or_else(|| {
                    eprintln!("error: --input requires a file");
                    1
                })?;
                input = InputSource::File(path.clone());
            }
            "--stdin" => input = InputSource::Stdin,
            "--max-steps" => {
                let value = iter.next().ok_or_else(|| {
                    eprintln!("error: --max-steps requires a value");
                    1
                })?;
                let limit = value.parse::<u64>().map_err(|_| {
                    eprintln!("error: invalid --max-steps value '{value}'");
                    1
                })?;
                max_steps = Some(limit);
            }
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                return Err(1);
            }
            path if program.is_none() => program = Some(path.to_string()),
            extra => {
                eprintln!("error: unexpected argument '{extra}'");
                return Err(1);
            }
        }
    }

    let program = program.ok_or_else(|| {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: wspace run <prog.ws> [--input FILE | --stdin] [--max-steps N]");
        1
    })?;

    Ok(RunArgs {
        program,
        input,
        max_steps,
    })
}

/// The `-o` value if given, otherwise `input` with `ext` swapped for `.ws`.
fn output_path(input: &str, rest: &[String], ext: &str) -> String {
    if rest.len() >= 2 && rest[0] == "-o" {
        rest[1].clone()
    } else if let Some(stem) = input.strip_suffix(ext) {
        format!("{stem}.ws")
    } else {
        format!("{input}.ws")
    }
}

fn read_text(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}

/// Read and sanitize a program file. Bytes that are not valid UTF-8 are
/// commentary like any other non-whitespace character.
fn read_program(path: &str) -> Result<Program, i32> {
    let bytes = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;
    Ok(Program::sanitize(&String::from_utf8_lossy(&bytes)))
}

fn read_input(source: &InputSource) -> Result<String, i32> {
    match source {
        InputSource::None => Ok(String::new()),
        InputSource::File(path) => read_text(path),
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("error: cannot read stdin: {e}");
                1
            })?;
            Ok(text)
        }
    }
}

/// Write `text` to `out` and flush it.
fn write_output(out: &mut impl Write, text: &str) -> Result<(), i32> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| {
            eprintln!("error: cannot write output: {e}");
            1
        })
}

fn write_program(program: &Program, output: &str) -> Result<(), i32> {
    fs::write(output, program.to_source()).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;
    eprintln!("wrote {} symbols -> {output}", program.len());
    Ok(())
}
