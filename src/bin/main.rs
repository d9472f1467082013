use clap::Parser;
use lox_front::{printer, Diagnostics, Reporter};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "lox-front", version, about = "Scan and parse Lox expressions")]
struct Cli {
    /// Script to read. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Print the token stream instead of the expression tree.
    #[arg(long)]
    tokens: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut lox = Lox::new(io::stdout(), io::stderr(), cli.tokens);
    match cli.script {
        Some(path) => {
            if !run_file(&path, &mut lox)? {
                process::exit(65);
            }
        },
        None => run_prompt(&mut lox)?,
    }

    Ok(())
}

/// Returns whether the file scanned and parsed cleanly.
fn run_file<Out: Write, ErrOut: Write>(path: &Path, lox: &mut Lox<Out, ErrOut>) -> io::Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    lox.run(contents.as_str())?;
    Ok(!lox.diagnostics.has_error())
}

fn run_prompt<Out: Write, ErrOut: Write>(lox: &mut Lox<Out, ErrOut>) -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        write!(lox.out, "> ")?;
        lox.out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        lox.run(prompt_line(&buffer))?;
        lox.diagnostics.clear();
    }

    Ok(())
}

/// Drops the line terminator `read_line` keeps, so it isn't counted as a
/// second source line.
fn prompt_line(buffer: &str) -> &str {
    buffer.trim_end_matches(&['\r', '\n'][..])
}

struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
    diagnostics: Diagnostics,
    dump_tokens: bool,
}

impl <Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    fn new(out: Out, err_out: ErrOut, dump_tokens: bool) -> Self {
        Self {
            out,
            err_out,
            diagnostics: Diagnostics::new(),
            dump_tokens,
        }
    }

    fn run(&mut self, source: &str) -> io::Result<()> {
        let tokens = lox_front::scan(source, &mut self.diagnostics);
        if self.diagnostics.has_error() {
            return write!(self.err_out, "{}", self.diagnostics)
        }

        if self.dump_tokens {
            for t in tokens.iter() {
                writeln!(self.out, "{:>4} {:?} {}", t.line(), t.kind(), t)?;
            }
            return Ok(())
        }

        match lox_front::parse(tokens, &mut self.diagnostics) {
            Some(e) if !self.diagnostics.has_error() => writeln!(self.out, "{}", printer::print(&e)),
            _ => write!(self.err_out, "{}", self.diagnostics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (String, String) {
        let mut lox = Lox::new(Vec::new(), Vec::new(), false);
        lox.run(source).expect("writing to a Vec");
        (
            String::from_utf8_lossy(&lox.out).into_owned(),
            String::from_utf8_lossy(&lox.err_out).into_owned(),
        )
    }

    #[test]
    fn prompt_line_strips_line_terminators() {
        assert_eq!("(1", prompt_line("(1\n"));
        assert_eq!("(1", prompt_line("(1\r\n"));
        assert_eq!("1 + 2", prompt_line("1 + 2"));
    }

    #[test]
    fn prompt_errors_are_reported_on_the_first_line() {
        let (out, err) = run(prompt_line("(1\n"));
        assert_eq!("", out);
        assert_eq!("[line 1] Error at end: Expect ')' after expression.\n", err);
    }

    #[test]
    fn valid_input_prints_the_tree() {
        let (out, err) = run(prompt_line("1 + 2 * 3\n"));
        assert_eq!("(+ 1 (* 2 3))\n", out);
        assert_eq!("", err);
    }
}
