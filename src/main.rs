use std::{
    fs::read_to_string,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::Parser;
use monkey::{
    errors::errors::{Error, ErrorImpl},
    format_error,
    lexer::{lexer::Lexer, tokens::TokenKind},
    Position,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Print the token stream of a source file.
#[derive(Parser, Debug)]
#[command(name = "monkey", version, about)]
struct Cli {
    /// Source file to scan; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Stop at the first illegal character
    #[arg(long)]
    check: bool,

    /// Print the byte span of each token
    #[arg(long)]
    spans: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let (source, file_name) = match read_source(cli.file.as_ref(), io::stdin()) {
        Ok(read) => read,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, source, file_name, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(status) => ExitCode::from(status),
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

/// Scans `source`, writing tokens to `out` and diagnostics to `err`.
/// Returns the process exit status: 1 if any illegal character was found.
fn run(
    cli: &Cli,
    source: String,
    file_name: String,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    let start = Instant::now();
    let lexer = Lexer::new(source.clone(), Some(file_name));
    let mut illegal = vec![];

    for token in lexer {
        if token.kind == TokenKind::Illegal {
            let error = Error::illegal_character(&token);
            if cli.check {
                report(&error, &source, err)?;
                return Ok(1);
            }
            illegal.push(error);
        }

        if cli.spans {
            writeln!(out, "{:>5}..{:<5} {}", token.span.start.0, token.span.end.0, token.describe())?;
        } else {
            writeln!(out, "{}", token.describe())?;
        }
    }

    info!("Tokenized in {:?}", start.elapsed());

    if illegal.is_empty() {
        return Ok(0);
    }

    debug!(count = illegal.len(), "illegal characters found");
    for error in &illegal {
        report(error, &source, err)?;
    }
    Ok(1)
}

fn report(error: &Error, source: &str, err: &mut impl Write) -> io::Result<()> {
    match format_error(error, source) {
        Ok(rendered) => write!(err, "{}", rendered),
        Err(_) => writeln!(err, "Error: {}", error),
    }
}

fn read_source(file: Option<&PathBuf>, mut stdin: impl Read) -> Result<(String, String), Error> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let name = path.to_string_lossy().to_string();
            let source = read_to_string(path).map_err(|err| unreadable(&name, err))?;
            debug!(file = %name, bytes = source.len(), "read source");
            Ok((source, name))
        }
        _ => {
            let mut source = String::new();
            stdin
                .read_to_string(&mut source)
                .map_err(|err| unreadable("<stdin>", err))?;
            Ok((source, String::from("shell")))
        }
    }
}

fn unreadable(path: &str, err: io::Error) -> Error {
    Error::new(
        ErrorImpl::SourceUnreadable {
            path: path.to_string(),
            reason: err.to_string(),
        },
        Position(0, Rc::new(path.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{read_source, run, Cli};

    fn run_with(args: &[&str], source: &str) -> (u8, String, String) {
        let cli = Cli::parse_from(args);
        let mut out = vec![];
        let mut err = vec![];
        let status = run(&cli, source.to_string(), "main.mk".to_string(), &mut out, &mut err).unwrap();

        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_run_prints_tokens() {
        let (status, out, err) = run_with(&["monkey"], "let five = 5;");

        assert_eq!(status, 0);
        assert_eq!(
            out,
            "Let ()\nIdentifier (five)\nAssign ()\nIntegerLiteral (5)\nSemicolon ()\nEndOfInput ()\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_prints_spans() {
        let (status, out, _) = run_with(&["monkey", "--spans"], "x == 10");

        assert_eq!(status, 0);
        assert_eq!(
            out,
            "    0..1     Identifier (x)\n    2..4     Equal ()\n    5..7     IntegerLiteral (10)\n    7..7     EndOfInput ()\n"
        );
    }

    #[test]
    fn test_run_check_stops_at_first_illegal_character() {
        let (status, out, err) = run_with(&["monkey", "--check"], "a @ b #");

        assert_eq!(status, 1);
        assert_eq!(out, "Identifier (a)\n");
        assert_eq!(
            err,
            "Error: IllegalCharacter (Character `@` is not part of the language)\n\
             -> main.mk\n  |\n1 | a @ b #\n  | --^\n"
        );
    }

    #[test]
    fn test_run_reports_every_illegal_character_at_the_end() {
        let (status, out, err) = run_with(&["monkey"], "a @ b #");

        assert_eq!(status, 1);
        assert_eq!(
            out,
            "Identifier (a)\nIllegal (@)\nIdentifier (b)\nIllegal (#)\nEndOfInput ()\n"
        );
        assert_eq!(err.matches("Error: IllegalCharacter").count(), 2);
        assert!(err.ends_with("1 | a @ b #\n  | ------^\n"));
    }

    #[test]
    fn test_read_source_from_stdin() {
        let stdin = "let x = 1;".as_bytes();
        let (source, name) = read_source(None, stdin).unwrap();
        assert_eq!(source, "let x = 1;");
        assert_eq!(name, "shell");

        let dash = PathBuf::from("-");
        let (source, name) = read_source(Some(&dash), "fn".as_bytes()).unwrap();
        assert_eq!(source, "fn");
        assert_eq!(name, "shell");
    }

    #[test]
    fn test_read_source_missing_file() {
        let path = PathBuf::from("does/not/exist.mk");
        let error = read_source(Some(&path), "".as_bytes()).unwrap_err();

        assert_eq!(error.get_error_name(), "SourceUnreadable");
    }
}
