//! sidepy - run short Python scripts against numeric inputs
//!
//! Highlights scripts with bracket-depth coloring and runs them with
//! bound variables (x, y, z, a, b, ...).

mod config;
mod error;
mod exec;
mod render;
mod session;
mod syntax;
mod variables;
mod workbench;

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Result, SidepyError};
use exec::PythonExecutor;
use render::Renderer;
use session::{print_output, print_script, Session};
use syntax::{Highlighter, HighlightConfig};
use workbench::Workbench;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

/// Parsed command line
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Highlight {
        path: String,
        line_numbers: bool,
        color: bool,
    },
    Spans {
        path: String,
    },
    Run {
        path: String,
        values: Vec<String>,
    },
    Example,
    Edit {
        path: Option<String>,
    },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };

    let rest = &args[1..];
    match first.as_str() {
        "--help" | "-h" | "help" => Ok(Command::Help),
        "--version" | "-V" => Ok(Command::Version),
        "highlight" => {
            let mut line_numbers = false;
            let mut color = true;
            let mut path = None;
            for arg in rest {
                match arg.as_str() {
                    "-n" | "--line-numbers" => line_numbers = true,
                    "--no-color" => color = false,
                    "-" => path = Some(arg.clone()),
                    flag if flag.starts_with('-') => {
                        return Err(SidepyError::Usage(format!("unknown option '{}'", flag)))
                    }
                    _ if path.is_some() => {
                        return Err(SidepyError::Usage("highlight takes one FILE".into()))
                    }
                    _ => path = Some(arg.clone()),
                }
            }
            let path = path.ok_or_else(|| SidepyError::Usage("highlight needs a FILE".into()))?;
            Ok(Command::Highlight {
                path,
                line_numbers,
                color,
            })
        }
        "spans" => match rest {
            [path] => Ok(Command::Spans { path: path.clone() }),
            _ => Err(SidepyError::Usage("spans needs exactly one FILE".into())),
        },
        "run" => match rest {
            [path, values @ ..] => Ok(Command::Run {
                path: path.clone(),
                values: values.to_vec(),
            }),
            [] => Err(SidepyError::Usage("run needs a FILE".into())),
        },
        "example" => Ok(Command::Example),
        "edit" => match rest {
            [] => Ok(Command::Edit { path: None }),
            [path] => Ok(Command::Edit {
                path: Some(path.clone()),
            }),
            _ => Err(SidepyError::Usage("edit takes at most one FILE".into())),
        },
        other => Err(SidepyError::Usage(format!(
            "unknown command '{}' (try --help)",
            other
        ))),
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args)?;
    debug!(?command, "parsed arguments");

    match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Version => {
            println!("sidepy {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Highlight {
            path,
            line_numbers,
            color,
        } => {
            let config = Config::load()?;
            let source = read_source(&path)?;
            let stdout = io::stdout();
            let renderer = Renderer {
                color: color && stdout.is_terminal(),
                show_line_numbers: line_numbers || config.show_line_numbers,
                max_width: terminal_width(),
            };
            let mut bench = new_workbench(&config);
            bench.set_code(&source);
            print_script(&mut bench, &renderer, &mut stdout.lock())
        }
        Command::Spans { path } => {
            let config = Config::load()?;
            let source = read_source(&path)?;
            let highlighter = highlighter_for(&config);
            print_spans(&highlighter, &source, &mut io::stdout().lock())
        }
        Command::Run { path, values } => {
            let config = Config::load()?;
            let source = read_source(&path)?;
            let mut bench = new_workbench(&config);
            bench.set_code(&source);
            bench.variables_mut().fill(&values)?;
            run_and_report(&mut bench)
        }
        Command::Example => {
            let config = Config::load()?;
            let mut bench = example_workbench(&config);
            let stdout = io::stdout();
            let renderer = Renderer {
                color: stdout.is_terminal(),
                show_line_numbers: true,
                max_width: terminal_width(),
            };
            let bindings: Vec<String> = bench
                .variables()
                .iter()
                .map(|v| format!("{}={}", v.name, v.text))
                .collect();
            {
                let mut out = stdout.lock();
                print_script(&mut bench, &renderer, &mut out)?;
                writeln!(out, "--- {}", bindings.join(" "))?;
            }
            run_and_report(&mut bench)
        }
        Command::Edit { path } => {
            let config = Config::load()?;
            let bench = match path {
                Some(path) => {
                    let mut bench = new_workbench(&config);
                    bench.set_code(&fs::read_to_string(path)?);
                    bench
                }
                None => example_workbench(&config),
            };
            let stdin = io::stdin();
            let stdout = io::stdout();
            let renderer = Renderer {
                color: stdout.is_terminal(),
                show_line_numbers: true,
                max_width: terminal_width(),
            };
            let prompt = stdin.is_terminal();
            Session::new(bench, renderer).run(stdin.lock(), &mut stdout.lock(), prompt)
        }
    }
}

fn highlighter_for(config: &Config) -> Highlighter {
    Highlighter::new(&HighlightConfig::default().with_palette(config.bracket_palette.clone()))
}

fn executor_for(config: &Config) -> Box<PythonExecutor> {
    let executor = PythonExecutor::new(config.interpreter.clone());
    debug!(interpreter = executor.interpreter(), "using interpreter");
    Box::new(executor)
}

fn new_workbench(config: &Config) -> Workbench {
    Workbench::new(highlighter_for(config), executor_for(config))
}

fn example_workbench(config: &Config) -> Workbench {
    Workbench::with_example(highlighter_for(config), executor_for(config))
}

/// Read a script from a file, or stdin for `-`
fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn terminal_width() -> Option<usize> {
    if !io::stdout().is_terminal() {
        return None;
    }
    crossterm::terminal::size().ok().map(|(cols, _)| cols as usize)
}

/// One line per span: `line:start..end Kind #rrggbb [bold]`
fn print_spans<W: Write>(highlighter: &Highlighter, source: &str, out: &mut W) -> Result<()> {
    for (idx, text) in source.lines().enumerate() {
        for m in highlighter.classify(text) {
            let style = m.token_type.default_style();
            writeln!(
                out,
                "{}:{}..{} {} {}{}",
                idx + 1,
                m.start,
                m.end,
                m.token_type.name(),
                style.fg.map(|c| c.to_hex()).unwrap_or_default(),
                if style.bold { " bold" } else { "" }
            )?;
        }
        for bracket in highlighter.color_brackets(text) {
            writeln!(
                out,
                "{}:{}..{} Bracket depth={} {} bold",
                idx + 1,
                bracket.pos,
                bracket.pos + 1,
                bracket.depth,
                bracket.style.fg.map(|c| c.to_hex()).unwrap_or_default()
            )?;
        }
    }
    Ok(())
}

/// Run the workbench script and print its output log
fn run_and_report(bench: &mut Workbench) -> Result<()> {
    // On failure main reports the error
    bench.run()?;
    print_output(bench, &mut io::stdout().lock())
}

fn print_usage() {
    println!("sidepy {} - run short Python scripts against numeric inputs", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage:");
    println!("  sidepy highlight [-n] [--no-color] FILE   Print FILE with syntax highlighting");
    println!("  sidepy spans FILE                         Print style spans per line");
    println!("  sidepy run FILE [VALUE...]                Run FILE with VALUEs bound to x, y, z, a, ...");
    println!("  sidepy example                            Show and run the built-in example");
    println!("  sidepy edit [FILE]                        Edit and run a script interactively");
    println!();
    println!("FILE may be '-' to read standard input. Blank values bind 0.0.");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Settings are read from ~/.sidepy.toml. Set RUST_LOG=debug for diagnostics.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Help);
        assert_eq!(parse_args(&args(&["-V"])).unwrap(), Command::Version);
        assert_eq!(
            parse_args(&args(&["highlight", "-n", "a.py"])).unwrap(),
            Command::Highlight {
                path: "a.py".into(),
                line_numbers: true,
                color: true
            }
        );
        assert_eq!(
            parse_args(&args(&["run", "a.py", "5", "", "2.5"])).unwrap(),
            Command::Run {
                path: "a.py".into(),
                values: args(&["5", "", "2.5"])
            }
        );
        assert_eq!(
            parse_args(&args(&["spans", "-"])).unwrap(),
            Command::Spans { path: "-".into() }
        );
        assert_eq!(parse_args(&args(&["example"])).unwrap(), Command::Example);
        assert_eq!(
            parse_args(&args(&["edit"])).unwrap(),
            Command::Edit { path: None }
        );
        assert_eq!(
            parse_args(&args(&["edit", "a.py"])).unwrap(),
            Command::Edit {
                path: Some("a.py".into())
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["highlight"])).is_err());
        assert!(parse_args(&args(&["highlight", "--bogus", "a.py"])).is_err());
        assert!(parse_args(&args(&["highlight", "a.py", "b.py"])).is_err());
        assert!(parse_args(&args(&["spans"])).is_err());
        assert!(parse_args(&args(&["run"])).is_err());
        assert!(parse_args(&args(&["edit", "a.py", "b.py"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn test_print_spans() {
        let mut out = Vec::new();
        print_spans(&Highlighter::default(), "if (1):\n  pass", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1:0..2 Keyword #569cd6 bold");
        assert_eq!(lines[1], "1:4..5 Number #b5cea8");
        assert_eq!(lines[2], "1:3..4 Bracket depth=0 #ffd700 bold");
        assert_eq!(lines[3], "1:5..6 Bracket depth=0 #ffd700 bold");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_print_script_plain() {
        let mut bench = Workbench::new(
            Highlighter::default(),
            Box::new(PythonExecutor::default()),
        );
        bench.set_code("x = (1)\nprint(x)");
        let renderer = Renderer {
            color: false,
            show_line_numbers: true,
            max_width: None,
        };
        let mut out = Vec::new();
        print_script(&mut bench, &renderer, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  1 x = (1)\n  2 print(x)\n");
    }
}
