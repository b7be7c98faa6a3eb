use cortex::{
    BlockStatus, CodeBlockRenderer, DocumentHost, ParsedBlock, TemplateError, apply_template_requests,
    markdown::find_code_blocks, parse_block, template_requests,
};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Template(TemplateError),
    /// `check` found invalid blocks; details were already printed.
    Invalid(usize),
    NoBlocks(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Template(err) => write!(f, "template error: {err}"),
            CliError::Invalid(count) => write!(f, "{count} invalid cortex block(s)"),
            CliError::NoBlocks(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<TemplateError> for CliError {
    fn from(value: TemplateError) -> Self {
        Self::Template(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Check,
    Template,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    json: bool,
    config: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "cortex-cli\n\
\n\
USAGE:\n\
  cortex-cli [render] [--json] [--config <path>] [--out <path>] [<path>|-]\n\
  cortex-cli check [--json] [--config <path>] [<path>|-]\n\
  cortex-cli template [--config <path>] <path>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a markdown document; with --json it is a single statblock JSON body.\n\
  - render prints one HTML container per cortex block to stdout by default.\n\
  - template rewrites every `{ \"template\": \"underworld\" }` block of <path> in place.\n\
  - --config merges a JSON object onto the defaults (fence, errorPrefix, dice sizes).\n\
  - Set CORTEX_LOG (e.g. CORTEX_LOG=debug) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "check" => args.command = Command::Check,
            "template" => args.command = Command::Template,
            "--json" => args.json = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Template)
        && (args.json || matches!(args.input.as_deref(), None | Some("-")))
    {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_renderer(config: Option<&str>) -> Result<CodeBlockRenderer, CliError> {
    let renderer = CodeBlockRenderer::new();
    let Some(path) = config else {
        return Ok(renderer);
    };
    let overrides: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    if !overrides.is_object() {
        return Err(CliError::Usage("--config must point to a JSON object"));
    }
    Ok(renderer.with_config_overrides(&overrides))
}

/// Documents on the local filesystem, addressed by path.
struct FsDocumentHost {
    root: PathBuf,
}

impl FsDocumentHost {
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl DocumentHost for FsDocumentHost {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn process(
        &mut self,
        path: &str,
        edit: &mut dyn FnMut(&str) -> Result<String, TemplateError>,
    ) -> Result<(), TemplateError> {
        let full = self.resolve(path);
        let current = std::fs::read_to_string(&full).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => TemplateError::FileNotFound {
                path: path.to_string(),
            },
            _ => TemplateError::Io(err),
        })?;
        let updated = edit(&current)?;
        std::fs::write(&full, updated)?;
        Ok(())
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let renderer = build_renderer(args.config.as_deref())?;

    match args.command {
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let html = if args.json {
                let mut html = renderer.render_html(&text);
                html.push('\n');
                html
            } else {
                let blocks = renderer.render_markdown(&text);
                if blocks.is_empty() {
                    return Err(CliError::NoBlocks("No cortex block found"));
                }
                let mut html = String::new();
                for block in blocks {
                    if let BlockStatus::TemplateRequested(kind) = block.status {
                        tracing::info!(
                            template = kind.name(),
                            line = block.section.line_start + 1,
                            "template request left as-is; run `cortex-cli template` to apply it"
                        );
                    }
                    html.push_str(&block.container.to_html());
                    html.push('\n');
                }
                html
            };
            write_text(&html, args.out.as_deref())
        }
        Command::Check => {
            let text = read_input(args.input.as_deref())?;
            let bodies: Vec<(usize, String)> = if args.json {
                vec![(1, text)]
            } else {
                find_code_blocks(&text, renderer.config.fence())
                    .into_iter()
                    .map(|block| (block.section.line_start + 1, block.body))
                    .collect()
            };
            if bodies.is_empty() {
                return Err(CliError::NoBlocks("No cortex block found"));
            }

            let source = args.input.as_deref().unwrap_or("-");
            let mut invalid = 0;
            for (line, body) in &bodies {
                match parse_block(body) {
                    Ok(ParsedBlock::StatBlock(block)) => println!("{source}:{line}: ok ({})", block.name),
                    Ok(ParsedBlock::Template(kind)) => {
                        println!("{source}:{line}: template request ({})", kind.name())
                    }
                    Err(err) => {
                        invalid += 1;
                        eprintln!("{source}:{line}: {err}");
                    }
                }
            }
            if invalid > 0 {
                return Err(CliError::Invalid(invalid));
            }
            Ok(())
        }
        Command::Template => {
            let Some(path) = args.input.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let text = std::fs::read_to_string(path)?;
            let requests = template_requests(path, &text, &renderer.config);
            if requests.is_empty() {
                return Err(CliError::NoBlocks("No cortex template request found"));
            }

            let mut host = FsDocumentHost {
                root: Path::new(".").to_path_buf(),
            };
            let written = apply_template_requests(&mut host, &requests, &renderer.config)?;
            eprintln!("wrote {written} template(s) to {path}");
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CORTEX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err @ CliError::NoBlocks(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
