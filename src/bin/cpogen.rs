// This binary is the thin host around the cpogen library. It resolves the specification
// input (positional JSON argument, stdin, or a file with JSON/YAML auto-detected from the
// extension), maps the command line onto emit options, runs the pipeline, and writes the
// artifact to stdout or a file (optionally appending). Structured pipeline errors are
// printed to stderr and become exit code 1; the library itself never touches the
// filesystem. Logging is initialized here via env_logger, so RUST_LOG=debug traces the
// pipeline stages.

//! cpogen host binary.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use cpogen::{generate, EmitOptions, GenerateError, GenerateRequest, OPERATION_PATTERNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Auto,
    Json,
    Yaml,
}

/// Customization point source generator.
#[derive(Debug, Parser)]
#[command(name = "cpogen", version, about)]
struct Cli {
    /// A JSON string defining the dispatch point. If omitted, reads stdin.
    json_spec: Option<String>,

    /// Read the specification from a file instead.
    #[arg(long = "from", value_name = "FILE")]
    from_path: Option<PathBuf>,

    /// Input format for --from. Default: auto-detect from the extension.
    #[arg(long, value_enum, default_value = "auto")]
    format: InputFormat,

    /// Generate doc comments and the customization signature.
    #[arg(long)]
    doxygen: bool,

    /// List the predefined operation patterns and exit.
    #[arg(long = "llm-help")]
    llm_help: bool,

    /// Emit a declaration-only tag_invoke stub matching the signature.
    #[arg(long = "emit-tag-invoke")]
    emit_stub: bool,

    /// With --emit-tag-invoke, also emit a stub definition wrapped in
    /// #ifdef MACRO that fails to compile until replaced.
    #[arg(long = "emit-body-guard", value_name = "MACRO")]
    stub_guard: Option<String>,

    /// Target type for third-party trait specialization, e.g.
    /// 'std::vector<$T, $Alloc>' or 'Kokkos::View<...>'.
    #[arg(long = "impl-target", value_name = "TYPE")]
    impl_target: Option<String>,

    /// Emit a cpo_impl<CPO, Target> specialization skeleton.
    #[arg(long = "emit-trait-impl")]
    emit_trait_impl: bool,

    /// Emit only the trait specialization, without the dispatch point.
    #[arg(long = "trait-impl-only")]
    trait_impl_only: bool,

    /// Wrap the trait specialization in #ifdef MACRO/#endif.
    #[arg(long = "impl-guard", value_name = "MACRO")]
    impl_guard: Option<String>,

    /// Emit an ADL-visible forwarding shim for the impl target.
    #[arg(long = "emit-adl-shim")]
    emit_adl_shim: bool,

    /// Namespace for the ADL shim.
    #[arg(long = "shim-namespace", value_name = "NS")]
    shim_namespace: Option<String>,

    /// Wrap the generated code in a namespace.
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,

    /// Prepend #include <tincup/tincup.hpp> to the output.
    #[arg(long = "with-include")]
    with_include: bool,

    /// Write output to a file instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    out_path: Option<PathBuf>,

    /// Append to the --out file instead of overwriting.
    #[arg(long)]
    append: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.llm_help {
        print_pattern_help();
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let request = resolve_request(cli).map_err(|e| e.to_string())?;

    let options = EmitOptions {
        doc_comments: cli.doxygen,
        namespace: cli.namespace.clone(),
        with_include: cli.with_include,
        emit_stub: cli.emit_stub,
        stub_guard: cli.stub_guard.clone(),
        impl_target: cli.impl_target.clone(),
        // --impl-target implies the trait specialization.
        emit_trait_impl: cli.emit_trait_impl || cli.impl_target.is_some(),
        trait_impl_only: cli.trait_impl_only,
        impl_guard: cli.impl_guard.clone(),
        emit_adl_shim: cli.emit_adl_shim,
        shim_namespace: cli.shim_namespace.clone(),
    };

    let artifact = generate(&request, &options).map_err(|e| e.to_string())?;
    write_output(cli, &artifact).map_err(|e| e.to_string())
}

fn resolve_request(cli: &Cli) -> Result<GenerateRequest, GenerateError> {
    if let Some(path) = &cli.from_path {
        let text = fs::read_to_string(path).map_err(|e| GenerateError::InvalidRequest {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let format = match cli.format {
            InputFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some("yml") | Some("yaml") => InputFormat::Yaml,
                _ => InputFormat::Json,
            },
            other => other,
        };
        return match format {
            InputFormat::Yaml => GenerateRequest::from_yaml(&text),
            _ => GenerateRequest::from_json(&text),
        };
    }

    let text = match &cli.json_spec {
        Some(spec) => spec.clone(),
        None if !io::stdin().is_terminal() => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| GenerateError::InvalidRequest { reason: e.to_string() })?;
            buffer
        }
        None => {
            return Err(GenerateError::InvalidRequest {
                reason: "no specification given; pass a JSON string, pipe stdin, or use --from"
                    .to_string(),
            });
        }
    };
    GenerateRequest::from_json(&text)
}

fn write_output(cli: &Cli, artifact: &str) -> io::Result<()> {
    match &cli.out_path {
        Some(path) => {
            let mut open = fs::OpenOptions::new();
            open.create(true);
            if cli.append {
                open.append(true);
            } else {
                open.write(true).truncate(true);
            }
            open.open(path)?.write_all(artifact.as_bytes())
        }
        None => io::stdout().write_all(artifact.as_bytes()),
    }
}

fn print_pattern_help() {
    println!("Predefined operation patterns:");
    println!("==============================\n");
    for pattern in OPERATION_PATTERNS {
        println!("  {}: {}", pattern.name, pattern.description);
        println!("    Args: {:?}\n", pattern.args);
    }
    println!("Example usage:");
    println!("  cpogen '{{\"name\": \"process\", \"operation_type\": \"mutating_binary\"}}' --doxygen");
}
