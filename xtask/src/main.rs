use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

/// Script for the smoke run: walk, turn, attack, pass, then look around in
/// first-person and free-fly.
const SMOKE_SCRIPT: &str = "w*30,a*5,w*20,e,space,f,w*10,d*4,f,l,w*15,space";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for skirmish")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run a short headless scripted skirmish
    Smoke {
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Build => cargo("cargo build", &["build", "--workspace"])?,
        Commands::Smoke { seed } => run_smoke(seed)?,
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("cargo fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "cargo clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> Result<()> {
    cargo("cargo test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("cargo doc", &["doc", "--workspace", "--no-deps"])
}

fn run_smoke(seed: u64) -> Result<()> {
    let seed = seed.to_string();
    cargo(
        "skirmish smoke run",
        &[
            "run",
            "-p",
            "skirmish-cli",
            "--",
            "skirmish",
            "--seed",
            &seed,
            "--ticks",
            "200",
            "--script",
            SMOKE_SCRIPT,
            "--frame",
        ],
    )
}
