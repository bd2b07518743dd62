use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{ArgGroup, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gn_packager::gn::generate_all;
use gn_packager::ninja::build_variants;
use gn_packager::package::package_project;
use gn_packager::preflight::check_build_tools;
use gn_packager::toolchain::ToolchainEnv;
use gn_packager::variant::BUILD_TYPE_KEYWORDS;
use gn_packager::vendor::{copy_buildtools, zip_buildtools};

#[derive(Parser)]
#[command(name = "gn-packager", version)]
#[command(about = "Packaging helper for GN/ninja builds of the base library")]
#[command(group(ArgGroup::new("mode").args(["copy", "zip", "gen", "build", "package"])))]
struct Cli {
    /// Copy the buildtools whitelist from a Chromium checkout into the current directory
    #[arg(short, long, value_name = "PATH")]
    copy: Option<PathBuf>,

    /// Copy the buildtools whitelist and archive it as buildtools_zip.zip
    #[arg(short, long, value_name = "PATH")]
    zip: Option<PathBuf>,

    /// Generate all four build configurations (debug/release x static/shared)
    #[arg(short, long)]
    gen: bool,

    /// Build the configurations selected by KEYWORD
    #[arg(
        short,
        long,
        value_name = "KEYWORD",
        value_parser = PossibleValuesParser::new(BUILD_TYPE_KEYWORDS.iter().copied())
    )]
    build: Option<String>,

    /// Run the full packaging pipeline: generate, build all, collect, archive
    #[arg(short, long)]
    package: bool,

    /// Show informational log output
    #[arg(short, long)]
    log: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log);

    let root = env::current_dir().context("resolving current directory")?;
    let toolchain = ToolchainEnv::default();

    if let Some(src_root) = cli.copy.as_deref() {
        return copy_buildtools(&root, src_root);
    }
    if let Some(src_root) = cli.zip.as_deref() {
        let archive = zip_buildtools(&root, src_root)?;
        println!("buildtools archived to {}", archive.display());
        return Ok(());
    }
    if cli.gen {
        check_build_tools(&root)?;
        return generate_all(&root, &toolchain);
    }
    if let Some(build_type) = cli.build.as_deref() {
        check_build_tools(&root)?;
        return build_variants(&root, build_type, &toolchain);
    }
    if cli.package {
        check_build_tools(&root)?;
        return package_project(&root, &toolchain);
    }

    // No mode selected: show usage, succeed.
    Cli::command().print_help().context("printing usage")?;
    Ok(())
}
