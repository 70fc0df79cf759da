use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "selact", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON markup tree to HTML/SVG markup.
    Render(RenderArgs),
    /// Parse and validate a JSON markup tree without rendering it.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input markup tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file; markup goes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Indent nested elements by this many spaces.
    #[arg(long)]
    pretty: Option<usize>,

    /// Write a whole HTML document instead of the body contents.
    #[arg(long)]
    full_document: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input markup tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_tree(path: &Path) -> anyhow::Result<selact::MarkupNode> {
    let tree = selact::MarkupNode::from_path(path)
        .with_context(|| format!("read markup tree '{}'", path.display()))?;
    tree.validate()
        .with_context(|| format!("validate markup tree '{}'", path.display()))?;
    Ok(tree)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.in_path)?;
    let node = selact::Node::from(tree.to_element());
    let options = selact::MarkupOptions {
        indent: args.pretty,
    };

    let mut markup = if args.full_document {
        selact::render_document(&node, options)?
    } else {
        selact::server_render_with(&node, options)?
    };
    markup.push('\n');

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, markup)
                .with_context(|| format!("write markup '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            std::io::stdout()
                .write_all(markup.as_bytes())
                .context("write markup to stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let tree = read_tree(&args.in_path)?;
    println!("ok: {} nodes", tree.count());
    Ok(())
}
