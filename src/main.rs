//! Markedit - a terminal markdown editor.
//!
//! # Usage
//!
//! ```bash
//! markedit README.md
//! markedit --engine webkit --scroll-margin 4 README.md
//! markedit --script commands.jsonl README.md
//! markedit --dump-tree README.md
//! ```

use std::io::{BufReader, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markedit::app::App;
use markedit::config::{
    ConfigFlags, Engine, RenderMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use markedit::editor::{Editor, EditorOptions};
use markedit::host::MemoryHost;
use markedit::script::{dump_tree, run_script};

/// A terminal markdown editor
#[derive(Parser, Debug)]
#[command(name = "markedit", version, about, long_about = None)]
struct Cli {
    /// Markdown file to edit
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Input-method behaviour to follow
    #[arg(long, value_enum)]
    engine: Option<Engine>,

    /// Render edits immediately or on the next poll
    #[arg(long = "render", value_enum)]
    render_mode: Option<RenderMode>,

    /// Rows kept below the caret when scrolling after an edit
    #[arg(long, value_name = "ROWS")]
    scroll_margin: Option<usize>,

    /// Run control commands from a JSON-lines file instead of the terminal editor
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Print the compiled node list of FILE as JSON and exit
    #[arg(long)]
    dump_tree: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_file(path: Option<&PathBuf>) -> Result<String> {
    path.map_or_else(
        || Ok(String::new()),
        |path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        },
    )
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args).union(&ConfigFlags {
        engine: cli.engine,
        render_mode: cli.render_mode,
        scroll_margin: cli.scroll_margin,
    });

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
        eprintln!("Saved defaults to {}", global_path.display());
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    let engine = effective.engine.unwrap_or_default();
    let render_mode = effective.render_mode.unwrap_or_default();
    let scroll_margin = effective.scroll_margin_or_default();

    if cli.dump_tree {
        let text = read_file(cli.file.as_ref())?;
        println!("{}", dump_tree(&text)?);
        return Ok(());
    }

    if let Some(script) = &cli.script {
        let text = read_file(cli.file.as_ref())?;
        let options = EditorOptions::new()
            .with_default_value(text)
            .with_engine(engine)
            .with_render_mode(render_mode)
            .with_scroll_margin(scroll_margin);
        let mut editor = Editor::new(MemoryHost::default(), options);
        let input = std::fs::File::open(script)
            .with_context(|| format!("failed to open script {}", script.display()))?;
        run_script(&mut editor, BufReader::new(input), stdout().lock())?;
        return Ok(());
    }

    let Some(file) = cli.file else {
        if cli.save || cli.clear {
            return Ok(());
        }
        anyhow::bail!("no file given; run `markedit FILE`");
    };

    // Run the application
    let mut app = App::new(file)
        .with_engine(engine)
        .with_render_mode(render_mode)
        .with_scroll_margin(scroll_margin);

    app.run().context("Application error")
}
