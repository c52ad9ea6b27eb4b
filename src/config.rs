use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Layout engine whose input-method behaviour the editor follows.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    #[default]
    Blink,
    Gecko,
    Webkit,
}

/// When a text change is rendered.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Compile and mount as part of the edit
    #[default]
    Sync,
    /// Compile and mount on the next poll
    Deferred,
}

/// Scroll margin used when no flag sets one.
pub const DEFAULT_SCROLL_MARGIN: usize = 8;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub engine: Option<Engine>,
    pub render_mode: Option<RenderMode>,
    pub scroll_margin: Option<usize>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            engine: other.engine.or(self.engine),
            render_mode: other.render_mode.or(self.render_mode),
            scroll_margin: other.scroll_margin.or(self.scroll_margin),
        }
    }

    pub fn scroll_margin_or_default(&self) -> usize {
        self.scroll_margin.unwrap_or(DEFAULT_SCROLL_MARGIN)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markedit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markedit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markedit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("markedit").join("config");
        }
    }

    PathBuf::from(".markeditrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markeditrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markedit defaults (saved with --save)".to_string());
    if let Some(engine) = flags.engine {
        lines.push(format!("--engine {}", engine_name(engine)));
    }
    if let Some(mode) = flags.render_mode {
        let mode_str = match mode {
            RenderMode::Sync => "sync",
            RenderMode::Deferred => "deferred",
        };
        lines.push(format!("--render {mode_str}"));
    }
    if let Some(margin) = flags.scroll_margin {
        lines.push(format!("--scroll-margin {margin}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--engine" {
            if let Some(next) = tokens.get(i + 1) {
                flags.engine = parse_engine(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--engine=") {
            flags.engine = parse_engine(value);
        } else if token == "--render" {
            if let Some(next) = tokens.get(i + 1) {
                flags.render_mode = parse_render_mode(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--render=") {
            flags.render_mode = parse_render_mode(value);
        } else if token == "--scroll-margin" {
            if let Some(next) = tokens.get(i + 1) {
                flags.scroll_margin = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--scroll-margin=") {
            flags.scroll_margin = value.parse().ok();
        }
        i += 1;
    }
    flags
}

const fn engine_name(engine: Engine) -> &'static str {
    match engine {
        Engine::Blink => "blink",
        Engine::Gecko => "gecko",
        Engine::Webkit => "webkit",
    }
}

fn parse_engine(s: &str) -> Option<Engine> {
    match s {
        "blink" => Some(Engine::Blink),
        "gecko" => Some(Engine::Gecko),
        "webkit" => Some(Engine::Webkit),
        _ => None,
    }
}

fn parse_render_mode(s: &str) -> Option<RenderMode> {
    match s {
        "sync" => Some(RenderMode::Sync),
        "deferred" => Some(RenderMode::Deferred),
        _ => None,
    }
}
