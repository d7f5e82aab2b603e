use crate::config::{BridgeOverrides, Config, Language, load_config};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bdr",
    version,
    about = "Suspension bridge structural diagram renderer"
)]
pub struct Args {
    /// Config file (JSON or JSON5) with bridge dimensions, theme and annotation offsets
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Surface width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Surface height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Colour theme
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeName>,

    /// Label language
    #[arg(long = "language", value_enum)]
    pub language: Option<LabelLanguage>,

    /// Leave out the Mohr's circle inset
    #[arg(long = "no-mohr")]
    pub no_mohr: bool,

    /// Leave out the legend panel
    #[arg(long = "no-legend")]
    pub no_legend: bool,

    /// Write the derived geometry and annotations as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    #[arg(long = "deck-length")]
    pub deck_length: Option<f32>,

    #[arg(long = "max-deflection")]
    pub max_deflection: Option<f32>,

    #[arg(long = "cable-sag")]
    pub cable_sag: Option<f32>,

    #[arg(long = "hanger-spacing")]
    pub hanger_spacing: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Classic,
    Blueprint,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLanguage {
    En,
    Ko,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = resolve_config(&args)?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &config)?;
    }

    let svg = render_svg(&config);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render, &config.theme.font_family)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file over defaults, then command-line flags over the file.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(theme) = args.theme {
        config.theme = match theme {
            ThemeName::Classic => Theme::classic(),
            ThemeName::Blueprint => Theme::blueprint(),
        };
    }
    if let Some(language) = args.language {
        config.language = match language {
            LabelLanguage::En => Language::En,
            LabelLanguage::Ko => Language::Ko,
        };
    }
    if args.no_mohr {
        config.scene.mohr_circle = false;
    }
    if args.no_legend {
        config.scene.legend = false;
    }

    config.bridge.apply(&BridgeOverrides {
        width: args.width,
        height: args.height,
        deck_length: args.deck_length,
        max_deflection: args.max_deflection,
        main_cable_sag: args.cable_sag,
        hanger_spacing: args.hanger_spacing,
        ..BridgeOverrides::default()
    });
    config.sync_render();

    config.validate()?;
    tracing::debug!(bridge = ?config.bridge, "resolved bridge config");
    Ok(config)
}
