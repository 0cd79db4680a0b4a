use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Print the dominant colors of images along with their names.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum number of colors to report
    #[arg(short = 'k', long, default_value_t = palettescope::DEFAULT_MAXIMUM_COLOR_COUNT)]
    max_colors: usize,

    /// Channel rounding step used to group similar colors
    #[arg(short, long, default_value_t = palettescope::DEFAULT_BUCKET_SIZE)]
    bucket_size: u8,

    /// Longest side the image is scaled down to before counting, 0 to disable
    #[arg(short = 'm', long, default_value_t = palettescope::DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Print the palettes as JSON instead of tab-separated text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    for input in &args.inputs {
        let palette = palettescope::Palette::from_path(input)
            .with_context(|| format!("failed to load {}", input.display()))?
            .maximum_color_count(args.max_colors)
            .bucket_size(args.bucket_size)
            .max_dimension(args.max_dimension)
            .generate();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&palette)?);
        } else {
            if args.inputs.len() > 1 {
                println!("{}", input.display());
            }

            if palette.is_empty() {
                println!("No colors found");
            } else {
                println!("{}", palette.to_tab_separated());
            }
        }
    }

    Ok(())
}
