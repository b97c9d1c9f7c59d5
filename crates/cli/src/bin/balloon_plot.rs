use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use stratoplan::importer::load_problem;

/// Render target cells and balloon tracks from a trajectory CSV.
#[derive(Parser, Debug)]
#[command(author, version, about = "Plot balloon tracks over target cells")]
struct Cli {
    /// Problem input file
    #[arg(long)]
    input: PathBuf,
    /// Trajectory CSV written by balloon_plan --trajectory
    #[arg(long)]
    trajectory: PathBuf,
    #[arg(long, default_value = "artifacts/tracks.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 500)]
    height: u32,
}

/// Track point: `(col, row)` while the balloon is alive.
type Track = Vec<(i32, i32)>;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let problem = load_problem(&cli.input)?;
    let tracks = read_tracks(&cli.trajectory)?;
    if tracks.is_empty() {
        return Err(anyhow::anyhow!("trajectory CSV contains no live positions"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let cols = problem.grid.cols as f64;
    let rows = problem.grid.rows as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0.0..cols, 0.0..rows)?;

    let target_color = RGBColor(200, 200, 200);
    chart.draw_series(problem.targets.iter().map(|t| {
        let (x, y) = (t.col as f64, t.row as f64);
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], target_color.filled())
    }))?;

    for (&balloon, track) in &tracks {
        let color = track_color(balloon);
        for segment in split_at_wrap(track, problem.grid.cols) {
            chart.draw_series(std::iter::once(PathElement::new(
                segment
                    .iter()
                    .map(|&(c, r)| (c as f64 + 0.5, r as f64 + 0.5))
                    .collect::<Vec<_>>(),
                ShapeStyle::from(&color).stroke_width(2),
            )))?;
        }
    }

    root.present()?;
    log::info!("wrote {} tracks to {}", tracks.len(), cli.output.display());
    Ok(())
}

fn read_tracks(path: &PathBuf) -> anyhow::Result<BTreeMap<usize, Track>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{name}' column"))
    };
    let balloon_idx = column("balloon")?;
    let col_idx = column("col")?;
    let row_idx = column("row")?;
    let live_idx = column("live")?;

    let mut tracks: BTreeMap<usize, Track> = BTreeMap::new();
    for rec in rdr.records() {
        let r = rec?;
        let live = r.get(live_idx).unwrap_or("false").eq_ignore_ascii_case("true");
        if !live {
            continue;
        }
        let balloon: usize = r.get(balloon_idx).unwrap_or("").parse()?;
        let col: i32 = r.get(col_idx).unwrap_or("").parse()?;
        let row: i32 = r.get(row_idx).unwrap_or("").parse()?;
        tracks.entry(balloon).or_default().push((col, row));
    }
    Ok(tracks)
}

/// Break a track wherever it jumps across the column seam.
fn split_at_wrap(track: &[(i32, i32)], cols: i32) -> Vec<&[(i32, i32)]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..track.len() {
        if (track[i].0 - track[i - 1].0).abs() > cols / 2 {
            segments.push(&track[start..i]);
            start = i;
        }
    }
    if start < track.len() {
        segments.push(&track[start..]);
    }
    segments
}

/// Spread balloon hues by the golden ratio so neighbouring indices stay distinct.
fn track_color(balloon: usize) -> HSLColor {
    let hue = (balloon as f64 * 0.618_033_988_75).fract();
    HSLColor(hue, 0.75, 0.45)
}
