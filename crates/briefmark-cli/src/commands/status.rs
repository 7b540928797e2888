//! Status command - show labeling progress of a saved session.

use std::path::{Path, PathBuf};

use briefmark::persistence::snapshot_path;
use briefmark::{input, Mark, ReviewSession};
use colored::Colorize;

/// Resolve the snapshot for `file`, which may be the snapshot itself or the
/// records file it was made from, whose snapshot lives in `output_dir`.
fn resolve_snapshot(file: &Path, output_dir: &Path) -> briefmark::Result<PathBuf> {
    let name = file
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.ends_with(".session.json") {
        return Ok(file.to_path_buf());
    }

    let (_, source) = input::load_file(file)?;
    Ok(snapshot_path(output_dir, &source))
}

/// Count records per mark, index 0 holding mark 1.
fn mark_counts(session: &ReviewSession) -> [usize; 5] {
    let mut counts = [0; 5];
    for mark in session.records().iter().filter_map(|r| r.mark()) {
        counts[usize::from(mark.value() - 1)] += 1;
    }
    counts
}

pub fn run(
    file: PathBuf,
    output_dir: PathBuf,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = resolve_snapshot(&file, &output_dir)?;

    if !snapshot.exists() {
        return Err(format!(
            "Session file not found: {}\nRun 'briefmark label {}' first.",
            snapshot.display(),
            file.display()
        )
        .into());
    }

    let session = ReviewSession::load_snapshot(&snapshot)?;
    let counts = mark_counts(&session);
    let labeled = session.labeled_count();
    let total = session.len();

    if json_output {
        let marks: serde_json::Map<String, serde_json::Value> = Mark::all()
            .map(|m| (m.to_string(), counts[usize::from(m.value() - 1)].into()))
            .collect();
        let status = serde_json::json!({
            "file": session.source().file,
            "position": session.cursor() + 1,
            "total": total,
            "labeled": labeled,
            "marks": marks,
            "all_labeled": session.all_labeled(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Labeling status for".cyan().bold(),
        session.source().file.white()
    );
    println!();

    let fraction = if total == 0 {
        0.0
    } else {
        labeled as f64 / total as f64
    };
    let bar_width = 30;
    let filled = (fraction * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Marked: {} {}/{} ({:.0}%)",
        bar.cyan(),
        labeled.to_string().white().bold(),
        total,
        fraction * 100.0
    );
    println!("Cursor: record {} of {}", session.cursor() + 1, total);
    println!();

    println!("{}", "Marks:".yellow().bold());
    for mark in Mark::all() {
        println!("  {}: {}", mark, counts[usize::from(mark.value() - 1)]);
    }
    println!();

    if session.all_labeled() {
        println!(
            "All records marked. Run {} and press 'e' to export.",
            format!("briefmark label {}", session.source().file).cyan().bold()
        );
    } else {
        println!(
            "Run {} to continue labeling.",
            format!("briefmark label {}", session.source().file).cyan().bold()
        );
    }

    Ok(())
}
