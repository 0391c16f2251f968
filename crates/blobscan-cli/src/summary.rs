use std::path::Path;

use blobscan_core::detection::DetectionConfig;
use blobscan_core::ranking::SceneSummary;
use console::{measure_text_width, pad_str, Alignment, Style};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_detection_summary(config: &DetectionConfig, input: &Path, output: &Path, scenes: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Blob Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scenes"),
        s.value.apply_to(scenes)
    );
    println!();

    println!("  {}", s.header.apply_to("Threshold"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(config.threshold_mode())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Polarity"),
        s.value.apply_to(if config.invert { "dark" } else { "bright" })
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(format!("{} px", config.min_area_px))
    );
    if config.max_candidates == 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Keep"),
            s.disabled.apply_to("unlimited")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Keep"),
            s.value.apply_to(format!("top {}", config.max_candidates))
        );
    }
    println!();
}

/// Per-scene table in first-seen scene order.
pub fn print_scene_table(summaries: &[SceneSummary], total_before_limit: usize) {
    let s = Styles::new();
    let id_width = summaries
        .iter()
        .map(|r| measure_text_width(&r.scene_id))
        .max()
        .unwrap_or(0)
        .max("scene_id".len());

    println!();
    println!(
        "  {}",
        s.header.apply_to(format!(
            "{}  {:>10}  {:>10}  {:>10}  {:>8}  {:>8}",
            pad_id("scene_id", id_width),
            "candidates", "score_mean", "score_max", "area_min", "area_max"
        ))
    );
    println!("  {}", s.label.apply_to("-".repeat(id_width + 56)));

    for row in summaries {
        let line = format!(
            "{}  {:>10}  {:>10.2}  {:>10.2}  {:>8}  {:>8}",
            pad_id(&row.scene_id, id_width),
            row.count, row.mean_score, row.max_score, row.min_area, row.max_area
        );
        if row.count == 0 {
            println!("  {}", s.disabled.apply_to(line));
        } else {
            println!("  {}", line);
        }
    }

    let kept: usize = summaries.iter().map(|r| r.count).sum();
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Kept"),
        s.value.apply_to(format!("{} of {}", kept, total_before_limit))
    );
}

/// Left-align a scene id to `width` terminal columns.
fn pad_id(id: &str, width: usize) -> String {
    pad_str(id, width, Alignment::Left, None).into_owned()
}
