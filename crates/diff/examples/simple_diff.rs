use anyhow::Result;
use html_diff::{compute_html_diff, extract_text_from_html, DiffOptions};

fn main() -> Result<()> {
    env_logger::init();

    let original = "<h1>Release notes</h1>\
        <p>This release fixes a crash on startup.</p>\
        <ul><li>Faster search</li><li>New theme</li></ul>";
    let proposed = "<h1>Release notes</h1>\
        <p>This release fixes a crash on shutdown.</p>\
        <ul><li>Faster search</li><li>Dark theme</li><li>Plugin API</li></ul>";

    println!("=== Extracted text (original) ===");
    println!("{}", extract_text_from_html(original));

    println!("\n=== Extracted text (proposed) ===");
    println!("{}", extract_text_from_html(proposed));

    let result = compute_html_diff(original, proposed, &DiffOptions::default());

    println!("\n=== Segments ===");
    for segment in &result.segments {
        println!("{:>9}: {:?}", segment.segment_type, segment.value);
    }

    println!("\n=== Annotated original ===");
    println!("{}", result.original_annotated_html);

    println!("\n=== Annotated proposed ===");
    println!("{}", result.proposed_annotated_html);

    println!(
        "\n+{} -{} ={} words",
        result.stats.additions, result.stats.deletions, result.stats.unchanged
    );

    Ok(())
}
