use anyhow::Result;
use html_diff::{detect_block_changes, BlockAligner, BlockChangeType};

fn main() -> Result<()> {
    env_logger::init();

    let original = "<h1>Guide</h1>\
        <p>Install the tool with the package manager.</p>\
        <p>Configuration lives in the home directory.</p>\
        <blockquote>Back up your data first.</blockquote>";
    let proposed = "<h2>Guide</h2>\
        <p>Install the tool with your package manager.</p>\
        <p>Run the setup wizard.</p>\
        <blockquote>Back up your data first.</blockquote>";

    println!("=== Default threshold ===");
    for change in detect_block_changes(original, proposed) {
        match change.change_type {
            BlockChangeType::Added => println!("+ <{}> {}", change.tag, change.proposed_text),
            BlockChangeType::Removed => println!("- <{}> {}", change.tag, change.original_text),
            BlockChangeType::Modified => println!(
                "~ <{}> {} => {}",
                change.tag, change.original_text, change.proposed_text
            ),
            BlockChangeType::Unchanged => println!("  <{}> {}", change.tag, change.proposed_text),
        }
    }

    println!("\n=== Threshold 0.9 ===");
    let strict = BlockAligner::default().similarity_threshold(0.9);
    for change in strict.detect(original, proposed) {
        println!("{:>9} <{}>", change.change_type, change.tag);
    }

    Ok(())
}
