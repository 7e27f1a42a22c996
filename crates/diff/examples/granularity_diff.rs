use anyhow::Result;
use html_diff::{DiffGranularity, DiffOptions, WhitespaceMode};

fn main() -> Result<()> {
    env_logger::init();

    // Modes as they would arrive from a caller's settings
    let granularity: DiffGranularity = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("character")
        .parse()?;
    let whitespace: WhitespaceMode = std::env::args()
        .nth(2)
        .as_deref()
        .unwrap_or("relaxed")
        .parse()?;

    let original = "<p>The  colour of the sky</p>";
    let proposed = "<p>The color of the skies</p>";

    for granularity in [DiffGranularity::Word, granularity] {
        let options = DiffOptions::default()
            .granularity(granularity)
            .whitespace(whitespace);
        let result = options.compute(original, proposed);

        println!("=== {} granularity, {} whitespace ===", granularity, whitespace);
        println!("{}", result.original_annotated_html);
        println!("{}", result.proposed_annotated_html);
        println!(
            "+{} -{} ={}\n",
            result.stats.additions, result.stats.deletions, result.stats.unchanged
        );
    }

    Ok(())
}
