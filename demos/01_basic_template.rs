//! Basic Template
//!
//! The minimal example: learn two samples, extract from a third.
//!
//! ```bash
//! cargo run --example 01_basic_template
//! ```

use templatemaker::Template;

fn main() -> templatemaker::Result<()> {
    let samples = [
        "<h1>Alice</h1><p>Joined 2019, 42 posts</p>",
        "<h1>Bob</h1><p>Joined 2021, 7 posts</p>",
    ];

    let mut template = Template::new(0);
    for sample in samples {
        let outcome = template.learn(sample);
        println!("learned {sample:?}: {outcome:?}");
    }

    println!("\nTemplate: {}", template.render("{{ HOLE }}")?);
    println!("Holes:    {}\n", template.hole_count()?);

    let values = template.extract("<h1>Carol</h1><p>Joined 2023, 311 posts</p>")?;
    for (i, value) in values.iter().enumerate() {
        println!("[{i}] {value:?}");
    }

    Ok(())
}
