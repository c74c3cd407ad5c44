//! Learning From Scraped Pages
//!
//! Trains on a directory of saved pages, then extracts from a new one.
//! Set `RUST_LOG=templatemaker=debug` to watch each sample being folded in.
//!
//! ```bash
//! cargo run --example scraped_pages -- path/to/pages path/to/new.html
//! ```

use std::env;
use std::fs;

use templatemaker::{Aligner, Error, Granularity, Template};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let (Some(dir), Some(page)) = (args.next(), args.next()) else {
        eprintln!("usage: scraped_pages <sample-dir> <page>");
        std::process::exit(2);
    };

    // Word tokens keep alignment fast on full pages; tolerance 3 drops
    // coincidental one- and two-token anchors.
    let aligner = Aligner::new(3).with_granularity(Granularity::Word);
    let template = Template::from_directory(&dir, aligner)?;

    println!("Learned {} samples, {} holes", template.version(), template.hole_count()?);
    println!("{}\n", template.render("[[...]]")?);

    let text = fs::read_to_string(&page)?;
    match template.captures(&text) {
        Ok(captures) => {
            for capture in captures {
                println!("{capture}");
            }
        }
        Err(Error::NoMatch) => println!("{page} does not fit the learned template"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
