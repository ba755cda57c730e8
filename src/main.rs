use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use sample_porter_core::cli::{self, OutputTarget};
use sample_porter_core::discovery::HtmlDocsDiscoverer;
use sample_porter_core::fetch::GithubFetcher;
use sample_porter_core::pipeline::{self, Pipeline};
use sample_porter_core::{logging, output};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    args.validate().context("Invalid arguments")?;

    logging::init(logging::Verbosity::from_flags(args.verbose, args.quiet));

    let fetcher = GithubFetcher::new();
    let discoverer = HtmlDocsDiscoverer::new();
    let converted = Pipeline::new(&fetcher, &discoverer)
        .run(&args.repo_url, &args.library, args.docs.as_deref())
        .context("Conversion failed")?;

    if converted.is_empty() {
        println!("No Python samples found in the repository");
        return Ok(());
    }

    match args.output_target() {
        OutputTarget::Archive(path) => {
            output::write_zip(&converted, &path).context("Failed to write archive")?;
            println!("Archive written to {}", path.display());
        }
        OutputTarget::Directory(path) => {
            output::write_directory(&converted, &path).context("Failed to write directory")?;
            println!("Samples written to {}", path.display());
        }
    }

    print!("{}", pipeline::summarize(&converted).render());
    Ok(())
}
