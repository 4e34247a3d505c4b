use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use katalog::{download_plan, CatalogClient, CatalogError, YtDlpSource};
use url::Url;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the catalog of download options for a URL as JSON
    Formats {
        #[arg()]
        url: String,
    },
    /// Fetch one option (or the best muxed stream) through the backend
    Download {
        #[arg()]
        url: String,
        /// catalog id to fetch; synthesized ids trigger audio extraction
        #[arg(long)]
        format_id: Option<String>,
        #[arg(long, default_value = "downloads")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let client = CatalogClient::new();

    match args.command {
        Command::Formats { url } => {
            let url = Url::parse(&url)?;
            let catalog = client.catalog_for_url(&url).await?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::Download {
            url,
            format_id,
            output_dir,
        } => {
            let url = Url::parse(&url)?;
            let catalog = client.catalog_for_url(&url).await?;
            let plan = download_plan::resolve(&catalog, format_id.as_deref());
            YtDlpSource::new()
                .download(&url, &plan, &output_dir)
                .await
                .map_err(|e| CatalogError::Download(format!("{e:#}")))?;
            println!("done: {}", catalog.video_info.title);
        }
    }

    Ok(())
}
