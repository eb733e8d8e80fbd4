use anyhow::Result;
use pipemeta_core::{NameSelector, ProgressStatus, Selection};
use pipemeta_query::{find_errored, find_with_status, AgeQuery};
use pipemeta_store::StoreBackend;

use crate::cli::{Commands, OutputFormat};

pub async fn execute(
    command: Commands,
    store: &dyn StoreBackend,
    format: OutputFormat,
) -> Result<()> {
    let names = match command {
        Commands::Older {
            threshold,
            names,
            inclusive,
        } => {
            let query = age_query(&threshold, &inclusive, names.as_ref())?;
            query.older(store).await?
        }

        Commands::Newer {
            threshold,
            names,
            inclusive,
        } => {
            let query = age_query(&threshold, &inclusive, names.as_ref())?;
            query.newer(store).await?
        }

        Commands::Errored { names } => find_errored(store, selector(names.as_ref())).await?,

        Commands::Status { status, names } => {
            let status = ProgressStatus::from_store(&status);
            if !status.is_known() {
                anyhow::bail!("Unknown status: {}", status);
            }
            find_with_status(store, &status, selector(names.as_ref())).await?
        }
    };

    print!("{}", render(&names, format)?);

    Ok(())
}

fn selector(names: Option<&Selection>) -> Option<&dyn NameSelector> {
    names.map(|s| s as &dyn NameSelector)
}

fn age_query<'a>(
    threshold: &str,
    inclusive: &str,
    names: Option<&'a Selection>,
) -> Result<AgeQuery<'a>> {
    let mut query = AgeQuery::parse(&[threshold], &[inclusive])?;
    query.names = selector(names);
    Ok(query)
}

fn render(names: &[String], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Text => names.iter().map(|n| format!("{}\n", n)).collect::<String>(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(names)?),
    };
    Ok(out)
}
