use anyhow::{Context, Result};
use clap::Parser;
use frontend::{
    FormHandler, HttpSubmitter,
    config::ClientConfig,
    page::{ERROR_MESSAGE, INTERESTS_INPUT, NAME_INPUT, RECOMMENDATIONS_SECTION, USERS_LIST, index_document},
};
use tracing_subscriber::{EnvFilter, fmt};

/// Submits one form to a running server and prints what the page ends up showing.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    name: String,

    interests: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = ClientConfig::load();

    let mut document = index_document();
    for (id, value) in [(NAME_INPUT, &args.name), (INTERESTS_INPUT, &args.interests)] {
        document
            .get_element_by_id_mut(id)
            .context("page skeleton is missing an input")?
            .set_value(value);
    }

    let handler = FormHandler::on_dom_ready(&document, HttpSubmitter::new(&config.endpoint))
        .context("page skeleton is missing the form")?;

    let outcome = handler.on_submit(&mut document).await;
    println!("Outcome: {outcome:?}\n");

    for id in [ERROR_MESSAGE, USERS_LIST, RECOMMENDATIONS_SECTION] {
        if let Some(element) = document.get_element_by_id(id) {
            println!("{}", element.to_html());
        }
    }

    Ok(())
}
