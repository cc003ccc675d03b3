//! Command-line probe against a running backend: signs in when
//! credentials are provided, walks the public collections and prints what
//! it finds. Useful for checking a deployment end to end.

use std::env;

use portfolio_client::config::ClientConfig;
use portfolio_client::models::CategoryFilter;
use portfolio_client::notify;
use portfolio_client::stores::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();
    notify::install_panic_hook();

    println!("probing {}", config.api_base_url);
    let mut app = App::bootstrap(&config)?;

    if let (Ok(username), Ok(password)) = (
        env::var("PORTFOLIO_USERNAME"),
        env::var("PORTFOLIO_PASSWORD"),
    ) {
        let identity = app.stores.session.login(&username, &password).await?;
        println!("signed in as {} ({:?})", identity.username, identity.role);
    } else {
        println!("no credentials in the environment, browsing anonymously");
    }

    app.stores.projects.entity.fetch_all().await?;
    let projects = app.stores.projects.filtered_by_category(CategoryFilter::All);
    println!("{} projects:", projects.len());
    for project in &projects {
        println!(
            "  #{:<3} [{}] {}{}",
            project.id,
            project.category,
            project.title,
            if project.featured { "  (featured)" } else { "" }
        );
    }

    if let Some(first) = projects.first().map(|p| p.id) {
        app.stores.comments.fetch_for_project(first).await?;
        println!(
            "project #{} has {} comments",
            first,
            app.stores.comments.entity.items().len()
        );
    }

    if app.stores.session.is_authenticated() {
        app.stores.reset_all();
        println!("signed out");
    }
    Ok(())
}
