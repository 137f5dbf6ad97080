use anyhow::{Context, Result, bail};
use movie_studio::catalog::{Category, create_data_source};
use movie_studio::config::AppConfig;
use movie_studio::payments::{MockPaymentService, PaymentService};
use movie_studio::screens::{DetailView, Discover, DiscoverOptions, HomeFeed};
use movie_studio::{catalog::CatalogDataSource, logging};
use tracing::{info, warn};

/// What to run after the home feed loads
enum Command {
    Home,
    Search(String),
    Detail(i64),
    Plans,
}

fn parse_args() -> Result<Command> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(Command::Home),
        Some("search") => {
            let query: Vec<String> = args.collect();
            if query.is_empty() {
                bail!("usage: movie-studio search <query>");
            }
            Ok(Command::Search(query.join(" ")))
        }
        Some("detail") => {
            let id = args
                .next()
                .context("usage: movie-studio detail <movie-id>")?
                .parse()
                .context("movie id must be a number")?;
            Ok(Command::Detail(id))
        }
        Some("plans") => Ok(Command::Plans),
        Some(other) => bail!("unknown command '{other}' (expected search, detail or plans)"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let _guard = logging::init(&config.logging).context("failed to initialize logging")?;
    let command = parse_args()?;

    let source = create_data_source(&config).context("failed to build catalog client")?;
    let policy = config.catalog.resolution;

    let home = HomeFeed::new(source.clone(), policy);
    home.launch();
    home.settled().await;
    report_home(&home);

    match command {
        Command::Home => {}
        Command::Plans => {
            let payments = MockPaymentService::from_config(&config.payments);
            for plan in payments.plans() {
                info!("{} ({}): {}", plan.name, plan.price_label(), plan.description);
            }
        }
        Command::Search(query) => search(source, &config, &query).await,
        Command::Detail(id) => {
            let view = DetailView::open(source, id, policy);
            view.settled().await;
            match view.detail() {
                Some(detail) => info!(
                    "{} ({}), {} min, directed by {}",
                    detail.summary.title,
                    detail
                        .summary
                        .release_year()
                        .map_or_else(|| "n/a".to_string(), |y| y.to_string()),
                    detail.runtime_minutes,
                    view.director_name().as_deref().unwrap_or("unknown"),
                ),
                None => warn!("Movie {} could not be loaded", id),
            }
        }
    }

    Ok(())
}

fn report_home(home: &HomeFeed) {
    if let Some(movie) = home.featured_movie() {
        info!("Featured: {} ({})", movie.title, movie.rating_label());
    }

    for category in Category::ALL {
        let region = home.category(category);
        if region.snapshot().has_error {
            warn!("{}: failed to load", category.title());
            continue;
        }
        let titles: Vec<String> = home.row(category).into_iter().map(|m| m.title).collect();
        info!("{}: {}", category.title(), titles.join(", "));
    }
}

async fn search(source: CatalogDataSource, config: &AppConfig, query: &str) {
    let discover = Discover::mount(
        source,
        DiscoverOptions {
            debounce: config.search.debounce(),
            policy: config.catalog.resolution,
        },
    );
    discover.movies_region().settled().await;

    discover.on_query_input(query);
    // Wait out the quiet period, then for the search itself
    tokio::time::sleep(config.search.debounce() + std::time::Duration::from_millis(50)).await;
    discover.movies_region().settled().await;

    let results = discover.movies();
    if results.has_error {
        warn!("Search for '{}' failed", query);
        return;
    }
    info!("{} result(s) for '{}'", results.payload.len(), query);
    for movie in results.payload {
        info!(
            "  {} [{}] {}",
            movie.title,
            movie.rating_label(),
            movie
                .release_year()
                .map_or_else(String::new, |y| y.to_string())
        );
    }
}
