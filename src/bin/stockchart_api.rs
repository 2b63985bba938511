use stockchart_api::config::Config;
use stockchart_api::providers::ProviderKind;
use stockchart_api::{router, AppState, CompanySearch, RangeCode};

use anyhow::Context;
use clap::{App, Arg, ArgMatches, SubCommand};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let provider_arg = Arg::with_name("provider")
        .short('p')
        .long("provider")
        .value_name("PROVIDER")
        .help("Chart data provider (yahoo, alphavantage, twelvedata)")
        .takes_value(true);

    let dataset_arg = Arg::with_name("dataset")
        .long("dataset")
        .value_name("PATH")
        .help("Company CSV dataset (SYMBOL, NAME OF COMPANY columns)")
        .takes_value(true);

    let app = App::new("stockchart_api")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Company search and normalized stock chart data over HTTP")
        .subcommand(
            SubCommand::with_name("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::with_name("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Listen address, e.g. 0.0.0.0:8000")
                        .takes_value(true),
                )
                .arg(provider_arg.clone())
                .arg(dataset_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("chart")
                .about("Fetch one chart series and print it as JSON")
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Ticker symbol, e.g. TCS or TCS.NS")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("range")
                        .short('r')
                        .long("range")
                        .value_name("RANGE")
                        .help("Time range (1D, 5D, 1M, 6M, 1Y, MAX)")
                        .takes_value(true)
                        .default_value("1D"),
                )
                .arg(provider_arg)
                .arg(dataset_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Search the company dataset and print matches as JSON")
                .arg(
                    Arg::with_name("query")
                        .short('q')
                        .long("query")
                        .value_name("QUERY")
                        .help("Symbol substring to look for")
                        .required(true)
                        .takes_value(true),
                )
                .arg(dataset_arg),
        );

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("serve") {
        let mut config = with_provider(load_config(matches)?, matches)?;
        if let Some(bind) = matches.value_of("bind") {
            config = config.with_bind_addr(bind);
        }

        let state = AppState::from_config(&config)?;
        info!(
            "Charts from {}, companies from {}",
            state.chart.provider().provider_code(),
            state.companies.dataset().display()
        );
        let app = router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind(&config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr))?;
        info!("Listening on {} (provider {})", config.bind_addr, config.provider);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down");
            })
            .await?;
    } else if let Some(matches) = matches.subcommand_matches("chart") {
        let config = with_provider(load_config(matches)?, matches)?;
        let symbol = matches.value_of("symbol").unwrap_or_default();
        let range = matches.value_of("range").unwrap_or("1D").parse::<RangeCode>()?;

        let state = AppState::from_config(&config)?;
        let series = state.chart.fetch_series(symbol, range).await?;
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else if let Some(matches) = matches.subcommand_matches("search") {
        let config = load_config(matches)?;
        let query = matches.value_of("query").unwrap_or_default();

        let companies = CompanySearch::new(&config.dataset_path, config.search_limit);
        let results = companies.search(query)?;
        info!("Found {} companies matching {}", results.len(), query);
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

// 环境变量之上叠加命令行参数
fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(dataset) = matches.value_of("dataset") {
        config = config.with_dataset_path(dataset);
    }

    Ok(config)
}

// 仅 serve / chart 子命令带 provider 参数
fn with_provider(config: Config, matches: &ArgMatches) -> anyhow::Result<Config> {
    match matches.value_of("provider") {
        Some(provider) => Ok(config.with_provider(provider.parse::<ProviderKind>()?)),
        None => Ok(config),
    }
}
