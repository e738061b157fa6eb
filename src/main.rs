use capture_urls::crawlers::phones;
use capture_urls::filter::domain_of;
use capture_urls::parsers::sitemap;
use capture_urls::{
    CaptureConfig, CapturedUrl, ConsoleSink, JsonStore, Monitor, PageRenderer, WebDriverRenderer,
};
use clap::Parser;
use std::error::Error;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CaptureConfig::from_file(path)?,
        None => CaptureConfig::default(),
    }
    .with_env();
    args.apply_overrides(&mut config);

    match args.command {
        Command::Watch {
            target_url,
            interval,
            output,
            resume,
            browser,
        } => {
            browser.apply_overrides(&mut config);
            if target_url.is_some() {
                config.target_url = target_url;
            }
            if let Some(interval) = interval {
                config.poll_interval_secs = interval;
            }
            if let Some(output) = output {
                config.output_file = output;
            }
            config.resume |= resume;

            watch(config.normalized()).await
        }
        Command::Sitemap { input, output } => {
            let config = config.normalized();
            let domain = domain_of(&config.base_url)?;
            let store = JsonStore::new(output);
            let urls = sitemap::ingest(&input, &store, &domain, &config.city)?;
            println!(
                "Wrote {} restaurant URLs to {}",
                urls.len(),
                store.path().display()
            );
            Ok(())
        }
        Command::Phones {
            mut urls,
            input,
            output,
            browser,
        } => {
            browser.apply_overrides(&mut config);
            if let Some(input) = input {
                let captured: Vec<CapturedUrl> = JsonStore::new(input).try_load()?;
                urls.extend(captured.into_iter().map(|c| c.url));
            }
            if urls.is_empty() {
                return Err("no URLs given; pass them as arguments or with --input".into());
            }

            let config = config.normalized();
            let mut renderer = WebDriverRenderer::connect(&config).await?;
            let store = JsonStore::new(output);
            let result =
                phones::collect_phone_numbers(&mut renderer, &urls, config.load_timeout(), &store)
                    .await;

            if let Err(e) = renderer.close().await {
                ::log::warn!("Failed to close browser session: {}", e);
            }
            for record in result? {
                println!("{}: {}", record.url, record.phone_numbers.join(", "));
            }
            Ok(())
        }
    }
}

async fn watch(config: CaptureConfig) -> Result<(), Box<dyn Error>> {
    ::log::info!("Starting capture for: {}", config.target_url());
    println!("Note: capturing requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let filter = config.filter()?;
    let renderer = WebDriverRenderer::connect(&config).await?;
    let store = JsonStore::new(config.output_file.clone());

    let mut monitor = Monitor::new(renderer, filter, store, ConsoleSink)
        .with_load_timeout(config.load_timeout_secs)
        .with_resume(config.resume);

    let start_time = std::time::Instant::now();
    let result = monitor
        .start(&config.target_url(), config.poll_interval())
        .await;

    if let Err(e) = monitor.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    let summary = result?;
    ::log::info!(
        "Capture finished - {} new URLs in {} checks over {:.2} seconds",
        summary.captured,
        summary.ticks,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
