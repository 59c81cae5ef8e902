use ratewatch::RatewatchError;
use ratewatch::client::RatesClient;
use ratewatch::config::fetch_config;
use ratewatch::locale::Catalog;
use ratewatch::store::Store;
use ratewatch::tui::{self, App, Message, Tui};
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> Result<(), RatewatchError> {
    // Logging goes to stderr; the dashboard owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = fetch_config()?;
    let catalog = Catalog::load(&config.locale);
    let store = Store::open(&config.data_dir);
    let client = RatesClient::new(&config.api)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(ratewatch::poller::run(
        client,
        config.poll.clone(),
        tx.clone(),
        shutdown_rx,
    ));
    tui::event::spawn_event_reader(tx.clone());
    tui::event::spawn_tick_timer(tx, 250);

    let mut terminal = tui::setup_terminal()?;
    let mut app = App::new(&config, store, catalog);

    let result = run_loop(&mut terminal, &mut app, rx).await;

    // Stop polling before giving the terminal back.
    let _ = shutdown_tx.send(true);
    tui::restore_terminal(&mut terminal)?;

    result
}

/// Draw, wait for the next message, fold it into state, repeat.
async fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    mut rx: mpsc::UnboundedReceiver<Message>,
) -> Result<(), RatewatchError> {
    loop {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| RatewatchError::Io(format!("draw failed: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        tui::event::update(app, message);

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
