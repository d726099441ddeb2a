//! money-counter Telegram Bot
//!
//! Main application entry point

use std::{net::SocketAddr, sync::Arc};
use teloxide::{prelude::*, types::{Me, Update}};
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use money_counter::{
    config::Settings,
    utils::logging,
    state::build_store,
    services::BalanceService,
    handlers::{
        commands::{self, Command},
        messages,
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", money_counter::info());

    let bot = Bot::new(&settings.bot.token);

    // Initialize balance storage
    let store = build_store(&settings.storage, bot.clone()).await?;
    let service = Arc::new(BalanceService::from_settings(store, &settings));
    info!(service = ?service, "Balance service initialized");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![service])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    match settings.webhook_url() {
        Some(webhook_url) => {
            let address = SocketAddr::new(settings.bot.webhook_listen.parse()?, settings.bot.webhook_port);
            let url = url::Url::parse(webhook_url)?;
            info!(address = %address, url = %url, "Starting bot with webhook...");

            let listener = webhooks::axum(bot, webhooks::Options::new(address, url)).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting bot with long polling...");
            dispatcher.dispatch().await;
        }
    }

    info!("money-counter bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_commands)
        )
        .branch(
            // Handle spend messages
            dptree::endpoint(handle_messages)
        )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<BalanceService>,
) -> HandlerResult {
    if let Err(e) = commands::handle_command(bot, msg, cmd, service).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    me: Me,
    service: Arc<BalanceService>,
) -> HandlerResult {
    if let Err(e) = messages::handle_message(bot, msg, me.username(), service).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
