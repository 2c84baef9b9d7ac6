//! Data retrieval bot CLI
//!
//! Feeds chat lines to the plugin and prints its replies. Lines that are not
//! commands print nothing, as in a chat where another handler would answer.
//!
//! # Usage
//!
//! ```bash
//! export US_STOCK_API_TOKEN="your-stockdata-token"
//!
//! # Interactive
//! cargo run --bin data-bot -p data-retrieval
//!
//! # One-shot
//! cargo run --bin data-bot -p data-retrieval -- --command "股票 600519 3"
//! ```

use clap::Parser;
use data_retrieval::{DataRetrievalBot, RetrievalConfig};
use retrieval_utils::{LogFormat, init_tracing};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "data-bot")]
#[command(about = "Box-office and stock quote chat commands", long_about = None)]
struct Args {
    /// JSON config file (us_stock_api_token, request_timeout_secs, endpoints)
    #[arg(long)]
    config: Option<PathBuf>,

    /// US-stock API token; overrides the config file and US_STOCK_API_TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Handle a single message and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> data_retrieval::Result<RetrievalConfig> {
    let mut config = RetrievalConfig::load(args.config.as_deref())?;
    config.apply_token(args.token.clone());
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(LogFormat::from_json_flag(args.json_logs), args.verbose);

    let config = load_config(&args)?;
    let bot = DataRetrievalBot::from_config(config)?;

    if let Some(command) = &args.command {
        if let Some(reply) = bot.handle_text(command).await {
            println!("{reply}");
        }
        return Ok(());
    }

    let info = bot.info();
    println!("{} v{} - {}", info.name, info.version, info.description);
    println!("输入 /help 查看帮助，/exit 退出\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">>> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        match input {
            "" => continue,
            "/exit" | "/quit" => break,
            "/help" => {
                println!("{}", bot.help_text());
                continue;
            }
            _ => {}
        }

        if let Some(reply) = bot.handle_text(input).await {
            println!("{reply}\n");
        }
    }

    Ok(())
}
