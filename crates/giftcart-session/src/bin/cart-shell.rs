//! # Cart Shell
//!
//! Line-oriented driver for a [`CartSession`], for trying the promotion by hand.
//!
//! ## Usage
//! ```bash
//! # Default storefront (or the config file, if one exists)
//! cargo run -p giftcart-session --bin cart-shell
//!
//! # Explicit config file
//! cargo run -p giftcart-session --bin cart-shell -- --config ./giftcart.toml
//!
//! # Write the default config to the platform config dir and exit
//! cargo run -p giftcart-session --bin cart-shell -- --init-config
//! ```
//!
//! ## Commands
//! ```text
//! list            show the catalog
//! add <id>        add one unit of a product
//! inc <id>        quantity +1
//! dec <id>        quantity -1 (removes the line at zero)
//! rm <id>         remove the line
//! clear           empty the cart
//! dismiss         close the gift banner
//! show            print the cart
//! quit            exit
//! ```

use std::env;
use std::path::PathBuf;

use giftcart_core::{CartView, ProductId};
use giftcart_session::{init_tracing, CartSession, DisplaySettings, SessionConfig, SessionResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut init_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--init-config" => init_config = true,
            "--help" | "-h" => {
                println!("GiftCart Shell");
                println!();
                println!("Usage: cart-shell [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --init-config    Write the default config file and exit");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    if init_config {
        let path = SessionConfig::default().save(config_path)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    // An explicit --config must load; the platform default may fall back.
    let config = match config_path {
        Some(path) => SessionConfig::load(Some(path))?,
        None => SessionConfig::load_or_default(None),
    };
    let display = config.display.clone();
    let gift_name = config.promotion.gift.name.clone();
    let session = CartSession::from_config(&config)?;

    info!("cart-shell ready");
    println!("🛒 GiftCart Shell");
    println!("=================");
    print_catalog(&session, &display);
    println!();
    println!("Type 'help' for commands.");

    spawn_banner_watcher(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let id = words.next().and_then(|w| w.parse::<ProductId>().ok());

        let result: SessionResult<Option<CartView>> = match (command, id) {
            ("quit" | "exit" | "q", _) => break,
            ("help", _) => {
                print_help();
                Ok(None)
            }
            ("list", _) => {
                print_catalog(&session, &display);
                Ok(None)
            }
            ("show", _) => Ok(Some(session.view())),
            ("clear", _) => Ok(Some(session.clear())),
            ("dismiss", _) => Ok(Some(session.dismiss_notice())),
            ("add", Some(id)) => session.add_product(id).map(Some),
            ("inc", Some(id)) => session.change_quantity(id, 1).map(Some),
            ("dec", Some(id)) => session.change_quantity(id, -1).map(Some),
            ("rm", Some(id)) => session.remove_product(id).map(Some),
            ("add" | "inc" | "dec" | "rm", None) => {
                println!("⚠ {} needs a numeric product id", command);
                Ok(None)
            }
            _ => {
                println!("⚠ Unknown command '{}'. Type 'help'.", command);
                Ok(None)
            }
        };

        match result {
            Ok(Some(view)) => print_cart(&view, &display, &gift_name),
            Ok(None) => {}
            Err(e) if e.is_gift_locked() => println!("⚠ The free gift can't be changed."),
            Err(e) => println!("⚠ {}", e),
        }
    }

    println!("Bye!");
    Ok(())
}

/// Prints a line whenever the banner appears or goes away.
fn spawn_banner_watcher(session: &CartSession) {
    let mut views = session.subscribe();
    let mut showing = views.borrow_and_update().notice.is_some();

    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let notice = views.borrow_and_update().notice.clone();
            match (showing, notice) {
                (false, Some(notice)) => {
                    println!("🎁 You got a free {}!", notice.gift_name);
                    showing = true;
                }
                (true, None) => {
                    println!("   (gift banner closed)");
                    showing = false;
                }
                _ => {}
            }
        }
    });
}

fn print_help() {
    println!("Commands:");
    println!("  list          Show products");
    println!("  add <id>      Add one unit to the cart");
    println!("  inc <id>      Increase quantity by one");
    println!("  dec <id>      Decrease quantity by one");
    println!("  rm <id>       Remove a line");
    println!("  clear         Empty the cart");
    println!("  dismiss       Close the gift banner");
    println!("  show          Show the cart");
    println!("  quit          Exit");
}

fn print_catalog(session: &CartSession, display: &DisplaySettings) {
    println!("Products:");
    for product in session.products() {
        println!(
            "  [{:>2}] {:<16} {}",
            product.id,
            product.name,
            display.format_amount(product.price)
        );
    }
}

fn print_cart(view: &CartView, display: &DisplaySettings, gift_name: &str) {
    println!();
    println!("Cart Summary");
    println!("------------");
    println!("Subtotal: {}", display.format_amount(view.subtotal));

    // Progress bar only while the gift is still locked.
    if !view.gift_unlocked {
        println!(
            "Add {} more to get a FREE {}!",
            display.format_amount(view.remaining),
            gift_name
        );
        let filled = ((view.progress / 5.0).round() as usize).min(20);
        println!("[{}{}] {:.0}%", "#".repeat(filled), ".".repeat(20 - filled), view.progress);
    }

    if view.is_empty() {
        println!("Your cart is empty");
        return;
    }

    println!("Cart Items");
    for line in &view.lines {
        if view.is_gift(line) {
            println!("  {:<16} FREE GIFT", line.name);
        } else {
            println!(
                "  [{:>2}] {:<16} {} x {} = {}",
                line.id,
                line.name,
                display.format_amount(line.price),
                line.quantity,
                display.format_amount(line.line_total())
            );
        }
    }
}
