use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use shortener::config::AppConfig;
use shortener::services::LinkService;
use shortener::storage::OwnerId;
use shortener::utils::url::{normalize_destination, validate_destination};

fn main() {
    let config = AppConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.logging.level.clone()))
        .with_writer(io::stderr)
        .init();

    let service = LinkService::new(config.links.clone());

    println!("{}", "Welcome to the console URL shortener!".green().bold());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut current_owner: Option<OwnerId> = None;

    loop {
        println!();
        println!("{}", "Menu:".bold());
        println!("1. Authorize (enter an existing UUID or generate a new one)");
        println!("2. Create a short link");
        println!("3. Visit a short link");
        println!("4. Delete a link");
        println!("5. Edit a link's click limit");
        println!("6. List your links");
        println!("7. Exit");
        print!("Choose an action: ");
        let _ = io::stdout().flush();

        let choice = match read_line(&mut lines) {
            Some(line) => line,
            None => break,
        };

        match choice.trim() {
            "1" => current_owner = authorize(&mut lines),
            "2" => {
                let Some(owner) = require_owner(current_owner) else {
                    continue;
                };
                create_flow(&mut lines, owner, &service);
            }
            "3" => {
                let code = prompt(&mut lines, "Enter the short link (test.ru/AbCdE1): ");
                visit(&service, code.trim());
            }
            "4" => {
                let Some(owner) = require_owner(current_owner) else {
                    continue;
                };
                let code = prompt(&mut lines, "Enter the short link to delete: ");
                match service.delete(code.trim(), owner) {
                    Ok(()) => println!("{}", "Link deleted.".green()),
                    Err(e) => println!("{}", e.format_colored()),
                }
            }
            "5" => {
                let Some(owner) = require_owner(current_owner) else {
                    continue;
                };
                let code = prompt(&mut lines, "Enter the short link to edit: ");
                print!("Enter the new click limit: ");
                let _ = io::stdout().flush();
                let new_limit = read_u32(&mut lines, 1);
                match service.edit_click_limit(code.trim(), owner, new_limit) {
                    Ok(limit) => println!("New click limit: {}", limit),
                    Err(e) => println!("{}", e.format_colored()),
                }
            }
            "6" => {
                let Some(owner) = require_owner(current_owner) else {
                    continue;
                };
                list_links(&service, owner);
            }
            "7" => break,
            _ => println!("{}", "Invalid input, try again.".yellow()),
        }

        // Expired links are cleaned up after every interaction.
        let removed = service.sweep();
        debug!("post-interaction sweep removed {} link(s)", removed);
    }

    println!("Goodbye.");
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next().and_then(|l| l.ok())
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    read_line(lines).unwrap_or_default()
}

/// Reads an integer, falling back to the default on invalid input.
fn read_u32(lines: &mut impl Iterator<Item = io::Result<String>>, default: u32) -> u32 {
    match read_line(lines) {
        Some(line) => line.trim().parse().unwrap_or(default),
        None => default,
    }
}

fn require_owner(current: Option<OwnerId>) -> Option<OwnerId> {
    if current.is_none() {
        println!("{}", "Please authorize first (menu item 1).".yellow());
    }
    current
}

fn authorize(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<OwnerId> {
    println!("1. Enter an existing UUID");
    println!("2. Generate a new UUID");
    let choice = prompt(lines, "Choose an option: ");

    match choice.trim() {
        "1" => {
            let input = prompt(lines, "Enter your UUID: ");
            match OwnerId::parse(&input) {
                Ok(owner) => {
                    println!("Welcome back! Your id is {}", owner);
                    Some(owner)
                }
                Err(e) => {
                    println!("{}", e.format_colored());
                    None
                }
            }
        }
        "2" => {
            let owner = OwnerId::generate();
            println!("Generated a new id: {}", owner.to_string().cyan());
            Some(owner)
        }
        _ => {
            println!("{}", "Invalid input, not authorized.".yellow());
            None
        }
    }
}

fn create_flow(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    owner: OwnerId,
    service: &LinkService,
) {
    let url = prompt(lines, "Enter the destination URL: ");

    if let Err(e) = validate_destination(&normalize_destination(&url)) {
        println!("{} {}", "[ERROR]".red().bold(), e);
        return;
    }

    print!("Enter the desired lifetime in hours: ");
    let _ = io::stdout().flush();
    let hours = read_u32(lines, 1);

    print!("Enter the desired click limit: ");
    let _ = io::stdout().flush();
    let clicks = read_u32(lines, 1);

    let link = service.create(owner, &url, hours, clicks);
    let lifetime_hours = (link.expires_at - link.created_at).num_hours();

    println!();
    println!("{}", "Short link created!".green());
    println!("Code: {}", link.code.cyan());
    println!("Lifetime (hours): {}", lifetime_hours);
    println!("Click limit: {}", link.click_limit);
}

fn visit(service: &LinkService, code: &str) {
    match service.resolve(code) {
        Ok(resolved) => {
            if resolved.last_use {
                println!(
                    "{}",
                    "Warning: that was the last available visit, the link is now blocked."
                        .yellow()
                );
            }
            // Launching a browser is out of scope here. The click is already
            // committed, so any launch failure would not roll it back.
            println!(
                "Open this URL in your browser: {}",
                resolved.destination.cyan().underline()
            );
        }
        Err(e) => println!("{}", e.format_colored()),
    }
}

fn list_links(service: &LinkService, owner: OwnerId) {
    let links = service.list_for(owner);
    if links.is_empty() {
        println!("You have no links (or they were all removed).");
        return;
    }

    println!("Your links:");
    for entry in links {
        println!(
            "{} -> {}",
            entry.link.code.cyan(),
            entry.link.destination
        );
        println!(
            "  Click limit: {}, clicks: {}, expires: {}",
            entry.link.click_limit, entry.link.click_count, entry.link.expires_at
        );
        println!("  Available: {}", if entry.available { "yes" } else { "no" });
    }
}
