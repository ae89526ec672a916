// File: src/repl.rs
// Purpose: Line-oriented command loop driving the engine

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use octothorpe::{Host, MemoryHost, MemorySessions, SessionService, Spa};

pub struct Shell {
    pub spa: Arc<Spa>,
    pub host: Arc<MemoryHost>,
    pub sessions: Arc<MemorySessions>,
}

/// Interactive prompt reading commands from stdin until quit or EOF
pub async fn run(shell: &Shell) -> Result<()> {
    print_help();
    show(shell).await;
    prompt(shell).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(shell, line.trim()).await {
            break;
        }
        prompt(shell).await;
    }
    Ok(())
}

/// Runs a command file line by line, echoing each command
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn run_script(shell: &Shell, source: &str) -> Result<()> {
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("{} {}", ">".dimmed(), line);
        if !dispatch(shell, line).await {
            break;
        }
    }
    Ok(())
}

async fn dispatch(shell: &Shell, line: &str) -> bool {
    let mut parts = line.splitn(3, char::is_whitespace);
    let Some(command) = parts.next().filter(|c| !c.is_empty()) else {
        return true;
    };

    match command {
        "open" => match parts.next() {
            Some(path) => {
                shell.spa.navigate(path).await;
                shell.spa.settle().await;
                show(shell).await;
            }
            None => usage("open <path>"),
        },
        "fill" => match (parts.next(), parts.next()) {
            (Some(id), Some(value)) => {
                let value = value.trim();
                shell.host.set_field(id, value).await;
                println!("  {} {} = {:?}", "✓".green(), id, value);
            }
            _ => usage("fill <field-id> <value>"),
        },
        "submit" => match parts.next() {
            Some(form_id) => {
                if shell.spa.submit(form_id).await {
                    shell.spa.settle().await;
                    show(shell).await;
                } else {
                    println!("  {} no form {:?} on this page", "⚠".yellow(), form_id);
                }
            }
            None => usage("submit <form-id>"),
        },
        "click" => match parts.next() {
            Some(control_id) => {
                if shell.spa.activate(control_id).await {
                    shell.spa.settle().await;
                    show(shell).await;
                } else {
                    println!("  {} no control {:?} on this page", "⚠".yellow(), control_id);
                }
            }
            None => usage("click <control-id>"),
        },
        "show" => show(shell).await,
        "session" => match shell.sessions.user().await {
            Some(user) => println!("  {} {} ({})", "✓".green(), user.email, user.role),
            None => println!("  {} not signed in", "⚠".yellow()),
        },
        "help" => print_help(),
        "quit" | "exit" => return false,
        other => println!(
            "  {} unknown command {:?} (try {})",
            "⚠".yellow(),
            other,
            "help".cyan()
        ),
    }
    true
}

async fn show(shell: &Shell) {
    match shell.host.last_commit().await {
        Some(page) => {
            println!("{}", "----------------------------------------".dimmed());
            println!("{page}");
            println!("{}", "----------------------------------------".dimmed());
        }
        None => println!("  {} nothing rendered yet", "⚠".yellow()),
    }
}

async fn prompt(shell: &Shell) {
    let fragment = shell.host.fragment().await;
    let shown = if fragment.is_empty() {
        "#/".to_string()
    } else {
        fragment
    };
    print!("{} ", shown.cyan().bold());
    let _ = std::io::stdout().flush();
}

fn usage(hint: &str) {
    println!("  {} usage: {}", "⚠".yellow(), hint);
}

fn print_help() {
    println!();
    println!("{}", "Commands".bold());
    println!("  open <path>          navigate, e.g. open /events");
    println!("  fill <field> <text>  set a form field, e.g. fill email a@b.c");
    println!("  submit <form-id>     submit a wired form, e.g. submit loginForm");
    println!("  click <control-id>   activate a wired control, e.g. click registerBtn");
    println!("  show                 print the current page");
    println!("  session              print who is signed in");
    println!("  quit                 leave the shell");
    println!();
}
