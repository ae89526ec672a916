// File: src/seed.rs
// Purpose: Demo fixtures so a fresh shell has something to browse

use chrono::{Duration, Utc};
use colored::Colorize;

use octothorpe::{Config, Event, MemoryEvents, MemorySessions, NewUser, Role, SessionService};

const SAMPLE_EVENTS: &[(&str, &str, &str, u32)] = &[
    (
        "Rust Meetup",
        "Monthly talks and a hallway track.",
        "Community Hall",
        40,
    ),
    (
        "Intro to Systems Programming",
        "A hands-on evening workshop.",
        "Lab 2",
        16,
    ),
    (
        "Open Source Sprint",
        "Bring a laptop, pick an issue.",
        "Library Annex",
        25,
    ),
    (
        "Tech Careers Panel",
        "Q&A with local engineers.",
        "Auditorium",
        120,
    ),
    ("Hack Night", "Informal build session.", "Cowork Loft", 30),
];

/// Creates the demo admin account and a handful of upcoming events
pub async fn run(config: &Config, sessions: &MemorySessions, events: &MemoryEvents) {
    let admin = NewUser {
        name: "Admin".to_string(),
        email: config.demo.admin_email.clone(),
        password: config.demo.admin_password.clone(),
        role: Role::Admin,
    };
    match sessions.register_user(admin).await {
        Ok(()) => println!(
            "  {} Admin account {}",
            "✓".green(),
            config.demo.admin_email.cyan()
        ),
        Err(err) => println!("  {} Admin account ({})", "⚠".yellow(), err),
    }

    let today = Utc::now().date_naive();
    let mut seeded = 0;
    for (offset, &(title, description, location, capacity)) in SAMPLE_EVENTS
        .iter()
        .cycle()
        .take(config.demo.event_count)
        .enumerate()
    {
        // Dates land one per day starting a week out
        let date = today + Duration::days(offset as i64 + 7);
        events
            .insert(Event {
                id: offset as i64 + 1,
                title: title.to_string(),
                description: description.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                time: "18:30".to_string(),
                location: location.to_string(),
                capacity,
                registered_count: 0,
                created_by: None,
            })
            .await;
        seeded += 1;
    }
    println!("  {} {} demo events", "✓".green(), seeded);
}
