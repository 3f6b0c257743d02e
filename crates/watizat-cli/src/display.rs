//! Terminal rendering of posts, comments and volunteers.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use watizat_core::category::{Categorized, CategoryStore};
use watizat_core::post::{Comment, Post, PostType};
use watizat_core::volunteer::VolunteerProfile;
use watizat_core::SidebarItem;

const SNIPPET_CHARS: usize = 160;

/// "just now", "5m ago", "3h ago", "2d ago", then the date
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

pub fn snippet(text: &str, max: usize) -> String {
    let text = text.trim().replace('\n', " ");
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn type_badge(post_type: PostType) -> ColoredString {
    match post_type {
        PostType::Need => "NEED ".red().bold(),
        PostType::Offer => "OFFER".green().bold(),
    }
}

/// Category icons and labels, e.g. `🍽️ Food, ⚖️ Legal`
pub fn category_line(store: &CategoryStore, ids: &[String]) -> String {
    ids.iter()
        .map(|id| {
            let def = store.lookup(id);
            format!("{} {}", def.icon, def.label)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_post(post: &Post, store: &CategoryStore, now: DateTime<Utc>) {
    println!(
        "{} {}  {}",
        type_badge(post.post_type),
        post.title.bold(),
        format!("#{}", post.id).dimmed()
    );
    println!(
        "      {}  ·  {}  ·  {}",
        category_line(store, post.category_set()).cyan(),
        post.author_name(),
        relative_time(post.created_at, now).dimmed()
    );
    println!("      {}", snippet(&post.description, SNIPPET_CHARS));
    if let Some(address) = post.location.as_ref().and_then(|l| l.address.as_deref()) {
        println!("      📍 {}", address);
    }
    if !post.images.is_empty() {
        println!("      🖼  {} image(s)", post.images.len());
    }
}

pub fn print_comment(comment: &Comment, now: DateTime<Utc>) {
    println!(
        "      {} {}: {}",
        "↳".dimmed(),
        comment.author_name().bold(),
        comment.comment
    );
    println!("        {}", relative_time(comment.created_at, now).dimmed());
}

pub fn print_volunteer(volunteer: &VolunteerProfile, store: &CategoryStore) {
    let area = match volunteer.area() {
        Some(area) => format!("{} {}", area.icon(), area.label()),
        None => volunteer
            .professional_area
            .clone()
            .unwrap_or_else(|| "-".to_string()),
    };
    println!("{}  {}", volunteer.public_name().bold(), area.cyan());
    if !volunteer.help_categories.is_empty() {
        println!(
            "    helps with: {}",
            category_line(store, &volunteer.help_categories)
        );
    }
    if let Some(experience) = volunteer.experience() {
        println!("    experience: {} years", experience);
    }
    if !volunteer.languages.is_empty() {
        println!("    languages: {}", volunteer.languages.join(", "));
    }
    if let Some(availability) = volunteer.availability.as_deref().filter(|a| !a.is_empty()) {
        println!("    availability: {}", availability);
    }
}

pub fn print_sidebar_item(item: &SidebarItem) {
    let marker = if item.is_job() { "💼" } else { "📣" };
    println!("{} {}", marker, item.title.bold());
    if !item.content.is_empty() {
        println!("   {}", snippet(&item.content, SNIPPET_CHARS));
    }
    if let Some(link) = &item.link_url {
        let text = item.link_text.as_deref().unwrap_or("Link");
        println!("   {}: {}", text, link.underline());
    }
    if let Some(source) = &item.source {
        println!("   {}", format!("via {}", source).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
        assert_eq!(relative_time(now - Duration::days(30), now), "2024-04-10");
    }

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("  short\ntext ", 20), "short text");
        assert_eq!(snippet("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_category_line_unknown() {
        let store = CategoryStore::builtin();
        let line = category_line(&store, &["xyz".to_string()]);
        assert_eq!(line, "📝 xyz");
    }
}
