//! Nested Policies
//!
//! This example demonstrates policy composition: a parent policy
//! delegates to sub-policies and absorbs their findings, re-qualifying
//! the field tags while the original messages and translation scopes
//! survive untouched.
//!
//! Run with: cargo run --example nested_policies

use verdict::{tags, Catalog, Message, Policy, RuleSet, TagValue, Violations};

struct Section {
    heading: String,
    body: String,
}

#[derive(Debug)]
struct SectionPolicy {
    heading: String,
    body: String,
}

impl SectionPolicy {
    fn heading_presence(&self, violations: &mut Violations) {
        if self.heading.is_empty() {
            violations.add(
                Message::key("empty_heading"),
                tags! { "field" => "heading", "level" => "error" },
            );
        }
    }

    fn body_presence(&self, violations: &mut Violations) {
        if self.body.is_empty() {
            violations.add(
                "Body is empty",
                tags! { "field" => "body", "level" => "error" },
            );
        }
    }
}

impl Policy for SectionPolicy {
    fn rules() -> RuleSet<Self> {
        RuleSet::builder()
            .named("heading_presence", Self::heading_presence)
            .named("body_presence", Self::body_presence)
            .build()
    }
}

#[derive(Debug)]
struct ArticlePolicy {
    title: String,
    sections: Vec<(String, String)>,
}

impl ArticlePolicy {
    fn new(title: &str, sections: &[Section]) -> Self {
        ArticlePolicy {
            title: title.to_string(),
            sections: sections
                .iter()
                .map(|section| (section.heading.clone(), section.body.clone()))
                .collect(),
        }
    }

    fn title_presence(&self, violations: &mut Violations) {
        if self.title.is_empty() {
            violations.add(
                "Title is empty",
                tags! { "field" => "title", "level" => "error" },
            );
        }
    }

    fn sections_ready(&self, violations: &mut Violations) {
        for (index, (heading, body)) in self.sections.iter().enumerate() {
            let outcome = SectionPolicy {
                heading: heading.clone(),
                body: body.clone(),
            }
            .evaluate();

            violations.merge_with(
                outcome.violations(),
                tags! { "source" => "section" },
                |tags| {
                    if let Some(field) = tags.get("field").and_then(TagValue::as_str) {
                        let qualified = format!("sections[{index}].{field}");
                        tags.insert("field".to_string(), qualified.into());
                    }
                },
            );
        }
    }
}

impl Policy for ArticlePolicy {
    fn rules() -> RuleSet<Self> {
        RuleSet::builder()
            .named("title_presence", Self::title_presence)
            .named("sections_ready", Self::sections_ready)
            .build()
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let catalog = Catalog::new().with(
        "en",
        "verdict.section_policy.empty_heading",
        "Heading is empty",
    );

    println!("=== Nested Policies Example ===\n");

    let sections = [
        Section {
            heading: "Introduction".to_string(),
            body: "Why policies compose.".to_string(),
        },
        Section {
            heading: String::new(),
            body: String::new(),
        },
    ];

    let outcome = ArticlePolicy::new("", &sections).evaluate();

    println!("Violations ({} total):", outcome.violations().len());
    for violation in outcome.violations() {
        println!(
            "  - {} (field: {})",
            violation.message(&catalog, "en"),
            violation.tag_str("field").unwrap_or("?"),
        );
    }

    println!("\nMessages, sorted:");
    for message in outcome.violations().messages(&catalog, "en") {
        println!("  - {message}");
    }
}
