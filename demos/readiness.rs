//! Readiness Validation
//!
//! This example demonstrates the core policy workflow.
//!
//! Key concepts:
//! - Declaring rules once per policy type
//! - Literal and symbolic (translated) violation messages
//! - Filtered validity for warning-level findings
//! - Raising a ValidationError on demand
//!
//! Run with: cargo run --example readiness

use verdict::{tags, Catalog, Message, Policy, RuleSet, Violation, Violations};

struct Article {
    title: String,
    subtitle: String,
    text: String,
}

#[derive(Debug)]
struct ReadinessPolicy {
    title: String,
    subtitle: String,
    text: String,
}

impl ReadinessPolicy {
    fn new(article: &Article) -> Self {
        ReadinessPolicy {
            title: article.title.clone(),
            subtitle: article.subtitle.clone(),
            text: article.text.clone(),
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

    fn subtitle_presence(&self, violations: &mut Violations) {
        if self.subtitle.is_empty() {
            violations.add(
                "Subtitle is empty",
                tags! { "field" => "subtitle", "level" => "warning" },
            );
        }
    }

    fn text_presence(&self, violations: &mut Violations) {
        if self.text.is_empty() {
            violations.add(
                Message::key("empty_text"),
                tags! { "field" => "text", "level" => "error" },
            );
        }
    }
}

impl Policy for ReadinessPolicy {
    fn rules() -> RuleSet<Self> {
        RuleSet::builder()
            .named("title_presence", Self::title_presence)
            .named("subtitle_presence", Self::subtitle_presence)
            .named("text_presence", Self::text_presence)
            .build()
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let catalog = Catalog::new().with(
        "en",
        "verdict.readiness_policy.empty_text",
        "Validation error: text is empty",
    );

    println!("=== Readiness Validation Example ===\n");

    // Example 1: a ready article passes every rule
    println!("Example 1: Valid Article");
    let ready = Article {
        title: "Fearless Concurrency".to_string(),
        subtitle: "Threads without data races".to_string(),
        text: "Ownership makes it possible.".to_string(),
    };
    let outcome = ReadinessPolicy::new(&ready).evaluate();
    println!("  valid: {}\n", outcome.is_valid());

    // Example 2: findings with tags and translations
    println!("Example 2: Collected Violations");
    let draft = Article {
        title: String::new(),
        subtitle: "still here".to_string(),
        text: String::new(),
    };
    let outcome = ReadinessPolicy::new(&draft).evaluate();
    for message in outcome.violations().messages(&catalog, "en") {
        println!("  - {message}");
    }
    println!();

    // Example 3: warnings can be ignored without losing errors
    println!("Example 3: Filtered Validity");
    let sloppy = Article {
        title: "Fearless Concurrency".to_string(),
        subtitle: String::new(),
        text: "Ownership makes it possible.".to_string(),
    };
    let outcome = ReadinessPolicy::new(&sloppy).evaluate();
    let ignore_warnings = |v: &Violation| v.tag_str("level") == Some("warning");
    println!("  strictly valid:  {}", outcome.is_valid());
    println!("  ignoring warns:  {}\n", outcome.is_valid_where(ignore_warnings));

    // Example 4: raising on demand
    println!("Example 4: ValidationError");
    let outcome = ReadinessPolicy::new(&draft).evaluate();
    match outcome.ensure_valid(&catalog, "en") {
        Ok(_) => println!("  unexpectedly valid"),
        Err(error) => println!("  {error}"),
    }
}
