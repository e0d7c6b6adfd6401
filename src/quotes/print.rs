use colored::Colorize;
use quotes::api::{CmdMessage, HomeView, ListView, MessageLevel};
use quotes::config::{QuotesConfig, CONFIG_KEYS};
use quotes::model::Quote;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const AUTHOR_WIDTH: usize = 24;
const RATING_WIDTH: usize = 8;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_quote(quote: &Quote) {
    println!("\u{201c}{}\u{201d}", quote.text.bold());
    println!("    - {}", quote.author.italic());
    let mut footer = format!("[{}]", quote.category_str());
    if let Some(rating) = quote.rating {
        footer.push_str(&format!("  {:.1}/5", rating));
    }
    println!("    {}", footer.dimmed());
}

pub(super) fn print_home(view: &HomeView) {
    print_quote(&view.quote);
    if let Some(notice) = view.notice() {
        print_messages(&[notice]);
    }
}

pub(super) fn print_list(view: &ListView) {
    if view.quotes.is_empty() {
        println!("No quotes found.");
        return;
    }

    for iq in &view.quotes {
        let idx_str = format!("{:>4}. ", iq.id);
        let rating_str = match iq.quote.rating {
            Some(r) => format!("{:>5.1}", r),
            None => format!("{:>5}", "-"),
        };
        let author = truncate_to_width(&iq.quote.author, AUTHOR_WIDTH);
        let author_padding = AUTHOR_WIDTH.saturating_sub(author.width());

        let fixed_width = idx_str.width() + AUTHOR_WIDTH + RATING_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let text: String = iq
            .quote
            .text
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let text = truncate_to_width(&text, available);
        let text_padding = available.saturating_sub(text.width());

        println!(
            "{}{}{}  {}{}{}",
            idx_str.yellow(),
            text,
            " ".repeat(text_padding),
            author.italic(),
            " ".repeat(author_padding),
            rating_str.dimmed()
        );
    }

    let p = &view.pagination;
    println!();
    println!(
        "{}",
        format!(
            "Page {} of {} ({} quotes, category: {}, sorted by {} {})",
            p.page,
            p.total_pages,
            p.total,
            view.selected_category,
            view.sort_by,
            view.sort_order
        )
        .dimmed()
    );
    if let Some(next) = p.next_page {
        println!("{}", format!("Next: quotes list --page {}", next).dimmed());
    }
}

pub(super) fn print_categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!("{}", category);
    }
}

pub(super) fn print_config(config: &QuotesConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
