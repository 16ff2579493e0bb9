use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mindstamps::game::{GameSummary, RoundResult};
use mindstamps::geo::Coordinate;
use mindstamps::journal::PageView;
use mindstamps::scorer::{GuessScore, Scorer};

const STORY_PREVIEW_CHARS: usize = 60;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn preview(story: &str) -> String {
    let mut out: String = story.chars().take(STORY_PREVIEW_CHARS).collect();
    if story.chars().count() > STORY_PREVIEW_CHARS {
        out.push('…');
    }
    out
}

fn points_color(points: u32) -> Color {
    match points {
        0 => Color::Red,
        p if p >= 800 => Color::Green,
        _ => Color::Yellow,
    }
}

pub fn guess(guess: Coordinate, actual: Coordinate, scored: &GuessScore, scorer: &Scorer) {
    println!("Guess:    {}", guess);
    println!("Actual:   {}", actual);
    println!("Distance: {:.1} km", scored.distance_km);
    println!(
        "Points:   {} / {}",
        scored.points,
        scorer.tiers.max_points()
    );
}

pub fn journal_page(view: &PageView<'_>, total_records: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Id"),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Place"),
        Cell::new("Created"),
        Cell::new("Photo"),
        Cell::new("Story"),
    ]);

    for (slot, record) in view.records.iter().enumerate() {
        let place = record
            .location
            .as_ref()
            .map_or_else(|| "-".to_string(), |l| l.name.clone());
        let editing = view
            .editing
            .is_some_and(|b| b.record_id() == &record.id);

        let mut title = Cell::new(&record.title).add_attribute(Attribute::Bold);
        if editing {
            title = title.fg(Color::Cyan);
        }

        table.add_row(vec![
            Cell::new(if slot == 0 { "left" } else { "right" }),
            Cell::new(record.id.as_str()),
            title,
            Cell::new(place),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(if record.has_photo() { "yes" } else { "no" }),
            Cell::new(preview(&record.story)),
        ]);
    }

    if view.records.is_empty() {
        println!("\nNo memories yet.");
    } else {
        println!("\n{}", table);
    }
    println!(
        "Page {} of {} ({} memories)",
        view.index + 1,
        view.total_pages,
        total_records
    );
}

pub fn rounds(results: &[RoundResult]) {
    if results.is_empty() {
        println!("No rounds played.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Round").add_attribute(Attribute::Bold),
        Cell::new("Place"),
        Cell::new("Guess"),
        Cell::new("Actual"),
        Cell::new("Distance km"),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    for i in [0, 4, 5] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, r) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.place),
            Cell::new(r.guess.to_string()),
            Cell::new(r.actual.to_string()),
            Cell::new(format!("{:.1}", r.distance_km)),
            Cell::new(r.points).fg(points_color(r.points)),
        ]);
    }
    println!("\n{}", table);
}

pub fn summary(summary: &GameSummary) {
    println!(
        "Finished {} rounds: {} points total, {} per memory",
        summary.rounds, summary.total_score, summary.average_score
    );
}
