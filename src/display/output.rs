use crate::analysis::recommender::CounterSuggestion;
use crate::analysis::scoring::CounterScore;
use crate::draft::{DraftBoard, Side, MAX_PICKS};
use crate::roster::character::Character;
use crate::roster::Roster;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "#")]
    id: String,
    hero: String,
    role: String,
    lane: String,
    tier: String,
    difficulty: String,
    utility: String,
}

#[derive(Tabled)]
struct SuggestionRow {
    rank: String,
    hero: String,
    role: String,
    delta: String,
    counters: String,
    score: String,
}

fn colored_delta(delta: f64) -> String {
    let text = format!("{}{:.1}%", if delta > 0.0 { "+" } else { "" }, delta);
    if delta > 3.0 {
        text.green().to_string()
    } else if delta > 0.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn names(heroes: &[&Character]) -> String {
    if heroes.is_empty() {
        "-".to_string()
    } else {
        heroes
            .iter()
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn display_heroes(heroes: &[&Character], total: usize) {
    println!(
        "\n{}",
        format!("📜 HEROES ({} of {})", heroes.len(), total).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if heroes.is_empty() {
        println!("{}", "No heroes match your filters.".yellow());
        return;
    }

    let rows: Vec<HeroRow> = heroes
        .iter()
        .map(|h| HeroRow {
            id: h.id.clone(),
            hero: h.name.clone(),
            role: h.role.clone(),
            lane: h.lane.clone(),
            tier: h.tier.to_string(),
            difficulty: "★".repeat(h.difficulty as usize),
            utility: h.utility.join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_rolled_hero(hero: &Character, pool_size: usize) {
    println!(
        "\n{} {} ({}, {}) out of {} matching heroes\n",
        "🎲 Rolled:".bold().cyan(),
        hero.name.bold(),
        hero.primary_role(),
        hero.primary_lane(),
        pool_size
    );
}

pub fn display_hero_detail(hero: &Character, roster: &Roster) {
    println!(
        "\n{}",
        format!("🛡️  {}: {}", hero.name, hero.title).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    println!("{} {}", "Role:".bold(), hero.roles().join(" / "));
    println!("{} {}", "Lane:".bold(), hero.lanes().join(" / "));
    println!("{} {}", "Specialty:".bold(), hero.specialty);
    println!("{} {}", "Tier:".bold(), hero.tier);
    println!(
        "{} {}",
        "Difficulty:".bold(),
        "★".repeat(hero.difficulty as usize)
    );
    println!("{} {}", "Utility:".bold(), hero.utility.join(", "));
    if !hero.core_items.is_empty() {
        println!("{} {}", "Core items:".bold(), hero.core_items.join(", "));
    }

    let counters = roster.resolve_names(&hero.counters);
    let synergies = roster.resolve_names(&hero.synergies);
    println!("{} {}", "Counters:".bold(), names(&counters));
    println!("{} {}", "Synergies:".bold(), names(&synergies));

    let unresolved = hero.counters.len() + hero.synergies.len() - counters.len() - synergies.len();
    if unresolved > 0 {
        println!(
            "  {} {} referenced hero name(s) not found in the roster",
            "⚠️".yellow(),
            unresolved
        );
    }
    println!();
}

pub fn display_score(hero: &Character, enemies: &[&Character], result: &CounterScore) {
    println!(
        "\n{}",
        format!("🎯 {} vs {}", hero.name, names(enemies)).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    println!("{} {}", "Avg win-rate delta:".bold(), colored_delta(result.avg_delta));
    println!("{} {}", "Counters:".bold(), result.counters_count);
    println!("{} {:.2}\n", "Score:".bold(), result.score);
}

pub fn display_suggestions(suggestions: &[CounterSuggestion], enemies: &[&Character]) {
    println!("\n{}", "📈 COUNTER SUGGESTIONS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if enemies.is_empty() {
        println!("{}", "Select enemy heroes to see counter suggestions.".yellow());
        return;
    }
    println!("{} {}\n", "Enemy team:".bold(), names(enemies));

    if suggestions.is_empty() {
        println!("{}", "No candidates left to suggest.".yellow());
        return;
    }

    let rows: Vec<SuggestionRow> = suggestions
        .iter()
        .enumerate()
        .map(|(idx, s)| SuggestionRow {
            rank: format!("#{}", idx + 1),
            hero: s.hero.name.clone(),
            role: s.hero.primary_role().to_string(),
            delta: colored_delta(s.avg_win_rate_delta),
            counters: format!("{}/{}", s.counters_count, enemies.len()),
            score: format!("{:.2}", s.score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Delta: average win-rate advantage against the enemy picks");
    println!("• Counters: enemy picks this hero beats by more than 2%");
    println!("• Score: 2 × delta + 5 × counters (higher = better counter)\n");
}

pub fn display_draft_board(board: &DraftBoard) {
    let session = board.session();
    let enemy = board.picked_heroes(Side::Enemy);
    let ally = board.picked_heroes(Side::Ally);

    println!(
        "\n{} ({}/{}) {}",
        "🎯 Enemy Team".bold().red(),
        enemy.len(),
        MAX_PICKS,
        names(&enemy)
    );
    println!(
        "{} ({}/{}) {}",
        "🛡️  Your Team".bold().blue(),
        ally.len(),
        MAX_PICKS,
        names(&ally)
    );

    if !session.search().is_empty() {
        let shown: Vec<&Character> = board.available().iter().take(50).copied().collect();
        println!(
            "{} '{}' → {}",
            "🔎 Search".bold(),
            session.search(),
            names(&shown)
        );
    }

    display_suggestions(board.suggestions(), &enemy);
}

pub fn display_draft_help() {
    println!("\n{}", "Draft commands".bold().yellow());
    println!("  enemy <hero>           add an enemy pick");
    println!("  ally <hero>            add an ally pick");
    println!("  remove <side> <hero>   remove a pick (side: enemy | ally)");
    println!("  search <text>          filter available heroes by name");
    println!("  reset                  clear both teams and the search");
    println!("  show                   print the board again");
    println!("  quit                   leave the draft\n");
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
