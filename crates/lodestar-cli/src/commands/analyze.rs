//! Insight command implementations (analyze, themes)

use std::path::Path;

use anyhow::{Context, Result};
use lodestar_core::insights::display_theme;
use lodestar_core::{InsightCategory, InsightReport, SignalExtractor, ThemeAggregator};

use super::{load_engine, load_responses, truncate};

const EVIDENCE_WIDTH: usize = 70;

pub fn cmd_analyze(
    config_dir: Option<&Path>,
    input: &Path,
    json: bool,
    category: Option<&str>,
) -> Result<()> {
    let category = category
        .map(|c| c.parse::<InsightCategory>())
        .transpose()
        .context("Unknown --category")?;

    let engine = load_engine(config_dir)?;
    let set = load_responses(input)?;
    let report = engine.analyze_set(&set);

    if json {
        let out = match category {
            Some(c) => serde_json::to_string_pretty(report.get(c))?,
            None => serde_json::to_string_pretty(&report)?,
        };
        println!("{}", out);
    } else {
        print!("{}", render_report(&report, category));
    }

    Ok(())
}

/// Render a report for the terminal, optionally limited to one category
pub fn render_report(report: &InsightReport, only: Option<InsightCategory>) -> String {
    let mut lines = vec![
        String::new(),
        "🧭 Lodestar Insights".to_string(),
        "   ─────────────────────────────────────────────────────────────".to_string(),
        format!(
            "   Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
    ];

    for category in InsightCategory::all() {
        if only.is_some_and(|c| c != *category) {
            continue;
        }

        let records = report.get(*category);
        lines.push(String::new());
        lines.push(format!(
            "{} {} ({})",
            icon(*category),
            category.label(),
            records.len()
        ));

        if records.is_empty() {
            lines.push("   (none)".to_string());
            continue;
        }

        for (rank, record) in records.iter().enumerate() {
            lines.push(format!(
                "   {}. {}  [score {:.2}, confidence {:.0}%]",
                rank + 1,
                record.title,
                record.composite_score,
                record.confidence * 100.0
            ));
            lines.push(format!("      {}", record.description));

            let scores: Vec<String> = record
                .scores
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            lines.push(format!("      Scores: {}", scores.join(", ")));

            for quote in &record.evidence_from_self {
                lines.push(format!("      💬 \"{}\"", truncate(quote, EVIDENCE_WIDTH)));
            }
            for quote in &record.evidence_from_advisors {
                lines.push(format!("      👥 \"{}\"", truncate(quote, EVIDENCE_WIDTH)));
            }
            lines.push(format!("      💡 {}", record.advice));
        }
    }

    if only.is_none() && report.is_empty() {
        lines.push(String::new());
        lines.push("   No insights yet. Tag responses with themes to group them.".to_string());
    }

    lines.push(String::new());
    lines.join("\n") + "\n"
}

fn icon(category: InsightCategory) -> &'static str {
    match category {
        InsightCategory::EnergisingStrength => "⚡",
        InsightCategory::HiddenStrength => "🔍",
        InsightCategory::OverusedTalent => "🔥",
        InsightCategory::Aspirational => "🌱",
        InsightCategory::MisalignedEnergy => "🔋",
    }
}

pub fn cmd_themes(config_dir: Option<&Path>, input: &Path, json: bool) -> Result<()> {
    let engine = load_engine(config_dir)?;
    let set = load_responses(input)?;

    let profiles = ThemeAggregator::new(SignalExtractor::new(engine.lexicon()))
        .build_profiles_parallel(&set.self_responses, &set.advisor_responses);

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    println!();
    println!("🗂️  Themes ({})", profiles.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if profiles.is_empty() {
        println!("   (no tagged responses)");
        println!();
        return Ok(());
    }

    for (theme, profile) in &profiles {
        println!();
        println!("   {} ({})", display_theme(theme), theme);

        match &profile.self_profile {
            Some(own) => {
                println!(
                    "      Self ({} responses): energy {:.2}, skill {:.2}, confidence {:.2}, drain {:.2}",
                    own.frequency, own.avg_energy, own.avg_skill, own.avg_confidence, own.avg_drain
                );
                println!(
                    "         frequency {:.2}, interest {:.2}, level {:.2}, potential {:.2}",
                    own.avg_frequency, own.avg_interest, own.avg_current_level, own.avg_potential
                );
            }
            None => println!("      Self: (not mentioned)"),
        }

        match &profile.advisor_profile {
            Some(observed) => println!(
                "      Advisors ({}, credibility {:.2}): recognition {:.2}, competence {:.2}, burnout {:.2}, development {:.2}",
                observed.frequency,
                observed.mean_credibility(),
                observed.weighted_recognition,
                observed.weighted_competence,
                observed.weighted_burnout_concern,
                observed.weighted_development_potential
            ),
            None => println!("      Advisors: (not mentioned)"),
        }
    }

    println!();
    Ok(())
}
