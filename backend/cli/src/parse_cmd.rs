//! CLI Parse Command
//!
//! Runs the extraction engine on text that was already recognized, without
//! going through OCR or the HTTP gateway.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use nutrilens_core::{Nutrient, NutritionRecord};
use nutrilens_understanding::{analyze_label, LabelAnalysis};

use crate::terminal_output::{render_table, styled, Column, DIM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub async fn run(file: Option<&Path>, format: OutputFormat, show_cleaned: bool) -> Result<()> {
    let raw = read_input(file).await?;
    let analysis = analyze_label(&raw);
    print!("{}", render(&analysis, format, show_cleaned)?);
    Ok(())
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render(analysis: &LabelAnalysis, format: OutputFormat, show_cleaned: bool) -> Result<String> {
    let mut out = String::new();
    if show_cleaned {
        out.push_str(&styled(DIM, "cleaned:"));
        out.push(' ');
        out.push_str(analysis.cleaned.as_str());
        out.push_str("\n\n");
    }
    match format {
        OutputFormat::Json => {
            out.push_str(&serde_json::to_string_pretty(&analysis.record)?);
            out.push('\n');
        }
        OutputFormat::Table => out.push_str(&record_table(&analysis.record)),
    }
    Ok(out)
}

fn record_table(record: &NutritionRecord) -> String {
    if record.is_empty() {
        return "No nutrition facts found.\n".to_string();
    }

    let columns = [
        Column::left("Nutrient"),
        Column::right("Amount"),
        Column::left("Unit"),
    ];
    let mut rows: Vec<Vec<String>> = record
        .iter()
        .map(|(nutrient, value)| {
            vec![
                nutrient.to_string(),
                value.to_string(),
                nutrient.unit().unwrap_or_default().to_string(),
            ]
        })
        .collect();

    if let Some(dv) = &record.daily_value {
        for (nutrient, percent) in [
            (Nutrient::TotalFat, dv.total_fat_percent),
            (Nutrient::TotalCarbohydrate, dv.total_carbohydrate_percent),
        ] {
            rows.push(vec![
                format!("{nutrient} (daily value)"),
                percent.to_string(),
                "%".to_string(),
            ]);
        }
    }

    render_table(&columns, &rows)
}
