use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{CategoryChart, LedgerService, MonthlyTotal, Summary};
use crate::domain::{format_amount, ExpenseRecord};
use crate::io::{ExportFormat, Exporter};
use crate::DEFAULT_DATA_FILE;

pub const NO_EXPENSES: &str = "No expenses yet.";
pub const NO_MATCHING_CATEGORY: &str = "No matching category.";
pub const NO_MONTHLY_DATA: &str = "No data.";

const BAR_WIDTH: usize = 30;

/// Spendbook - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "Record personal expenses and summarize where the money goes")]
#[command(version)]
pub struct Cli {
    /// Data file path
    #[arg(short, long, global = true, default_value = DEFAULT_DATA_FILE)]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an expense dated today
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Category (e.g., "Food", "Rent")
        category: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List every expense in the order it was recorded
    List,

    /// List expenses in one category (case-insensitive)
    Filter {
        /// Category to match
        category: String,
    },

    /// Show total and average spending
    Summary,

    /// Show totals per month
    Monthly,

    /// Show the spending breakdown by category
    Chart {
        /// Output format
        #[arg(long, value_enum, default_value_t = ChartFormat::Table)]
        format: ChartFormat,
    },

    /// Export expenses to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short = 'F', long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    Table,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = LedgerService::open(&self.file)?;

        match self.command {
            Commands::Add {
                amount,
                category,
                note,
            } => {
                let record = service.add_expense(&amount, &category, &note)?;
                // Already in memory: a failed save is reported apart from validation
                service.save().with_context(|| {
                    format!(
                        "Expense recorded but could not be saved to {}: {}",
                        service.data_path().display(),
                        record.display_line()
                    )
                })?;
                println!("Expense added successfully!");
                println!("  {}", record.display_line());
            }

            Commands::List => {
                print_lines(&expense_lines(service.list_all(), NO_EXPENSES));
            }

            Commands::Filter { category } => {
                let matches = service.filter_by_category(&category);
                print_lines(&expense_lines(&matches, NO_MATCHING_CATEGORY));
            }

            Commands::Summary => match service.summary() {
                Ok(summary) => print_lines(&summary_lines(&summary)),
                Err(e) if e.is_informational() => println!("{}", e),
                Err(e) => return Err(e.into()),
            },

            Commands::Monthly => {
                print_lines(&monthly_lines(&service.monthly_totals()));
            }

            Commands::Chart { format } => match service.category_chart() {
                Ok(chart) => match format {
                    ChartFormat::Table => print_lines(&chart_lines(&chart)),
                    ChartFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
                },
                Err(e) if e.is_informational() => println!("{}", e),
                Err(e) => return Err(e.into()),
            },

            Commands::Export { format, output } => {
                let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                let exporter = Exporter::new(service.list_all());

                let count = match output.as_deref() {
                    Some(path) => {
                        let file = File::create(path)
                            .with_context(|| format!("Failed to create {}", path))?;
                        let count = exporter.export(format, BufWriter::new(file))?;
                        eprintln!("Exported {} expense(s) to {}", count, path);
                        count
                    }
                    None => exporter.export(format, io::stdout().lock())?,
                };
                tracing::debug!(count, "export finished");
            }
        }

        Ok(())
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Numbered expense lines, or `empty_message` when there are none.
pub fn expense_lines(records: &[ExpenseRecord], empty_message: &str) -> Vec<String> {
    if records.is_empty() {
        return vec![empty_message.to_string()];
    }
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. {}", i + 1, record.display_line()))
        .collect()
}

pub fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("Total Spent: {}", format_amount(summary.total)),
        format!("Average Spending: {}", format_amount(summary.average)),
    ]
}

pub fn monthly_lines(totals: &[MonthlyTotal]) -> Vec<String> {
    if totals.is_empty() {
        return vec![NO_MONTHLY_DATA.to_string()];
    }
    totals
        .iter()
        .map(|m| format!("{}: {}", m.month, format_amount(m.total)))
        .collect()
}

/// Text rendering of the pie chart: one bar per slice, percentages with one decimal.
pub fn chart_lines(chart: &CategoryChart) -> Vec<String> {
    let label_width = chart
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut lines = vec![chart.title.clone(), "-".repeat(chart.title.len())];
    for slice in &chart.slices {
        let filled = ((slice.percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "{:<width$} {:>12} {:>6.1}% {}",
            slice.label,
            format_amount(slice.amount),
            slice.percentage,
            "#".repeat(filled),
            width = label_width
        ));
    }
    lines
}
