use crate::alert::{Alert, Analysis};
use crate::error::AlerterError;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use configuration::{DisplaySettings, OutputFormat};
use core_types::PressureResult;
use pressure::SqueezeAssessment;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Renders alerts in the configured presentation format.
#[derive(Debug, Clone)]
pub struct AlertRenderer {
    settings: DisplaySettings,
}

impl AlertRenderer {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings }
    }

    pub fn format(&self) -> OutputFormat {
        self.settings.format
    }

    pub fn render(&self, alerts: &[Alert]) -> Result<String, AlerterError> {
        match self.settings.format {
            OutputFormat::Text => Ok(self.render_text(alerts)),
            OutputFormat::Table => Ok(self.render_table(alerts)),
            OutputFormat::Json => self.render_json(alerts),
        }
    }

    /// One block per alert under a dashboard header.
    pub fn render_text(&self, alerts: &[Alert]) -> String {
        let mut out = format!("--- {} ---\n", self.settings.title);
        for alert in alerts {
            out.push('\n');
            out.push_str(&text_block(alert));
        }
        out
    }

    /// A single summary table, one row per alert.
    pub fn render_table(&self, alerts: &[Alert]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec![
                "Ticker",
                "Event",
                "Target",
                "Effective",
                "Phase",
                "Score",
                "Intensity",
                "Status",
                "Shares to Buy",
                "Dollars to Buy",
                "RVOL",
                "Action",
            ]);

        for alert in alerts {
            let pressure = &alert.pressure;
            let (rvol, action) = match &alert.squeeze {
                Some(squeeze) => (format!("{}x", squeeze.relative_volume), squeeze.action.clone()),
                None => ("-".to_string(), "-".to_string()),
            };
            table.add_row(vec![
                alert.ticker.clone(),
                alert.event_type.to_string(),
                pressure.index_target.clone(),
                format!("{} ({})", alert.effective_date, countdown(alert.days_until_effective)),
                alert.phase.to_string(),
                format!("{}x", pressure.pressure_score),
                pressure.intensity.to_string(),
                pressure.alert_level.clone(),
                group_thousands(&pressure.shares_to_buy.to_string()),
                format_dollars(pressure.dollars_to_buy),
                rvol,
                action,
            ]);
        }

        format!("{}\n{table}\n", self.settings.title)
    }

    pub fn render_json(&self, alerts: &[Alert]) -> Result<String, AlerterError> {
        Ok(serde_json::to_string_pretty(alerts)?)
    }

    /// Renders a single ad-hoc analysis in the configured format.
    pub fn render_analysis(&self, analysis: &Analysis) -> Result<String, AlerterError> {
        let pressure = &analysis.pressure;
        match self.settings.format {
            OutputFormat::Text => {
                let mut block = format!(
                    "ANALYSIS: {} joining {}\n",
                    pressure.ticker, pressure.index_target
                );
                write_pressure_lines(&mut block, pressure);
                write_squeeze_lines(&mut block, analysis.squeeze.as_ref());
                Ok(block)
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
                table.add_row(vec!["Ticker".to_string(), pressure.ticker.clone()]);
                table.add_row(vec!["Target".to_string(), pressure.index_target.clone()]);
                table.add_row(vec!["Profile".to_string(), pressure.resolved_index.clone()]);
                table.add_row(vec!["Score".to_string(), format!("{}x", pressure.pressure_score)]);
                table.add_row(vec!["Intensity".to_string(), pressure.ui_label.clone()]);
                table.add_row(vec!["Status".to_string(), pressure.alert_level.clone()]);
                table.add_row(vec![
                    "Shares to Buy".to_string(),
                    group_thousands(&pressure.shares_to_buy.to_string()),
                ]);
                table.add_row(vec![
                    "Dollars to Buy".to_string(),
                    format_dollars(pressure.dollars_to_buy),
                ]);
                if let Some(squeeze) = &analysis.squeeze {
                    table.add_row(vec![
                        "RVOL".to_string(),
                        format!("{}x", squeeze.relative_volume),
                    ]);
                    table.add_row(vec!["Algo Alert".to_string(), squeeze.algo_alert.clone()]);
                    table.add_row(vec!["Action".to_string(), squeeze.action.clone()]);
                }
                Ok(format!("{table}\n"))
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
        }
    }
}

fn text_block(alert: &Alert) -> String {
    let pressure = &alert.pressure;
    let mut block = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(block, "ALERT: {} joining {}", alert.ticker, pressure.index_target);
    write_pressure_lines(&mut block, pressure);
    let _ = writeln!(
        block,
        "Effective: {} ({})",
        alert.effective_date,
        countdown(alert.days_until_effective)
    );
    let _ = writeln!(block, "Phase: {} ({})", alert.phase, alert.phase.description());
    write_squeeze_lines(&mut block, alert.squeeze.as_ref());
    block
}

fn write_pressure_lines(block: &mut String, pressure: &PressureResult) {
    let _ = writeln!(block, "Intensity: {}", pressure.ui_label);
    let _ = writeln!(block, "Pressure Score: {}x", pressure.pressure_score);
    let _ = writeln!(block, "Status: {}", pressure.alert_level);

    if pressure.used_default_index() {
        let _ = writeln!(block, "Index Profile: {} (default)", pressure.resolved_index);
    }
    let _ = writeln!(
        block,
        "Mechanical Buy: {} shares ({})",
        group_thousands(&pressure.shares_to_buy.to_string()),
        format_dollars(pressure.dollars_to_buy)
    );
}

fn write_squeeze_lines(block: &mut String, squeeze: Option<&SqueezeAssessment>) {
    if let Some(squeeze) = squeeze {
        let _ = writeln!(
            block,
            "Relative Volume: {}x ({})",
            squeeze.relative_volume, squeeze.algo_alert
        );
        let _ = writeln!(block, "Action: {}", squeeze.action);
    }
}

fn countdown(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "1 day ago".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

/// Whole dollars with thousands separators, e.g. `$7,100,000,000`.
pub fn format_dollars(amount: Decimal) -> String {
    format!("${}", group_thousands(&amount.round_dp(0).to_string()))
}

/// Inserts `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
