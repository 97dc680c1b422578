use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_core::{FieldErrors, Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Render the outcome of an action
    pub fn notice(&self, notice: &Notice) {
        match self.format {
            OutputFormat::Human => match notice.level {
                NoticeLevel::Success => self.success(&notice.message),
                NoticeLevel::Info => self.info(&notice.message),
                NoticeLevel::Error => self.error(&notice.message),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                if self.quiet && !notice.is_error() {
                    return;
                }
                self.print_json(&json!({
                    "type": notice.level,
                    "title": notice.title,
                    "message": notice.message
                }));
            }
        }
    }

    /// Print each invalid field next to its message
    pub fn field_errors(&self, errors: &FieldErrors) {
        match self.format {
            OutputFormat::Human => {
                for (field, msg) in errors.messages() {
                    eprintln!("  {} {}: {}", "✗".red(), field.bold(), msg);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .messages()
                    .into_iter()
                    .map(|(field, msg)| (field.to_string(), json!(msg)))
                    .collect();
                self.print_json(&json!({
                    "type": "validation",
                    "fields": fields
                }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}
