use console::style;

/// Styled terminal output for command results
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Label/value line for KPI cards
    pub fn metric(&self, label: &str, value: &str) {
        println!("  {:<24} {}", style(label).dim(), style(value).cyan().bold());
    }

    /// Plain table row
    pub fn row(&self, cells: &[String]) {
        println!("  {}", cells.join("  "));
    }

    /// Assistant reply
    pub fn answer(&self, message: &str) {
        println!("{} {}", style("»").magenta().bold(), message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
