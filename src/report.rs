use std::fmt::Write;
use std::io::{self, Write as IoWrite};

use crate::import::{ImportEvent, Prompt, Reporter};
use crate::models::ImportStats;

/// Renders progress events as the console lines an operator follows live.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn emit(&mut self, event: ImportEvent<'_>) {
        match event {
            ImportEvent::Processing { index, total, email } => {
                println!("[{index}/{total}] Processing {email}...");
            }
            ImportEvent::SkippedExisting { .. } => {
                println!("   ⏭️  Already registered, skipping");
            }
            ImportEvent::CheckFailed { message, .. } => {
                println!("   ❌ Existence check failed: {message}");
            }
            ImportEvent::AuthCreated { .. } => {
                println!("   ✅ Auth account created");
            }
            ImportEvent::AuthFailed { message, .. } => {
                println!("   ⚠️  Auth creation failed ({message}), importing without account");
            }
            ImportEvent::MemberCreated { .. } => {
                println!("   ✅ Member imported");
            }
            ImportEvent::MemberFailed { message, .. } => {
                println!("   ❌ Member insert failed: {message}");
            }
            ImportEvent::Progress { stats } => {
                println!();
                println!(
                    "   📊 Progress: {}/{} processed ({} imported, {} failed, {} existing)",
                    stats.processed(),
                    stats.total,
                    stats.successful,
                    stats.failed,
                    stats.existing
                );
                println!();
            }
        }
    }
}

/// Interactive yes/no gate on stdin. Anything but `y`/`yes` declines.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> anyhow::Result<bool> {
        print!("{message}\nContinue? (y/n): ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();

        Ok(answer == "y" || answer == "yes")
    }
}

pub fn render_summary(stats: &ImportStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", "=".repeat(60));
    let _ = writeln!(output, "📊 IMPORT REPORT");
    let _ = writeln!(output, "{}", "=".repeat(60));
    let _ = writeln!(output, "Total users:          {}", stats.total);
    let _ = writeln!(output, "✅ Imported:           {}", stats.successful);
    let _ = writeln!(output, "🔐 Auth accounts:      {}", stats.auth_created);
    let _ = writeln!(output, "⏭️  Already existing:   {}", stats.existing);
    let _ = writeln!(output, "❌ Failed:             {}", stats.failed);

    if !stats.errors.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Failures:");
        for error in &stats.errors {
            let _ = writeln!(output, "- {}: {}", error.email, error.message);
        }
    }

    let _ = writeln!(output, "{}", "=".repeat(60));
    output
}

/// Post-run advisory, present only when auth accounts were created.
pub fn render_advisory(stats: &ImportStats) -> Option<String> {
    if stats.auth_created == 0 {
        return None;
    }

    let mut output = String::new();
    let _ = writeln!(output);
    let _ = writeln!(output, "💡 IMPORTANT:");
    let _ = writeln!(
        output,
        "   - Temporary passwords are random and are not recorded anywhere"
    );
    let _ = writeln!(
        output,
        "   - Accounts are pre-confirmed; no confirmation email was sent"
    );
    let _ = writeln!(
        output,
        "   - Force a password reset on first login before handing accounts over"
    );
    Some(output)
}
