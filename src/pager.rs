//! Paging of listing output

use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Pick the pager command: explicit choice first, then `PAGER`.
///
/// An empty command means "no pager".
pub fn select_pager(configured: Option<&str>) -> Option<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var("PAGER").ok())
        .map(|pager| pager.trim().to_string())
        .filter(|pager| !pager.is_empty())
}

/// Write `content` through the pager, or straight to stdout when there is
/// no pager or stdout is not a terminal.
pub fn output_with_pager(content: &str, pager: Option<&str>) -> Result<()> {
    let pager = match pager {
        Some(pager) if std::io::stdout().is_terminal() => pager,
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            return Ok(());
        }
    };

    let mut parts = pager.split_whitespace();
    let program = parts.next().context("failed to start pager: empty command")?;

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start pager: {:?}", pager))?;

    if let Some(mut stdin) = child.stdin.take() {
        // The user may quit the pager before reading everything
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            tracing::debug!("Pager closed its input early: {}", e);
        }
    }

    child.wait().context("failed to wait for pager")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_select_pager_prefers_configured() {
        // SAFETY: serialized with other env-mutating tests
        unsafe { std::env::set_var("PAGER", "more") };
        assert_eq!(select_pager(Some("less -R")), Some("less -R".to_string()));
        assert_eq!(select_pager(None), Some("more".to_string()));
        unsafe { std::env::remove_var("PAGER") };
    }

    #[test]
    #[serial]
    fn test_select_pager_empty_disables() {
        unsafe { std::env::set_var("PAGER", "more") };
        assert_eq!(select_pager(Some("")), None);
        unsafe { std::env::remove_var("PAGER") };
        assert_eq!(select_pager(None), None);
    }
}
