use std::error::Error;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Single-choice fzf picker used by the color scheme selector.
pub struct FzfPicker {
    height: Option<String>,
    layout: Option<String>,
}

impl FzfPicker {
    pub fn new() -> Self {
        Self {
            height: Some("40%".to_string()),
            layout: Some("reverse".to_string()),
        }
    }

    /// Pick one line out of `lines`; `None` means the user cancelled.
    pub fn pick_one(
        &self,
        lines: &[String],
    ) -> Result<Option<String>, Box<dyn Error>> {
        if !is_fzf_available() {
            return Err(
                "fzf is not installed or STICKY_NOTES_NO_FZF is set".into()
            );
        }

        let mut cmd = Command::new("fzf");
        cmd.arg("--no-multi");
        if let Some(ref height) = self.height {
            cmd.arg("--height").arg(height);
        }
        if let Some(ref layout) = self.layout {
            cmd.arg("--layout").arg(layout);
        }

        let mut child =
            cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).spawn()?;
        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(lines.join("\n").as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() || output.stdout.is_empty() {
            return Ok(None); // User cancelled
        }
        let selected = String::from_utf8_lossy(&output.stdout);
        Ok(selected.lines().next().map(|s| s.to_string()))
    }
}

impl Default for FzfPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if fzf is available
pub fn is_fzf_available() -> bool {
    if std::env::var("STICKY_NOTES_NO_FZF").is_ok() {
        return false;
    }

    static FZF_AVAILABLE: OnceLock<bool> = OnceLock::new();
    *FZF_AVAILABLE.get_or_init(|| {
        Command::new("fzf")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_defaults() {
        let picker = FzfPicker::new();
        assert_eq!(picker.height.as_deref(), Some("40%"));
        assert_eq!(picker.layout.as_deref(), Some("reverse"));
    }
}
