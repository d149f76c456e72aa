use crate::device_display::interface::DeviceDisplay;
use std::error::Error;
use std::io::Write;

pub struct DeviceDisplayConsole<W: Write + Send + Sync> {
    out: W,
}

impl DeviceDisplayConsole<std::io::Stdout> {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send + Sync> DeviceDisplayConsole<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send + Sync> DeviceDisplay for DeviceDisplayConsole<W> {
    fn set_result_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "┌ result")?;
        writeln!(self.out, "└ {}", text)?;
        Ok(())
    }

    fn show_preview(&mut self, source: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "  preview: {}", source)?;
        Ok(())
    }

    fn show_input_image(
        &mut self,
        caption: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "  {}: {} bytes", caption.to_lowercase(), bytes.len())?;
        Ok(())
    }

    fn set_confidence(&mut self, score: Option<f64>) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(score) = score.filter(|s| (0.0..=1.0).contains(s)) {
            let filled = (score * 20.0).round() as usize;
            writeln!(
                self.out,
                "  [{}{}] {:.2}%",
                "█".repeat(filled),
                " ".repeat(20 - filled),
                score * 100.0
            )?;
        }
        Ok(())
    }
}
