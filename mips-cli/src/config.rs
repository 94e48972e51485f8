// Simulation configuration
use anyhow::{Context, Result};
use mips_core::cpu::register_file::SLOTS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Program and initial state for a simulation run, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Instruction words, executed in order.
    pub program: Vec<u32>,
    /// Seeds for logical registers 1, 2, ...; missing registers start at zero.
    pub registers: Vec<u32>,
    /// Stop after this many steps even if the program is longer.
    pub max_steps: Option<usize>,
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: SimConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.registers.len() > SLOTS {
            anyhow::bail!(
                "Config seeds {} registers, but only registers 1-{} have storage",
                self.registers.len(),
                SLOTS
            );
        }
        Ok(())
    }

    /// Initial values for the register file's storage slots.
    pub fn register_seed(&self) -> Result<[u32; SLOTS]> {
        self.validate()?;
        let mut seed = [0u32; SLOTS];
        seed[..self.registers.len()].copy_from_slice(&self.registers);
        Ok(seed)
    }
}
