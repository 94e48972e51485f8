// CLI command handlers
use anyhow::{Context, Result};
use mips_core::cpu::decoder::decode;
use mips_core::cpu::register_file::RegisterFile;
use std::fs;
use std::path::Path;

use crate::config::SimConfig;
use crate::sim::{Datapath, SimReport};

/// Run the program from a config file and write the JSON trace to `out`.
pub fn simulate(config_path: &Path, out: &Path) -> Result<SimReport> {
    let config = SimConfig::load(config_path)?;
    log::info!(
        "Loaded {} instruction words from {}",
        config.program.len(),
        config_path.display()
    );

    let mut datapath = Datapath::new(RegisterFile::with_values(config.register_seed()?));
    let report = datapath.run(&config.program, config.max_steps);

    let content = serde_json::to_string_pretty(&report).context("Failed to serialize simulation trace")?;
    fs::write(out, content)
        .with_context(|| format!("Failed to write simulation trace: {}", out.display()))?;

    println!("Simulated {} steps ({} trapped)", report.steps.len(), report.traps);
    println!("Trace written to: {}", out.display());
    Ok(report)
}

/// Parse an instruction word given as `0x`-prefixed hex or decimal.
pub fn parse_word(text: &str) -> Result<u32> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse::<u32>(),
    };
    parsed.with_context(|| format!("Invalid instruction word: {}", text))
}

/// Print the disassembly and decoded fields of each word.
pub fn decode_words(words: &[String]) -> Result<()> {
    for text in words {
        let word = parse_word(text)?;
        let inst = decode(word);
        let r = inst.record();
        println!("0x{:08X}  {}", word, inst);
        println!(
            "    opcode=0x{:02X} rs={} rt={} rd={} shamt={} funct=0x{:02X} imm=0x{:04X} addr=0x{:07X}",
            r.opcode, r.rs, r.rt, r.rd, r.shamt, r.funct, r.imm, r.addr
        );
    }
    Ok(())
}

pub fn synthesize() -> Result<()> {
    anyhow::bail!("synth not yet implemented")
}

pub fn flash() -> Result<()> {
    anyhow::bail!("flash not yet implemented")
}
