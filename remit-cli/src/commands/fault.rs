//! Fault command - configure the fault-injection sentinel

use anyhow::Result;
use colored::Colorize;
use remit_core::config::Config;

use super::get_remit_dir;

pub fn run(sentinel: Option<String>, off: bool) -> Result<()> {
    let remit_dir = get_remit_dir()?;
    std::fs::create_dir_all(&remit_dir)?;
    let mut config = Config::load(&remit_dir)?;

    if off {
        config.disable_fault_injection();
        config.save(&remit_dir)?;
    } else if let Some(sentinel) = sentinel {
        config.enable_fault_injection(sentinel);
        config.save(&remit_dir)?;
    }

    match &config.fault_sentinel {
        Some(id) => println!(
            "Fault injection is {}: transfers to '{}' are rejected after the debit",
            "ON".red(),
            id
        ),
        None => println!("Fault injection is {}", "OFF".green()),
    }
    Ok(())
}
