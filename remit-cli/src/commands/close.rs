//! Close command - delete an account

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use remit_core::Error;

use super::get_context;

pub fn run(id: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;

    let account = match ctx.account_service.get(id) {
        Ok(account) => account,
        Err(Error::NotFound(_)) => {
            println!("{}", format!("Account '{}' does not exist, nothing to close", id).dimmed());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // Confirm removal unless --force
    if !force {
        println!(
            "\n{}",
            format!(
                "This will delete account '{}' (balance {}).",
                account.id, account.balance
            )
            .yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.account_service.close(id)?;
    println!("\n{} Account '{}' closed\n", "✓".green(), id);
    Ok(())
}
